use thiserror::Error;

/// Errors the whiteboard can report to the user.
///
/// User cancellations (color picker, save dialog) are not errors; they show
/// up as `None` in the calling code and leave all state untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// A position field in the add-text dialog did not parse as an integer.
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("could not write file: {0}")]
    Io(#[from] std::io::Error),
}
