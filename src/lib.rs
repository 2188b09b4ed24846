#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod dialog;
pub mod error;
pub mod export;
pub mod panels;
pub mod state;
pub mod surface;

pub use app::WhiteboardApp;
pub use dialog::TextDialog;
pub use error::Error;
pub use export::ExportFormat;
pub use state::{PointerEvent, PointerMode, ToolState, Whiteboard};
pub use surface::{Primitive, PrimitiveId, Surface};
