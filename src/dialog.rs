use egui::Pos2;

use crate::error::Error;

const DEFAULT_POSITION_FIELD: &str = "50";

/// A confirmed add-text request: where to place the label and what it says.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub pos: Pos2,
    pub text: String,
}

/// The modal "Add Text" dialog.
///
/// Holds the in-progress field strings between frames and validates them on
/// confirm. Malformed coordinates are a recoverable validation error shown
/// inside the dialog, never a crash. The caller only sees the two-outcome
/// contract: a [`TextRequest`] or nothing.
#[derive(Debug, Default)]
pub struct TextDialog {
    open: bool,
    text: String,
    x: String,
    y: String,
    error: Option<String>,
}

impl TextDialog {
    pub fn open(&mut self) {
        self.open = true;
        self.text.clear();
        self.x = DEFAULT_POSITION_FIELD.to_owned();
        self.y = DEFAULT_POSITION_FIELD.to_owned();
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Validate the current fields and close the dialog if they pass.
    ///
    /// Returns `Ok(None)` for empty text (the dialog closes and nothing is
    /// created) and `Err` for a malformed coordinate (the dialog stays open).
    pub fn confirm(&mut self) -> Result<Option<TextRequest>, Error> {
        let x = parse_coordinate("X", &self.x)?;
        let y = parse_coordinate("Y", &self.y)?;
        self.open = false;
        self.error = None;
        if self.text.is_empty() {
            return Ok(None);
        }
        Ok(Some(TextRequest {
            pos: Pos2::new(x as f32, y as f32),
            text: std::mem::take(&mut self.text),
        }))
    }

    pub fn cancel(&mut self) {
        self.open = false;
        self.error = None;
    }

    /// Render the dialog. Returns a request on the frame the user confirms
    /// with valid input.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<TextRequest> {
        if !self.open {
            return None;
        }

        let mut confirmed = None;
        let mut add_clicked = false;
        let mut cancel_clicked = false;

        egui::Window::new("Add Text")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("add_text_fields").show(ui, |ui| {
                    ui.label("Text:");
                    ui.text_edit_singleline(&mut self.text);
                    ui.end_row();

                    ui.label("X:");
                    ui.text_edit_singleline(&mut self.x);
                    ui.end_row();

                    ui.label("Y:");
                    ui.text_edit_singleline(&mut self.y);
                    ui.end_row();
                });

                if let Some(error) = &self.error {
                    ui.colored_label(egui::Color32::RED, error);
                }

                ui.horizontal(|ui| {
                    add_clicked = ui.button("Add").clicked();
                    cancel_clicked = ui.button("Cancel").clicked();
                });
            });

        if add_clicked {
            match self.confirm() {
                Ok(request) => confirmed = request,
                Err(err) => self.error = Some(err.to_string()),
            }
        } else if cancel_clicked {
            self.cancel();
        }

        confirmed
    }
}

fn parse_coordinate(field: &'static str, value: &str) -> Result<i32, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidCoordinate {
            field,
            value: value.to_owned(),
        })
}
