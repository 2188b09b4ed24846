use crate::dialog::TextDialog;
use crate::export;
use crate::panels;
use crate::state::Whiteboard;

/// Frames to wait between the Save click and the actual pixel grab, so any
/// transient redraw (button highlight, closing popup) settles first.
const CAPTURE_SETTLE_FRAMES: u8 = 3;

/// Top-level application: owns the whiteboard core plus the bits of UI
/// workflow state (dialog, pending capture, last error) that do not belong
/// in the testable core.
pub struct WhiteboardApp {
    board: Whiteboard,
    text_dialog: TextDialog,
    canvas_rect: egui::Rect,
    capture_countdown: Option<u8>,
    last_error: Option<String>,
}

impl WhiteboardApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            board: Whiteboard::new(),
            text_dialog: TextDialog::default(),
            canvas_rect: egui::Rect::ZERO,
            capture_countdown: None,
            last_error: None,
        }
    }

    pub fn board(&self) -> &Whiteboard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Whiteboard {
        &mut self.board
    }

    pub fn open_text_dialog(&mut self) {
        self.text_dialog.open();
    }

    /// Remember where the canvas landed this frame; the screenshot is
    /// cropped to this rect.
    pub fn set_canvas_rect(&mut self, rect: egui::Rect) {
        self.canvas_rect = rect;
    }

    /// Kick off the save workflow. The capture itself happens a few frames
    /// later; see [`CAPTURE_SETTLE_FRAMES`].
    pub fn request_export(&mut self) {
        self.capture_countdown = Some(CAPTURE_SETTLE_FRAMES);
    }

    fn tick_capture_countdown(&mut self, ctx: &egui::Context) {
        let Some(frames_left) = self.capture_countdown else {
            return;
        };
        if frames_left == 0 {
            self.capture_countdown = None;
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
        } else {
            self.capture_countdown = Some(frames_left - 1);
        }
        ctx.request_repaint();
    }

    /// Pick the screenshot event up once the backend delivers it, crop it to
    /// the canvas, and run the save dialog.
    fn handle_screenshot_events(&mut self, ctx: &egui::Context) {
        let screenshot = ctx.input(|input| {
            input.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = screenshot else { return };

        let pixels_per_point = ctx.pixels_per_point();
        let capture = image.region(&self.canvas_rect, Some(pixels_per_point));
        self.export_capture(capture);
    }

    fn export_capture(&mut self, capture: egui::ColorImage) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .add_filter("JPEG Image", &["jpg"])
            .add_filter("PDF Document", &["pdf"])
            .set_file_name("whiteboard.png")
            .save_file()
        else {
            // Cancelling the save dialog is not an error.
            log::info!("export cancelled");
            return;
        };

        if let Err(err) = export::write(&capture, &path) {
            log::error!("export to {} failed: {err}", path.display());
            self.last_error = Some(err.to_string());
        }
    }

    fn show_error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.last_error.clone() else {
            return;
        };
        egui::Window::new("Export failed")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.last_error = None;
                }
            });
    }
}

impl eframe::App for WhiteboardApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_screenshot_events(ctx);

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);

        if let Some(request) = self.text_dialog.show(ctx) {
            self.board.add_text(request.pos, &request.text);
        }

        self.show_error_window(ctx);
        self.tick_capture_countdown(ctx);
    }
}
