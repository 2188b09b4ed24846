use crate::state::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
use crate::WhiteboardApp;

/// The control bar across the top of the window.
pub fn tools_panel(app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("controls").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Color:");
            // The picker edits a scratch copy; only a committed change
            // reaches the tool state (and turns the eraser off). Closing
            // the picker without touching it leaves everything as-is.
            let mut color = app.board().tools().color();
            let picker = egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::Opaque,
            );
            if picker.changed() {
                app.board_mut().tools_mut().set_color(color);
            }

            let eraser_on = app.board().tools().eraser_active();
            if ui.selectable_label(eraser_on, "Eraser").clicked() {
                app.board_mut().tools_mut().set_eraser();
            }

            if ui.button("Clear").clicked() {
                app.board_mut().clear();
            }

            if ui.button("Add Text").clicked() {
                app.open_text_dialog();
            }

            if ui.button("Save").clicked() {
                app.request_export();
            }

            ui.separator();
            ui.label("Width");
            let mut width = app.board().tools().width();
            let slider = ui.add(egui::Slider::new(
                &mut width,
                MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH,
            ));
            if slider.changed() {
                app.board_mut().tools_mut().set_width(width);
            }
        });
    });
}
