use crate::state::PointerEvent;
use crate::surface::{Primitive, BACKGROUND, TEXT_FONT_SIZE};
use crate::WhiteboardApp;

/// The drawing canvas: routes drag gestures into the pointer state machine
/// and paints the surface primitives in creation order.
pub fn central_panel(app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;
            app.set_canvas_rect(canvas_rect);

            let painter = painter.with_clip_rect(canvas_rect);
            painter.rect_filled(canvas_rect, 0.0, BACKGROUND);

            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    app.board_mut().handle_pointer(PointerEvent::Pressed(pos));
                }
            } else if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    app.board_mut().handle_pointer(PointerEvent::Moved(pos));
                }
            }
            if response.drag_stopped() {
                app.board_mut().handle_pointer(PointerEvent::Released);
            }

            // Paint, collecting the laid-out label sizes so hit-testing uses
            // what is actually on screen.
            let mut measured = Vec::new();
            for (id, primitive) in app.board().surface().iter() {
                match primitive {
                    Primitive::Segment {
                        from,
                        to,
                        color,
                        width,
                    } => {
                        painter.line_segment([*from, *to], egui::Stroke::new(*width, *color));
                    }
                    Primitive::Text {
                        pos, text, color, ..
                    } => {
                        let rect = painter.text(
                            *pos,
                            egui::Align2::LEFT_TOP,
                            text,
                            egui::FontId::proportional(TEXT_FONT_SIZE),
                            *color,
                        );
                        measured.push((id, rect.size()));
                    }
                }
            }
            for (id, size) in measured {
                app.board_mut().surface_mut().set_text_size(id, size);
            }
        });
}
