use std::collections::HashMap;

use egui::{Color32, Pos2};

use crate::surface::{PrimitiveId, Surface, BACKGROUND};

pub const MIN_STROKE_WIDTH: u32 = 1;
pub const MAX_STROKE_WIDTH: u32 = 10;

const DEFAULT_COLOR: Color32 = Color32::BLUE;
const DEFAULT_STROKE_WIDTH: u32 = 2;

/// Pen settings shared by the drawing and erasing paths.
///
/// Eraser mode and an explicit color choice are mutually exclusive: turning
/// the eraser on overrides the effective color with the surface background,
/// and picking a color turns the eraser off again. Width is shared, so the
/// eraser tracks the width slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    color: Color32,
    width: u32,
    eraser: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            width: DEFAULT_STROKE_WIDTH,
            eraser: false,
        }
    }
}

impl ToolState {
    /// Commit an explicit color choice. Always leaves eraser mode.
    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
        self.eraser = false;
    }

    pub fn set_eraser(&mut self) {
        self.eraser = true;
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn eraser_active(&self) -> bool {
        self.eraser
    }

    /// The color the next primitive will actually be drawn with.
    pub fn effective_color(&self) -> Color32 {
        if self.eraser {
            BACKGROUND
        } else {
            self.color
        }
    }
}

/// What the pointer is currently doing on the canvas. Exactly one of
/// `Drawing`/`Dragging` is active between a press and the matching release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMode {
    Idle,
    /// Freehand drawing; `prev` is the running previous point of the stroke.
    Drawing { prev: Pos2 },
    /// Dragging a text annotation; `last` is the last observed pointer
    /// position, used to compute incremental deltas.
    Dragging { target: PrimitiveId, last: Pos2 },
}

impl Default for PointerMode {
    fn default() -> Self {
        Self::Idle
    }
}

/// A pointer gesture event on the canvas, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Pos2),
    Moved(Pos2),
    Released,
}

/// All whiteboard state: the surface, the annotation registry that tells
/// text labels apart from stroke segments, the pen settings, and the pointer
/// state machine. Deliberately UI-free so the event handling is testable
/// without a window.
#[derive(Debug, Default)]
pub struct Whiteboard {
    surface: Surface,
    annotations: HashMap<PrimitiveId, String>,
    tools: ToolState,
    mode: PointerMode,
}

impl Whiteboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolState {
        &mut self.tools
    }

    pub fn mode(&self) -> PointerMode {
        self.mode
    }

    pub fn annotation(&self, id: PrimitiveId) -> Option<&str> {
        self.annotations.get(&id).map(String::as_str)
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    /// Route a pointer event through the Idle/Drawing/Dragging state machine.
    ///
    /// A press hit-tests the closest primitive to the press point: if that
    /// primitive is a registered annotation, the gesture drags it (closest
    /// match, not exact hit, so clicking near a label grabs it rather than
    /// starting a stroke under it). Any other press starts a freehand stroke.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Pressed(pos) => {
                self.mode = match self.surface.find_closest(pos) {
                    Some(id) if self.annotations.contains_key(&id) => {
                        PointerMode::Dragging { target: id, last: pos }
                    }
                    _ => PointerMode::Drawing { prev: pos },
                };
            }
            PointerEvent::Moved(pos) => match self.mode {
                PointerMode::Drawing { prev } => {
                    self.surface.draw_line(
                        prev,
                        pos,
                        self.tools.effective_color(),
                        self.tools.width() as f32,
                    );
                    self.mode = PointerMode::Drawing { prev: pos };
                }
                PointerMode::Dragging { target, last } => {
                    self.surface.translate(target, pos - last);
                    self.mode = PointerMode::Dragging { target, last: pos };
                }
                PointerMode::Idle => {}
            },
            PointerEvent::Released => self.mode = PointerMode::Idle,
        }
    }

    /// Create a text annotation at `pos` in the current effective color and
    /// register it for drag hit-testing. Empty text is a no-op.
    pub fn add_text(&mut self, pos: Pos2, text: &str) -> Option<PrimitiveId> {
        if text.is_empty() {
            return None;
        }
        let id = self
            .surface
            .create_text(pos, text.to_owned(), self.tools.effective_color());
        self.annotations.insert(id, text.to_owned());
        Some(id)
    }

    /// Remove every primitive. The annotation registry is cleared in the
    /// same step; it must never hold ids the surface no longer knows.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.annotations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn color_choice_leaves_eraser_mode() {
        let mut tools = ToolState::default();
        tools.set_eraser();
        assert!(tools.eraser_active());
        assert_eq!(tools.effective_color(), BACKGROUND);

        tools.set_color(Color32::RED);
        assert!(!tools.eraser_active());
        assert_eq!(tools.effective_color(), Color32::RED);

        // Mutual exclusion holds for any sequence of toggles.
        tools.set_eraser();
        tools.set_eraser();
        assert_eq!(tools.effective_color(), BACKGROUND);
        tools.set_color(Color32::GREEN);
        assert_eq!(tools.effective_color(), Color32::GREEN);
    }

    #[test]
    fn width_is_clamped_to_slider_range() {
        let mut tools = ToolState::default();
        tools.set_width(0);
        assert_eq!(tools.width(), MIN_STROKE_WIDTH);
        tools.set_width(99);
        assert_eq!(tools.width(), MAX_STROKE_WIDTH);
        tools.set_width(7);
        assert_eq!(tools.width(), 7);
    }

    #[test]
    fn empty_text_creates_nothing() {
        let mut board = Whiteboard::new();
        assert_eq!(board.add_text(pos2(50.0, 50.0), ""), None);
        assert!(board.surface().is_empty());
        assert_eq!(board.annotation_count(), 0);
    }
}
