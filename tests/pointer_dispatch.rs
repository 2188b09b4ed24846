use egui::{pos2, Color32};
use whiteboard::surface::BACKGROUND;
use whiteboard::{PointerEvent, PointerMode, Primitive, Whiteboard};

fn segment_colors(board: &Whiteboard) -> Vec<Color32> {
    board
        .surface()
        .iter()
        .filter_map(|(_, primitive)| match primitive {
            Primitive::Segment { color, .. } => Some(*color),
            Primitive::Text { .. } => None,
        })
        .collect()
}

#[test]
fn drag_gesture_draws_segments_along_the_path() {
    let mut board = Whiteboard::new();
    board.tools_mut().set_color(Color32::from_rgb(0xFF, 0, 0));
    board.tools_mut().set_width(5);

    board.handle_pointer(PointerEvent::Pressed(pos2(10.0, 10.0)));
    assert!(matches!(board.mode(), PointerMode::Drawing { .. }));
    // Press alone draws nothing; segments appear as the pointer moves.
    assert_eq!(board.surface().len(), 0);

    board.handle_pointer(PointerEvent::Moved(pos2(30.0, 30.0)));
    board.handle_pointer(PointerEvent::Moved(pos2(50.0, 50.0)));
    board.handle_pointer(PointerEvent::Released);
    assert_eq!(board.mode(), PointerMode::Idle);

    let segments: Vec<_> = board
        .surface()
        .iter()
        .filter_map(|(_, primitive)| match primitive {
            Primitive::Segment {
                from,
                to,
                color,
                width,
            } => Some((*from, *to, *color, *width)),
            Primitive::Text { .. } => None,
        })
        .collect();
    assert_eq!(
        segments,
        vec![
            (
                pos2(10.0, 10.0),
                pos2(30.0, 30.0),
                Color32::from_rgb(0xFF, 0, 0),
                5.0
            ),
            (
                pos2(30.0, 30.0),
                pos2(50.0, 50.0),
                Color32::from_rgb(0xFF, 0, 0),
                5.0
            ),
        ]
    );
}

#[test]
fn eraser_draws_background_color_but_keeps_width() {
    let mut board = Whiteboard::new();
    board.tools_mut().set_color(Color32::from_rgb(0xFF, 0, 0));
    board.tools_mut().set_width(5);

    board.handle_pointer(PointerEvent::Pressed(pos2(10.0, 10.0)));
    board.handle_pointer(PointerEvent::Moved(pos2(50.0, 50.0)));
    board.handle_pointer(PointerEvent::Released);

    board.tools_mut().set_eraser();
    board.handle_pointer(PointerEvent::Pressed(pos2(20.0, 20.0)));
    board.handle_pointer(PointerEvent::Moved(pos2(30.0, 30.0)));
    board.handle_pointer(PointerEvent::Released);

    let widths: Vec<_> = board
        .surface()
        .iter()
        .filter_map(|(_, primitive)| match primitive {
            Primitive::Segment { width, .. } => Some(*width),
            Primitive::Text { .. } => None,
        })
        .collect();
    assert_eq!(
        segment_colors(&board),
        vec![Color32::from_rgb(0xFF, 0, 0), BACKGROUND]
    );
    // Eraser width tracks the shared slider.
    assert_eq!(widths, vec![5.0, 5.0]);
}

#[test]
fn press_near_annotation_drags_it_instead_of_drawing() {
    let mut board = Whiteboard::new();
    let id = board.add_text(pos2(100.0, 100.0), "label").unwrap();

    // Not exactly on the glyphs, but the label is the closest primitive.
    board.handle_pointer(PointerEvent::Pressed(pos2(95.0, 95.0)));
    assert_eq!(
        board.mode(),
        PointerMode::Dragging {
            target: id,
            last: pos2(95.0, 95.0)
        }
    );

    board.handle_pointer(PointerEvent::Moved(pos2(105.0, 115.0)));
    board.handle_pointer(PointerEvent::Moved(pos2(110.0, 120.0)));
    board.handle_pointer(PointerEvent::Released);

    // The drag created no stroke segments, only moved the label by the
    // accumulated delta.
    assert_eq!(board.surface().len(), 1);
    match board.surface().get(id) {
        Some(Primitive::Text { pos, .. }) => assert_eq!(*pos, pos2(115.0, 125.0)),
        other => panic!("unexpected primitive: {other:?}"),
    }
}

#[test]
fn press_near_stroke_starts_a_new_stroke() {
    let mut board = Whiteboard::new();
    board.handle_pointer(PointerEvent::Pressed(pos2(10.0, 10.0)));
    board.handle_pointer(PointerEvent::Moved(pos2(20.0, 20.0)));
    board.handle_pointer(PointerEvent::Released);

    // Closest primitive is a stroke segment, not a registered annotation,
    // so a second press right next to it draws rather than drags.
    board.handle_pointer(PointerEvent::Pressed(pos2(15.0, 16.0)));
    assert!(matches!(board.mode(), PointerMode::Drawing { .. }));
    board.handle_pointer(PointerEvent::Moved(pos2(25.0, 26.0)));
    board.handle_pointer(PointerEvent::Released);

    assert_eq!(board.surface().len(), 2);
}

#[test]
fn moves_without_a_press_are_ignored() {
    let mut board = Whiteboard::new();
    board.handle_pointer(PointerEvent::Moved(pos2(10.0, 10.0)));
    board.handle_pointer(PointerEvent::Moved(pos2(20.0, 20.0)));
    assert_eq!(board.mode(), PointerMode::Idle);
    assert!(board.surface().is_empty());
}

#[test]
fn release_always_returns_to_idle() {
    let mut board = Whiteboard::new();
    board.add_text(pos2(50.0, 50.0), "label");

    board.handle_pointer(PointerEvent::Pressed(pos2(50.0, 50.0)));
    assert!(matches!(board.mode(), PointerMode::Dragging { .. }));
    board.handle_pointer(PointerEvent::Released);
    assert_eq!(board.mode(), PointerMode::Idle);

    // A move after release neither draws nor drags.
    board.handle_pointer(PointerEvent::Moved(pos2(200.0, 200.0)));
    assert_eq!(board.surface().len(), 1);
}
