use egui::{Color32, Pos2, Vec2};

/// Color of the empty surface. Also the effective pen color while erasing.
pub const BACKGROUND: Color32 = Color32::WHITE;

/// Font size for text labels, in points.
pub const TEXT_FONT_SIZE: f32 = 14.0;

// Per-glyph advance estimate used for a label's bounds before its first
// layout; replaced by the measured galley size on the next paint.
const APPROX_GLYPH_ADVANCE: f32 = 0.55 * TEXT_FONT_SIZE;
const APPROX_LINE_HEIGHT: f32 = 1.25 * TEXT_FONT_SIZE;

/// Identifier assigned by the surface when a primitive is created.
/// Monotonic, never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(u64);

/// A single renderable item on the surface.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// One freehand line segment. Strokes are built incrementally as the
    /// pointer moves, so a full stroke is just a run of segments sharing
    /// color and width.
    Segment {
        from: Pos2,
        to: Pos2,
        color: Color32,
        width: f32,
    },
    /// A single-line text label anchored at its top-left corner.
    Text {
        pos: Pos2,
        text: String,
        color: Color32,
        size: Vec2,
    },
}

impl Primitive {
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Self::Segment { from, to, .. } => {
                *from += delta;
                *to += delta;
            }
            Self::Text { pos, .. } => *pos += delta,
        }
    }

    /// Squared distance from `point` to this primitive, used for
    /// closest-match hit-testing.
    fn distance_sq(&self, point: Pos2) -> f32 {
        match self {
            Self::Segment { from, to, .. } => segment_distance_sq(point, *from, *to),
            Self::Text { pos, size, .. } => {
                let rect = egui::Rect::from_min_size(*pos, *size);
                rect.distance_sq_to_pos(point)
            }
        }
    }
}

fn segment_distance_sq(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return a.distance_sq(point);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t).distance_sq(point)
}

/// Retained drawing surface: an ordered store of primitives, painted in
/// creation order. The surface itself does not know which primitives are
/// annotations; that distinction lives in [`crate::Whiteboard`].
#[derive(Debug, Default)]
pub struct Surface {
    primitives: Vec<(PrimitiveId, Primitive)>,
    next_id: u64,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn draw_line(&mut self, from: Pos2, to: Pos2, color: Color32, width: f32) -> PrimitiveId {
        let id = self.alloc_id();
        self.primitives.push((
            id,
            Primitive::Segment {
                from,
                to,
                color,
                width,
            },
        ));
        id
    }

    pub fn create_text(&mut self, pos: Pos2, text: String, color: Color32) -> PrimitiveId {
        let size = Vec2::new(
            APPROX_GLYPH_ADVANCE * text.chars().count() as f32,
            APPROX_LINE_HEIGHT,
        );
        let id = self.alloc_id();
        self.primitives.push((
            id,
            Primitive::Text {
                pos,
                text,
                color,
                size,
            },
        ));
        id
    }

    /// Find the primitive closest to `point`, regardless of how far away it
    /// is. A non-empty surface always yields a hit; ties go to the topmost
    /// (most recently created) primitive.
    pub fn find_closest(&self, point: Pos2) -> Option<PrimitiveId> {
        let mut best: Option<(PrimitiveId, f32)> = None;
        for (id, primitive) in &self.primitives {
            let dist = primitive.distance_sq(point);
            if best.map_or(true, |(_, d)| dist <= d) {
                best = Some((*id, dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Translate a primitive by `delta`. Unknown ids are ignored.
    pub fn translate(&mut self, id: PrimitiveId, delta: Vec2) {
        if let Some((_, primitive)) = self.primitives.iter_mut().find(|(pid, _)| *pid == id) {
            primitive.translate(delta);
        } else {
            log::warn!("translate: no primitive with id {id:?}");
        }
    }

    /// Record the laid-out size of a text label so hit-testing tracks what
    /// is actually on screen.
    pub fn set_text_size(&mut self, id: PrimitiveId, measured: Vec2) {
        if let Some((_, Primitive::Text { size, .. })) =
            self.primitives.iter_mut().find(|(pid, _)| *pid == id)
        {
            *size = measured;
        }
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, primitive)| primitive)
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives in creation (paint) order.
    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> {
        self.primitives.iter().map(|(id, primitive)| (*id, primitive))
    }
}
