use glam::{IVec2, Vec2};

/// Axis-aligned integer rectangle in world units. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: IVec2, size: IVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn set_pos(&mut self, pos: IVec2) {
        self.x = pos.x;
        self.y = pos.y;
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.w, self.h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Integer centre, rounded toward the top-left.
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w.div_euclid(2), self.y + self.h.div_euclid(2))
    }

    pub fn mid_top(&self) -> IVec2 {
        IVec2::new(self.x + self.w.div_euclid(2), self.y)
    }

    pub fn mid_bottom(&self) -> IVec2 {
        IVec2::new(self.x + self.w.div_euclid(2), self.bottom())
    }

    /// Move so the bottom edge's midpoint sits on `point`.
    pub fn set_mid_bottom(&mut self, point: IVec2) {
        self.x = point.x - self.w.div_euclid(2);
        self.y = point.y - self.h;
    }

    /// Zero or negative extent on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    /// Degenerate rectangles never intersect anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Half-open point test: the left/top edges are inside, right/bottom are not.
    pub fn contains_point(&self, point: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }
        point.x >= self.x as f32
            && point.x < self.right() as f32
            && point.y >= self.y as f32
            && point.y < self.bottom() as f32
    }
}
