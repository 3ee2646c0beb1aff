//! Axis-aligned float rectangles.
//!
//! Positions are continuous world units with y growing downward, matching the
//! screen the presentation layer draws to.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn set_left(&mut self, v: f32) {
        self.x = v;
    }

    pub fn set_right(&mut self, v: f32) {
        self.x = v - self.w;
    }

    pub fn set_top(&mut self, v: f32) {
        self.y = v;
    }

    pub fn set_bottom(&mut self, v: f32) {
        self.y = v - self.h;
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_center(&mut self, c: Vec2) {
        self.x = c.x - self.w / 2.0;
        self.y = c.y - self.h / 2.0;
    }

    /// Grow (or shrink, with negative amounts) around the centre.
    pub fn inflate(&self, dw: f32, dh: f32) -> Self {
        Self::from_center(self.center(), Vec2::new(self.w + dw, self.h + dh))
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Self {
        let x = self.left().min(other.left());
        let y = self.top().min(other.top());
        let r = self.right().max(other.right());
        let b = self.bottom().max(other.bottom());
        Self::new(x, y, r - x, b - y)
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
