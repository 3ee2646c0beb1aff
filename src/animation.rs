//! Animation state the presentation layer turns into images.
//!
//! The core only decides *which* animation key and frame index to show; the
//! renderer resolves them through its own `get_frame(key, index)` lookup.

use glam::Vec2;

/// One of the eight sprite directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    Down,
    LeftDown,
    Left,
    LeftUp,
    Up,
    RightUp,
    Right,
    RightDown,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::Down,
        Facing::LeftDown,
        Facing::Left,
        Facing::LeftUp,
        Facing::Up,
        Facing::RightUp,
        Facing::Right,
        Facing::RightDown,
    ];

    /// `None` for a zero direction; callers keep their previous facing then.
    pub fn from_direction(dir: Vec2) -> Option<Facing> {
        use std::cmp::Ordering::{Greater, Less};

        let facing = match (dir.x.partial_cmp(&0.0)?, dir.y.partial_cmp(&0.0)?) {
            (Greater, Less) => Facing::RightUp,
            (Greater, Greater) => Facing::RightDown,
            (Less, Less) => Facing::LeftUp,
            (Less, Greater) => Facing::LeftDown,
            (Greater, _) => Facing::Right,
            (Less, _) => Facing::Left,
            (_, Greater) => Facing::Down,
            (_, Less) => Facing::Up,
            _ => return None,
        };
        Some(facing)
    }

    pub fn key(self) -> &'static str {
        match self {
            Facing::Down => "down",
            Facing::LeftDown => "left_down",
            Facing::Left => "left",
            Facing::LeftUp => "left_up",
            Facing::Up => "up",
            Facing::RightUp => "right_up",
            Facing::Right => "right",
            Facing::RightDown => "right_down",
        }
    }

    pub fn is_upward(self) -> bool {
        matches!(self, Facing::Up | Facing::LeftUp | Facing::RightUp)
    }

    pub fn is_leftward(self) -> bool {
        matches!(self, Facing::Left | Facing::LeftUp | Facing::LeftDown)
    }

    pub fn is_rightward(self) -> bool {
        matches!(self, Facing::Right | Facing::RightUp | Facing::RightDown)
    }
}

/// Fractional frame counter; the integer part picks the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameCursor {
    pub index: f32,
    /// Frames per second.
    pub speed: f32,
}

impl FrameCursor {
    pub fn new(speed: f32) -> Self {
        Self { index: 0.0, speed }
    }

    pub fn advance(&mut self, dt: f32) {
        self.index += self.speed * dt;
    }

    pub fn reset_to(&mut self, index: f32) {
        self.index = index;
    }

    pub fn freeze(&mut self) {
        self.speed = 0.0;
    }

    /// Frame to show out of `frame_count` frames, wrapping around.
    pub fn frame(&self, frame_count: usize) -> usize {
        if frame_count == 0 {
            return 0;
        }
        (self.index.max(0.0) as usize) % frame_count
    }
}
