//! What goes onto the offscreen canvas before it becomes `uTexture`.
//!
//! The plan is pure geometry; the browser side only replays it onto a 2D
//! context once both images have decoded.

use crate::config::DesignResolution;
use crate::layout::{shadow_rect, PosterGeometry, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositePlan {
    /// Whole surface, cleared to transparent first.
    pub surface: Rect,
    pub background: Rect,
    pub shadow: Rect,
}

impl CompositePlan {
    pub fn new(
        design: DesignResolution,
        poster: &PosterGeometry,
        character: &Rect,
        shadow_natural: (f64, f64),
    ) -> Self {
        Self {
            surface: Rect::new(0.0, 0.0, design.width, design.height),
            background: *poster,
            shadow: shadow_rect(character, shadow_natural.0, shadow_natural.1),
        }
    }

    /// Drawing buffer size in whole pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        (
            self.surface.width.round() as u32,
            self.surface.height.round() as u32,
        )
    }
}
