//! Design-resolution layout: where the poster, character and shadow sit, and
//! how the design canvas is fitted into the live viewport.

use crate::config::DesignResolution;

/// Fraction of the design width the poster spans.
pub const POSTER_SCALE: f64 = 0.6;
/// Poster height over width.
pub const POSTER_ASPECT: f64 = 297.0 / 420.0;
/// Character width as a fraction of the poster width.
pub const CHARACTER_SCALE: f64 = 0.3;

// Shadow offsets relative to the rendered shadow width. At 2560x1440 the
// shadow is 460.8 px wide, which puts it 50 px left of and 100 px below
// the character.
pub const SHADOW_OFFSET_X: f64 = -50.0 / 460.8;
pub const SHADOW_OFFSET_Y: f64 = 100.0 / 460.8;

pub const BOB_STEP: f64 = 0.15;
pub const BOB_RANGE: f64 = 20.0;

/// Axis-aligned rectangle in design pixels, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub type PosterGeometry = Rect;

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Poster bounds, centred on the design canvas.
    pub fn poster(design: DesignResolution) -> PosterGeometry {
        let width = design.width * POSTER_SCALE;
        let height = width * POSTER_ASPECT;
        Rect::new(
            (design.width - width) / 2.0,
            (design.height - height) / 2.0,
            width,
            height,
        )
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Height for `width` given an image's natural size; zero until the image
/// has dimensions.
fn height_for_width(width: f64, natural_w: f64, natural_h: f64) -> f64 {
    if natural_w > 0.0 && natural_h > 0.0 {
        width * natural_h / natural_w
    } else {
        0.0
    }
}

/// Character rectangle centred on the poster at rest (before bobbing).
pub fn character_rect(poster: &PosterGeometry, natural_w: f64, natural_h: f64) -> Rect {
    let width = poster.width * CHARACTER_SCALE;
    let height = height_for_width(width, natural_w, natural_h);
    Rect::new(
        poster.x + (poster.width - width) / 2.0,
        poster.y + (poster.height - height) / 2.0,
        width,
        height,
    )
}

/// Drop shadow under the character, as wide as the character.
pub fn shadow_rect(character: &Rect, natural_w: f64, natural_h: f64) -> Rect {
    let width = character.width;
    Rect::new(
        character.x + SHADOW_OFFSET_X * width,
        character.y + SHADOW_OFFSET_Y * width,
        width,
        height_for_width(width, natural_w, natural_h),
    )
}

/// Uniform scale and centring offset of the design canvas in the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFit {
    pub scale: f64,
    pub left: f64,
    pub top: f64,
}

impl Default for ViewportFit {
    fn default() -> Self {
        Self {
            scale: 1.0,
            left: 0.0,
            top: 0.0,
        }
    }
}

impl ViewportFit {
    pub fn compute(viewport_w: f64, viewport_h: f64, design: DesignResolution) -> Self {
        let scale = (viewport_w / design.width).min(viewport_h / design.height);
        Self {
            scale,
            left: (viewport_w - design.width * scale) / 2.0,
            top: (viewport_h - design.height * scale) / 2.0,
        }
    }

    /// Client coordinates to normalized design coordinates, origin bottom-left.
    pub fn normalize_pointer(
        &self,
        client_x: f64,
        client_y: f64,
        design: DesignResolution,
    ) -> (f64, f64) {
        let dx = (client_x - self.left) / self.scale;
        let dy = (client_y - self.top) / self.scale;
        (dx / design.width, 1.0 - dy / design.height)
    }
}

/// Vertical bobbing of the character, one step per animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bob {
    offset: f64,
    dir: f64,
}

impl Default for Bob {
    fn default() -> Self {
        Self {
            offset: 0.0,
            dir: 1.0,
        }
    }
}

impl Bob {
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn tick(&mut self) -> f64 {
        self.offset += self.dir * BOB_STEP;
        if self.offset > BOB_RANGE || self.offset < 0.0 {
            self.dir = -self.dir;
        }
        self.offset
    }
}
