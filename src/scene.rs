//! Single owner of all mutable scene state.
//!
//! Every event handler and frame callback goes through one `SceneState`;
//! nothing here is shared across threads.

use crate::composite::CompositePlan;
use crate::config::{AssetKind, SceneConfig};
use crate::displacement::ShaderUniformState;
use crate::layout::{character_rect, Bob, PosterGeometry, Rect, ViewportFit};
use crate::ripple::{RippleBuffer, RippleImpulse};

/// Handed out when a composite build starts. Only the ticket matching the
/// latest generation may commit its texture.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildTicket {
    pub generation: u64,
    pub index: u32,
    pub background_src: String,
    pub shadow_src: String,
}

#[derive(Debug, Clone)]
pub struct SceneState {
    config: SceneConfig,
    index: u32,
    viewport: (f64, f64),
    fit: ViewportFit,
    poster: PosterGeometry,
    character: Rect,
    character_natural: (f64, f64),
    bob: Bob,
    ripples: RippleBuffer,
    uniforms: ShaderUniformState,
    generation: u64,
}

impl SceneState {
    pub fn new(config: SceneConfig) -> Self {
        let design = config.design;
        let poster = Rect::poster(design);
        Self {
            index: 1,
            viewport: (design.width, design.height),
            fit: ViewportFit::default(),
            poster,
            character: character_rect(&poster, 0.0, 0.0),
            character_natural: (0.0, 0.0),
            bob: Bob::default(),
            ripples: RippleBuffer::new(),
            uniforms: ShaderUniformState::new(design.width as f32, design.height as f32),
            generation: 0,
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn fit(&self) -> ViewportFit {
        self.fit
    }

    pub fn poster(&self) -> PosterGeometry {
        self.poster
    }

    /// Character rectangle at rest, without the bob offset.
    pub fn character(&self) -> Rect {
        self.character
    }

    pub fn ripples(&self) -> &RippleBuffer {
        &self.ripples
    }

    pub fn uniforms(&self) -> &ShaderUniformState {
        &self.uniforms
    }

    pub fn person_src(&self) -> String {
        self.config.asset_path(AssetKind::Person, self.index)
    }

    fn relayout(&mut self) {
        let design = self.config.design;
        self.fit = ViewportFit::compute(self.viewport.0, self.viewport.1, design);
        self.poster = Rect::poster(design);
        self.character = character_rect(
            &self.poster,
            self.character_natural.0,
            self.character_natural.1,
        );
        self.uniforms.resolution = [design.width as f32, design.height as f32];
    }

    /// Viewport size or device pixel ratio changed.
    pub fn resize(&mut self, viewport_w: f64, viewport_h: f64) {
        self.viewport = (viewport_w, viewport_h);
        self.relayout();
    }

    /// Replace the design resolution (page `data-design-*` override). The
    /// `uResolution` uniform follows it.
    pub fn set_design_resolution(&mut self, width: f64, height: f64) {
        self.config = self.config.clone().with_design_resolution(width, height);
        self.relayout();
    }

    /// The character image finished loading; its aspect drives its height.
    pub fn set_character_natural_size(&mut self, width: f64, height: f64) {
        self.character_natural = (width, height);
        self.relayout();
    }

    /// Advance to the next image set, wrapping after `max_index`.
    pub fn cycle_index(&mut self) -> u32 {
        self.index = (self.index % self.config.max_index) + 1;
        self.index
    }

    /// Record a pointer move at `now` seconds on the render clock.
    pub fn pointer_moved(&mut self, client_x: f64, client_y: f64, now: f64) -> RippleImpulse {
        let (nx, ny) = self
            .fit
            .normalize_pointer(client_x, client_y, self.config.design);
        self.ripples.push(nx as f32, ny as f32, now as f32);
        self.uniforms.ripples = self.ripples.snapshot();
        RippleImpulse::new(nx as f32, ny as f32, now as f32)
    }

    pub fn advance_time(&mut self, now: f64) {
        self.uniforms.time = now as f32;
    }

    /// One bob step; returns the character's new top in design pixels.
    pub fn tick_bob(&mut self) -> f64 {
        self.character.y + self.bob.tick()
    }

    /// Start a composite build for the current index and layout. Any build
    /// started earlier becomes stale.
    pub fn begin_build(&mut self) -> BuildTicket {
        self.generation += 1;
        BuildTicket {
            generation: self.generation,
            index: self.index,
            background_src: self.config.asset_path(AssetKind::Background, self.index),
            shadow_src: self.config.asset_path(AssetKind::Shadow, self.index),
        }
    }

    pub fn is_current(&self, ticket: &BuildTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Layout for a finished build, or `None` if a newer one superseded it.
    pub fn composite_plan(
        &self,
        ticket: &BuildTicket,
        shadow_natural: (f64, f64),
    ) -> Option<CompositePlan> {
        self.is_current(ticket).then(|| {
            CompositePlan::new(self.config.design, &self.poster, &self.character, shadow_natural)
        })
    }

    /// Mark the ticket's texture as bound. Returns false for stale tickets.
    pub fn commit_build(&mut self, ticket: &BuildTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.uniforms.texture_generation = Some(ticket.generation);
        true
    }
}
