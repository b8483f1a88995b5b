use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::assets::ImagePair;
use crate::composite::CompositePlan;
use crate::error::{SceneError, SceneResult};

/// Offscreen 2D canvas the composite is drawn into before upload.
pub struct CompositeSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CompositeSurface {
    pub fn new(document: &Document, width: u32, height: u32) -> SceneResult<Self> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SceneError::NoContext("2d"))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")?
            .ok_or(SceneError::NoContext("2d"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SceneError::NoContext("2d"))?;

        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Redraw the whole surface from `plan`.
    pub fn draw(&self, plan: &CompositePlan, images: &ImagePair) -> SceneResult<()> {
        let (width, height) = plan.surface_size();
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }

        let s = plan.surface;
        self.ctx.clear_rect(s.x, s.y, s.width, s.height);

        let bg = plan.background;
        self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &images.background,
            bg.x,
            bg.y,
            bg.width,
            bg.height,
        )?;

        let sh = plan.shadow;
        self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &images.shadow,
            sh.x,
            sh.y,
            sh.width,
            sh.height,
        )?;
        Ok(())
    }
}
