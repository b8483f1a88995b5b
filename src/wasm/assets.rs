use js_sys::{Array, Promise};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::scene::BuildTicket;

/// Decoded inputs of one composite build.
pub struct ImagePair {
    pub background: HtmlImageElement,
    pub shadow: HtmlImageElement,
}

impl ImagePair {
    pub fn shadow_natural_size(&self) -> (f64, f64) {
        (
            self.shadow.natural_width() as f64,
            self.shadow.natural_height() as f64,
        )
    }
}

fn start_load(src: &str) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    img.set_src(src);
    Ok(img)
}

/// Resolves once both images have decoded; rejects if either fails.
pub async fn load_pair(ticket: &BuildTicket) -> Result<ImagePair, JsValue> {
    let background = start_load(&ticket.background_src)?;
    let shadow = start_load(&ticket.shadow_src)?;

    let both = Array::of2(&background.decode(), &shadow.decode());
    JsFuture::from(Promise::all(&both)).await?;

    Ok(ImagePair { background, shadow })
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use super::load_pair;
    use crate::config::SceneConfig;
    use crate::scene::{BuildTicket, SceneState};

    wasm_bindgen_test_configure!(run_in_browser);

    // 6x4 and 3x2 RGBA PNGs
    const BG_6X4: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAYAAAAECAYAAACtBE5DAAAAEklEQVR4nGMQUDD4jw0zUE8CAEuyIOl3JqpAAAAAAElFTkSuQmCC";
    const SHADOW_3X2: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAMAAAACCAYAAACddGYaAAAAEUlEQVR4nGMQUDD4D8MMyBwAYnUIO+N1X2oAAAAASUVORK5CYII=";
    const BROKEN: &str = "data:image/png;base64,AAAA";

    fn ticket(generation: u64, background: &str, shadow: &str) -> BuildTicket {
        BuildTicket {
            generation,
            index: 1,
            background_src: background.to_string(),
            shadow_src: shadow.to_string(),
        }
    }

    #[wasm_bindgen_test(async)]
    async fn both_images_decode_before_the_pair_resolves() {
        let images = load_pair(&ticket(1, BG_6X4, SHADOW_3X2))
            .await
            .expect("both images decode");

        assert_eq!(images.background.natural_width(), 6);
        assert_eq!(images.background.natural_height(), 4);
        assert_eq!(images.shadow_natural_size(), (3.0, 2.0));
    }

    #[wasm_bindgen_test(async)]
    async fn one_failed_image_rejects_the_pair() {
        assert!(load_pair(&ticket(1, BG_6X4, BROKEN)).await.is_err());
        assert!(load_pair(&ticket(1, BROKEN, SHADOW_3X2)).await.is_err());
    }

    #[wasm_bindgen_test(async)]
    async fn superseded_build_does_not_commit() {
        let mut scene = SceneState::new(SceneConfig::default());
        let stale = scene.begin_build();
        let current = scene.begin_build();

        let loaded = ticket(stale.generation, BG_6X4, SHADOW_3X2);
        let images = load_pair(&loaded).await.expect("both images decode");

        assert!(scene
            .composite_plan(&stale, images.shadow_natural_size())
            .is_none());
        assert!(!scene.commit_build(&stale));
        assert_eq!(scene.uniforms().texture_generation, None);

        assert!(scene
            .composite_plan(&current, images.shadow_natural_size())
            .is_some());
        assert!(scene.commit_build(&current));
        assert_eq!(scene.uniforms().texture_generation, Some(current.generation));
    }
}
