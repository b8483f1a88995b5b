//! Poster scene with a pointer-driven water ripple.
//!
//! The crate root holds the platform-independent pieces (ripple history,
//! displacement math, layout, scene state); the browser glue lives in the
//! wasm-only `wasm` module.

pub mod composite;
pub mod config;
pub mod displacement;
pub mod error;
pub mod layout;
pub mod ripple;
pub mod scene;

pub use config::{AssetKind, DesignResolution, SceneConfig};
pub use error::{SceneError, SceneResult};
pub use ripple::{RippleBuffer, RippleImpulse, RippleSnapshot, MAX_RIPPLES};
pub use scene::{BuildTicket, SceneState};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod app;
    mod assets;
    mod composite;
    mod frame;
    mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("ripple poster starting");

        app::start()?;
        Ok(())
    }
}
