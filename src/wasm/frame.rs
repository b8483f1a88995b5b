use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::window;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Call `tick` with the frame timestamp (ms) on every animation frame.
///
/// The slot holds the animation-frame closure so it can re-request itself.
/// Storing it inside an `Option` allows us to create the `Closure` first and
/// then obtain a reference to it from within itself. The loop never stops, so
/// the resulting `Rc` cycle is intentional.
pub fn animation_loop<F>(mut tick: F) -> Result<(), JsValue>
where
    F: FnMut(f64) + 'static,
{
    let f: FrameSlot = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        tick(timestamp);

        // schedule next
        if let Err(e) = request_frame(&f) {
            log::error!("request_animation_frame failed: {:?}", e);
        }
    }) as Box<dyn FnMut(f64)>));

    request_frame(&g)
}

fn request_frame(slot: &FrameSlot) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    if let Some(closure) = slot.borrow().as_ref() {
        window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    }
    Ok(())
}
