use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, HtmlImageElement, PointerEvent,
    Window,
};

use super::assets::{self, ImagePair};
use super::composite::CompositeSurface;
use super::frame::animation_loop;
use super::render::Renderer;
use crate::config::{DesignResolution, SceneConfig};
use crate::error::{SceneError, SceneResult};
use crate::scene::{BuildTicket, SceneState};

/// Page-level controller. Owns the scene state and every browser handle.
struct App {
    window: Window,
    container: HtmlElement,
    person: HtmlImageElement,
    state: RefCell<SceneState>,
    renderer: Renderer,
    surface: CompositeSurface,
}

fn element<T: JsCast>(document: &Document, id: &str, what: &'static str) -> SceneResult<T> {
    document
        .get_element_by_id(id)
        .ok_or(SceneError::MissingElement(what))?
        .dyn_into::<T>()
        .map_err(|_| SceneError::MissingElement(what))
}

/// Defaults plus the asset directory from `data-assets`, and the design
/// resolution override from `data-design-width` / `data-design-height`.
fn read_config(container: &HtmlElement) -> (SceneConfig, Option<DesignResolution>) {
    let data = container.dataset();
    let mut config = SceneConfig::default();
    if let Some(dir) = data.get("assets") {
        config = config.with_asset_dir(dir);
    }

    let width = data.get("designWidth");
    let height = data.get("designHeight");
    let design = match DesignResolution::parse_override(width.as_deref(), height.as_deref()) {
        Ok(design) => design,
        Err(reason) => {
            log::warn!("ignoring design resolution override: {reason}");
            None
        }
    };
    (config, design)
}

fn now_seconds(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0) * 0.001
}

fn viewport_size(window: &Window) -> SceneResult<(f64, f64)> {
    let w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let h = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((w, h))
}

fn set_px(el: &HtmlElement, prop: &str, value: f64) -> SceneResult<()> {
    el.style().set_property(prop, &format!("{value}px"))?;
    Ok(())
}

impl App {
    /// Recompute layout for the current viewport and push it into the DOM.
    fn apply_layout(&self) -> SceneResult<()> {
        let (w, h) = viewport_size(&self.window)?;
        let mut state = self.state.borrow_mut();
        state.resize(w, h);

        let design = state.config().design;
        let fit = state.fit();
        let style = self.container.style();
        style.set_property("transform", &format!("scale({})", fit.scale))?;
        set_px(&self.container, "width", design.width)?;
        set_px(&self.container, "height", design.height)?;
        set_px(&self.container, "left", fit.left)?;
        set_px(&self.container, "top", fit.top)?;

        let character = state.character();
        set_px(&self.person, "width", character.width)?;
        set_px(&self.person, "left", character.x)?;
        set_px(&self.person, "top", character.y)?;

        self.renderer.set_size(design.width.round() as u32, design.height.round() as u32);
        Ok(())
    }

    /// Layout change plus a fresh composite.
    fn refresh(self: &Rc<Self>) {
        if let Err(e) = self.apply_layout() {
            log::error!("layout failed: {e}");
        }
        self.rebuild_composite();
    }

    fn rebuild_composite(self: &Rc<Self>) {
        let ticket = self.state.borrow_mut().begin_build();
        let app = Rc::clone(self);
        spawn_local(async move {
            match assets::load_pair(&ticket).await {
                Ok(images) => {
                    if let Err(e) = app.finish_build(&ticket, &images) {
                        log::error!("composite {} failed: {e}", ticket.index);
                    }
                }
                // previous texture stays on screen
                Err(e) => log::warn!(
                    "composite {} stalled, image load failed: {:?}",
                    ticket.index,
                    e
                ),
            }
        });
    }

    fn finish_build(&self, ticket: &BuildTicket, images: &ImagePair) -> SceneResult<()> {
        let plan = match self
            .state
            .borrow()
            .composite_plan(ticket, images.shadow_natural_size())
        {
            Some(plan) => plan,
            None => {
                log::debug!("dropping stale composite generation {}", ticket.generation);
                return Ok(());
            }
        };

        self.surface.draw(&plan, images)?;
        self.renderer.upload(self.surface.canvas())?;
        self.state.borrow_mut().commit_build(ticket);
        log::info!(
            "composite {} committed (generation {})",
            ticket.index,
            ticket.generation
        );
        Ok(())
    }

    fn on_click(self: &Rc<Self>) {
        let src = {
            let mut state = self.state.borrow_mut();
            state.cycle_index();
            state.person_src()
        };
        self.person.set_src(&src);
        self.rebuild_composite();
    }

    fn on_person_loaded(self: &Rc<Self>) {
        let (w, h) = (
            self.person.natural_width() as f64,
            self.person.natural_height() as f64,
        );
        self.state.borrow_mut().set_character_natural_size(w, h);
        self.refresh();
    }

    fn on_pointer_move(&self, event: &PointerEvent) {
        let now = now_seconds(&self.window);
        self.state
            .borrow_mut()
            .pointer_moved(event.client_x() as f64, event.client_y() as f64, now);
    }

    fn render_frame(&self, timestamp: f64) {
        let mut state = self.state.borrow_mut();
        state.advance_time(timestamp * 0.001);
        self.renderer.draw(state.uniforms());
    }

    fn bob_frame(&self) {
        let top = self.state.borrow_mut().tick_bob();
        if let Err(e) = set_px(&self.person, "top", top) {
            log::error!("bob update failed: {e}");
        }
    }
}

fn listen(target: &EventTarget, kind: &str, handler: Box<dyn FnMut(Event)>) -> SceneResult<()> {
    let closure = Closure::wrap(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn start() -> SceneResult<()> {
    let window = web_sys::window().ok_or(SceneError::NoWindow)?;
    let document = window.document().ok_or(SceneError::MissingElement("document"))?;

    let defaults = SceneConfig::default();
    let container: HtmlElement = element(&document, &defaults.container_id, "container")?;
    let (config, design_override) = read_config(&container);
    let canvas: HtmlCanvasElement = element(&document, &config.canvas_id, "canvas")?;
    let person: HtmlImageElement = element(&document, &config.person_id, "person")?;

    let mut state = SceneState::new(config);
    if let Some(design) = design_override {
        state.set_design_resolution(design.width, design.height);
    }

    let design = state.config().design;
    let (width, height) = (design.width.round() as u32, design.height.round() as u32);
    let renderer = Renderer::new(canvas, width, height)?;
    let surface = CompositeSurface::new(&document, width, height)?;

    let app = Rc::new(App {
        window: window.clone(),
        container,
        person,
        state: RefCell::new(state),
        renderer,
        surface,
    });

    {
        let app = Rc::clone(&app);
        listen(&window, "resize", Box::new(move |_: Event| app.refresh()))?;
    }
    let dpr_query = format!("(resolution: {}dppx)", window.device_pixel_ratio());
    if let Some(mql) = window.match_media(&dpr_query)? {
        let app = Rc::clone(&app);
        listen(&mql, "change", Box::new(move |_: Event| app.refresh()))?;
    }
    {
        let app_click = Rc::clone(&app);
        listen(&app.person, "click", Box::new(move |_: Event| app_click.on_click()))?;
        let app_load = Rc::clone(&app);
        listen(&app.person, "load", Box::new(move |_: Event| app_load.on_person_loaded()))?;
    }
    {
        let app = Rc::clone(&app);
        listen(
            &window,
            "pointermove",
            Box::new(move |event: Event| {
                if let Some(event) = event.dyn_ref::<PointerEvent>() {
                    app.on_pointer_move(event);
                }
            }),
        )?;
    }

    let src = app.state.borrow().person_src();
    app.person.set_src(&src);
    app.refresh();

    {
        let app = Rc::clone(&app);
        animation_loop(move |timestamp| app.render_frame(timestamp))?;
    }
    {
        let app = Rc::clone(&app);
        animation_loop(move |_| app.bob_frame())?;
    }

    log::info!("scene ready at {}x{}", width, height);
    Ok(())
}
