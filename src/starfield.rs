use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, Window};
use crate::config::StarfieldConfig;
use crate::debounce::Debouncer;
use crate::error::{Result, StarfieldError};
use crate::field::StarField;
use crate::frame_loop::{FrameHost, FrameLoop};
use crate::rng::Xorshift64;
use crate::surface::{self, CanvasSurface, Mounted};

pub type SharedStarfield = Rc<RefCell<Starfield>>;

pub enum SetupOutcome {
    Animated(SharedStarfield),
    Fallback,
    AlreadyMounted,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

// requestAnimationFrame, re-armed with the same closure every frame
struct RafHost {
    window: Window,
    callback: FrameCallback,
}

impl FrameHost for RafHost {
    fn request_frame(&mut self) -> Option<i32> {
        let callback = self.callback.borrow();
        let callback = callback.as_ref()?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
    }
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

pub struct Starfield {
    window: Window,
    document: Document,
    surface: CanvasSurface,
    config: StarfieldConfig,
    rng: Xorshift64,
    field: StarField,
    frames: FrameLoop,
    host: RafHost,
    resize_debounce: Debouncer,
    listeners: Vec<Listener>,
    // bumped every time the star set is rebuilt
    generation: u32,
}

/// Insert the backdrop and start animating. A no-op if `#starfield` already exists.
pub fn setup(config: StarfieldConfig) -> Result<SetupOutcome> {
    config.validate()?;
    let window = web_sys::window().ok_or(StarfieldError::MissingGlobal("window"))?;
    let document = window.document().ok_or(StarfieldError::MissingGlobal("document"))?;
    let mounted = surface::mount(&document)?;
    animate(config, window, document, mounted)
}

fn animate(config: StarfieldConfig, window: Window, document: Document, mounted: Mounted) -> Result<SetupOutcome> {
    let mut surface = match mounted {
        Mounted::Canvas(surface) => surface,
        Mounted::Fallback => {
            web_sys::console::warn_1(&"starfield: 2D canvas unavailable, using static fallback".into());
            return Ok(SetupOutcome::Fallback);
        }
        Mounted::AlreadyPresent => return Ok(SetupOutcome::AlreadyMounted),
    };

    let mut rng = match config.seed {
        Some(seed) => Xorshift64::new(seed),
        None => Xorshift64::from_js_entropy(),
    };
    let (w, h) = surface::page_size(&window, &document);
    if let Err(e) = surface.resize(w, h, surface::device_pixel_ratio(&window)) {
        surface.remove();
        return Err(e);
    }
    let field = StarField::generate(w, h, &config, &mut rng);

    let starfield = Rc::new(RefCell::new(Starfield {
        host: RafHost { window: window.clone(), callback: Rc::new(RefCell::new(None)) },
        resize_debounce: Debouncer::new(config.resize_debounce_ms),
        window,
        document,
        surface,
        config,
        rng,
        field,
        frames: FrameLoop::new(),
        listeners: Vec::new(),
        generation: 0,
    }));

    let weak = Rc::downgrade(&starfield);
    let on_frame = Closure::wrap(Box::new(move |timestamp: f64| {
        if let Some(starfield) = weak.upgrade() {
            starfield.borrow_mut().on_frame(timestamp);
        }
    }) as Box<dyn FnMut(f64)>);
    let callback = starfield.borrow().host.callback.clone();
    *callback.borrow_mut() = Some(on_frame);

    if let Err(e) = attach_listeners(&starfield) {
        starfield.borrow_mut().teardown();
        return Err(e);
    }

    {
        let mut s = starfield.borrow_mut();
        s.start();
        web_sys::console::log_1(&format!("starfield: {} stars", s.star_count()).into());
    }
    Ok(SetupOutcome::Animated(starfield))
}

fn attach_listeners(starfield: &SharedStarfield) -> Result<()> {
    let weak = Rc::downgrade(starfield);
    let on_resize = Closure::wrap(Box::new(move |_: Event| {
        let Some(starfield) = weak.upgrade() else { return };
        let later = Rc::downgrade(&starfield);
        starfield.borrow_mut().resize_debounce.trigger(move || {
            if let Some(starfield) = later.upgrade() {
                if let Err(e) = starfield.borrow_mut().resize() {
                    web_sys::console::warn_1(&format!("starfield: resize failed: {}", e).into());
                }
            }
        });
    }) as Box<dyn FnMut(Event)>);

    let weak = Rc::downgrade(starfield);
    let on_visibility = Closure::wrap(Box::new(move |_: Event| {
        if let Some(starfield) = weak.upgrade() {
            let mut s = starfield.borrow_mut();
            let visible = !s.document.hidden();
            s.set_visible(visible);
        }
    }) as Box<dyn FnMut(Event)>);

    let mut s = starfield.borrow_mut();
    let window: EventTarget = s.window.clone().into();
    let document: EventTarget = s.document.clone().into();
    s.listen(window, "resize", on_resize)?;
    s.listen(document, "visibilitychange", on_visibility)?;
    Ok(())
}

impl Starfield {
    fn listen(&mut self, target: EventTarget, event: &'static str, closure: Closure<dyn FnMut(Event)>) -> Result<()> {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.push(Listener { target, event, closure });
        Ok(())
    }

    fn now(&self) -> f64 {
        self.window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    pub fn star_count(&self) -> usize {
        self.field.len()
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    pub fn is_scheduled(&self) -> bool {
        self.frames.is_scheduled()
    }

    pub fn start(&mut self) {
        let now = self.now();
        self.frames.start(now, &mut self.host);
    }

    pub fn stop(&mut self) {
        self.frames.stop(&mut self.host);
    }

    pub fn set_visible(&mut self, visible: bool) {
        let now = self.now();
        self.frames.set_visible(visible, now, &mut self.host);
    }

    pub fn resize(&mut self) -> Result<()> {
        let (w, h) = surface::page_size(&self.window, &self.document);
        let dpr = surface::device_pixel_ratio(&self.window);
        self.surface.resize(w, h, dpr)?;
        self.field = StarField::generate(w, h, &self.config, &mut self.rng);
        self.generation += 1;
        let (fw, fh) = self.field.size();
        web_sys::console::log_1(
            &format!("starfield: star set #{} for {}x{}, {} stars", self.generation, fw, fh, self.field.len()).into(),
        );
        Ok(())
    }

    fn on_frame(&mut self, timestamp: f64) {
        if let Some(dt) = self.frames.begin_frame(timestamp) {
            self.field.tick(dt, &mut self.surface);
            self.frames.end_frame(&mut self.host);
        }
    }

    pub fn teardown(&mut self) {
        self.stop();
        self.resize_debounce.cancel();
        for listener in self.listeners.drain(..) {
            let _ = listener
                .target
                .remove_event_listener_with_callback(listener.event, listener.closure.as_ref().unchecked_ref());
        }
        self.host.callback.borrow_mut().take();
        self.surface.remove();
    }
}
