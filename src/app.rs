use std::cell::RefCell;
use std::rc::{Rc, Weak};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use crate::config::StarfieldConfig;
use crate::constants::SETUP_DELAY_MS;
use crate::starfield::{self, SetupOutcome, SharedStarfield};

#[derive(Default)]
struct Backdrop {
    // delayed setup, cancelled by dropping it
    pending: Option<Timeout>,
    starfield: Option<SharedStarfield>,
}

type SharedBackdrop = Rc<RefCell<Backdrop>>;

fn load_config() -> StarfieldConfig {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| StarfieldConfig::from_document(&d))
        .unwrap_or_default()
}

fn build(backdrop: &Weak<RefCell<Backdrop>>) {
    let Some(backdrop) = backdrop.upgrade() else { return };
    match starfield::setup(load_config()) {
        Ok(SetupOutcome::Animated(sf)) => {
            backdrop.borrow_mut().starfield = Some(sf);
        }
        Ok(SetupOutcome::Fallback) => {}
        Ok(SetupOutcome::AlreadyMounted) => {
            web_sys::console::log_1(&"starfield: already mounted".into());
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("starfield: setup failed: {}", e).into());
        }
    }
}

fn schedule_setup(backdrop: &SharedBackdrop, delay_ms: u32) {
    let weak = Rc::downgrade(backdrop);
    // The fired Timeout stays in `pending` until cleanup; dropping it then is a no-op
    let timeout = Timeout::new(delay_ms, move || build(&weak));
    backdrop.borrow_mut().pending = Some(timeout);
}

fn clean_up(backdrop: &SharedBackdrop) {
    let (pending, starfield) = {
        let mut b = backdrop.borrow_mut();
        (b.pending.take(), b.starfield.take())
    };
    drop(pending);
    if let Some(sf) = starfield {
        sf.borrow_mut().teardown();
    }
}

#[component]
pub fn App() -> impl IntoView {
    let backdrop: SharedBackdrop = Rc::new(RefCell::new(Backdrop::default()));

    let backdrop_for_mount = send_wrapper::SendWrapper::new(backdrop.clone());
    Effect::new(move |_| {
        // Give page CSS a moment to apply before measuring the document
        schedule_setup(&backdrop_for_mount, SETUP_DELAY_MS);
    });

    let backdrop_for_cleanup = send_wrapper::SendWrapper::new(backdrop);
    on_cleanup(move || clean_up(&backdrop_for_cleanup));
}
