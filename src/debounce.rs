use gloo_timers::callback::Timeout;

// Each trigger drops, and so cancels, the previous timer.
pub struct Debouncer {
    delay_ms: u32,
    pending: Option<Timeout>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms, pending: None }
    }

    pub fn trigger<F: FnOnce() + 'static>(&mut self, f: F) {
        self.pending = Some(Timeout::new(self.delay_ms, f));
    }

    pub fn cancel(&mut self) {
        // dropping a Timeout clears it
        self.pending = None;
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn burst_fires_once_after_quiet_window() {
        let fired = Rc::new(Cell::new(0));
        let mut debouncer = Debouncer::new(120);

        let f = fired.clone();
        debouncer.trigger(move || f.set(f.get() + 1));
        TimeoutFuture::new(50).await;
        let f = fired.clone();
        debouncer.trigger(move || f.set(f.get() + 1));

        // 120ms after the first call, but only 70ms after the second
        TimeoutFuture::new(70).await;
        assert_eq!(fired.get(), 0);

        TimeoutFuture::new(150).await;
        assert_eq!(fired.get(), 1);
    }

    #[wasm_bindgen_test]
    async fn cancel_drops_pending_call() {
        let fired = Rc::new(Cell::new(false));
        let mut debouncer = Debouncer::new(20);
        let f = fired.clone();
        debouncer.trigger(move || f.set(true));
        debouncer.cancel();
        TimeoutFuture::new(60).await;
        assert!(!fired.get());
    }
}
