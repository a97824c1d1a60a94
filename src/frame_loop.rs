pub trait FrameHost {
    // None if the host refused
    fn request_frame(&mut self) -> Option<i32>;
    fn cancel_frame(&mut self, handle: i32);
}

// At most one frame is ever pending. A frame that fires after `stop` draws
// nothing and schedules nothing.
#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    pending: Option<i32>,
    last_time: f64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn start(&mut self, now: f64, host: &mut impl FrameHost) {
        self.running = true;
        if self.pending.is_none() {
            self.last_time = now;
            self.pending = host.request_frame();
        }
    }

    pub fn stop(&mut self, host: &mut impl FrameHost) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
    }

    // Elapsed ms to tick with, or None once stopped
    pub fn begin_frame(&mut self, timestamp: f64) -> Option<f64> {
        self.pending = None;
        if !self.running {
            return None;
        }
        // a clock stepping backwards never yields negative time
        let dt = (timestamp - self.last_time).max(0.0);
        self.last_time = timestamp;
        Some(dt)
    }

    pub fn end_frame(&mut self, host: &mut impl FrameHost) {
        if self.running && self.pending.is_none() {
            self.pending = host.request_frame();
        }
    }

    // hidden → stop, visible → start
    pub fn set_visible(&mut self, visible: bool, now: f64, host: &mut impl FrameHost) {
        if visible {
            self.start(now, host);
        } else {
            self.stop(host);
        }
    }
}
