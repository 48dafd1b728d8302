//! Frame scheduling port
//!
//! The engine asks for "one more frame soon" and may cancel the request.
//! When a scheduled frame comes due the host calls
//! [`crate::GameEngine::run_frame`].

/// Opaque ticket for a scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host frame scheduler plus its clock
pub trait FrameScheduler {
    /// Request a frame callback at roughly the display refresh rate
    fn schedule(&mut self) -> FrameHandle;
    /// Cancel a pending request; unknown or fired handles are ignored
    fn cancel(&mut self, handle: FrameHandle);
    /// Monotonic host time in milliseconds
    fn now_ms(&self) -> f64;
}

/// Stepped scheduler with a manual clock
///
/// Holds at most one pending frame. Nothing fires on its own: call
/// [`ManualScheduler::fire`] to consume the pending request.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: f64,
    next_id: u64,
    pending: Option<FrameHandle>,
    scheduled: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at `now_ms`
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume the pending request, if any
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Total frames ever requested
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    /// Total requests cancelled while pending
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self) -> FrameHandle {
        debug_assert!(self.pending.is_none(), "frame already in flight");
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.scheduled += 1;
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }

    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

#[cfg(target_arch = "wasm32")]
mod raf {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::{FrameHandle, FrameScheduler};

    type FrameCallback = Rc<dyn Fn()>;

    /// `requestAnimationFrame` scheduler
    ///
    /// The host installs the frame callback after the engine exists, since
    /// the callback needs a handle back to the engine.
    #[derive(Default, Clone)]
    pub struct RafScheduler {
        callback: Rc<RefCell<Option<FrameCallback>>>,
    }

    impl RafScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_frame_callback(&self, callback: impl Fn() + 'static) {
            *self.callback.borrow_mut() = Some(Rc::new(callback));
        }
    }

    impl FrameScheduler for RafScheduler {
        fn schedule(&mut self) -> FrameHandle {
            let Some(window) = web_sys::window() else {
                log::warn!("No window; frame not scheduled");
                return FrameHandle(0);
            };
            let slot = self.callback.clone();
            // Freed by the JS side once invoked
            let closure = Closure::once_into_js(move |_time: f64| {
                let callback = slot.borrow().clone();
                if let Some(callback) = callback {
                    callback();
                }
            });
            let id = window
                .request_animation_frame(closure.unchecked_ref())
                .unwrap_or_else(|e| {
                    log::warn!("requestAnimationFrame failed: {:?}", e);
                    0
                });
            FrameHandle(id as u64)
        }

        fn cancel(&mut self, handle: FrameHandle) {
            if handle.0 == 0 {
                return;
            }
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle.0 as i32);
            }
        }

        fn now_ms(&self) -> f64 {
            web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or_else(js_sys::Date::now)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use raf::RafScheduler;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_fire() {
        let mut s = ManualScheduler::starting_at(100.0);
        let h = s.schedule();
        assert_eq!(s.pending(), Some(h));
        assert_eq!(s.fire(), Some(h));
        assert_eq!(s.fire(), None);
        assert_eq!(s.now_ms(), 100.0);
        s.advance(16.0);
        assert_eq!(s.now_ms(), 116.0);
    }

    #[test]
    fn test_cancel_only_pending() {
        let mut s = ManualScheduler::new();
        let first = s.schedule();
        s.cancel(first);
        assert_eq!(s.pending(), None);
        assert_eq!(s.cancelled_count(), 1);

        let second = s.schedule();
        s.cancel(first);
        assert_eq!(s.pending(), Some(second));
        assert_eq!(s.cancelled_count(), 1);
        assert_eq!(s.scheduled_count(), 2);
    }
}
