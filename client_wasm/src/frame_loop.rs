//! Cancellable repeating frame task
//!
//! Each display refresh fires at most one pending request. The callback calls
//! `fired()` first and `arm()` again at the end, so the loop keeps itself
//! going until `cancel()` is called. After that nothing is ever scheduled
//! again.

/// Source of display-refresh callbacks
pub trait FrameScheduler {
    /// Schedule the next callback, returning its handle
    fn request(&mut self) -> Result<i32, String>;
    fn cancel(&mut self, handle: i32);
}

pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<i32>,
    cancelled: bool,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            cancelled: false,
        }
    }

    /// Request the next frame. No-op if one is already pending or the loop was cancelled.
    pub fn arm(&mut self) -> Result<bool, String> {
        if self.cancelled || self.pending.is_some() {
            return Ok(false);
        }
        let handle = self.scheduler.request()?;
        self.pending = Some(handle);
        Ok(true)
    }

    /// Called at the top of the frame callback. Returns false if the tick must not run.
    pub fn fired(&mut self) -> bool {
        self.pending = None;
        !self.cancelled
    }

    /// Stop the loop, dropping any pending request. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.cancelled = true;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(target_arch = "wasm32")]
pub use raf::AnimationFrameScheduler;

#[cfg(target_arch = "wasm32")]
mod raf {
    use super::FrameScheduler;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    /// `requestAnimationFrame` / `cancelAnimationFrame` on the window
    pub struct AnimationFrameScheduler {
        window: web_sys::Window,
        callback: Option<Closure<dyn FnMut(f64)>>,
    }

    impl AnimationFrameScheduler {
        pub fn new(window: web_sys::Window) -> Self {
            Self {
                window,
                callback: None,
            }
        }

        /// Install the per-frame callback. Must happen before the first `arm()`.
        pub fn set_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
            self.callback = Some(callback);
        }
    }

    impl FrameScheduler for AnimationFrameScheduler {
        fn request(&mut self) -> Result<i32, String> {
            let callback = self
                .callback
                .as_ref()
                .ok_or_else(|| "Frame callback not installed".to_string())?;
            self.window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map_err(|e| format!("requestAnimationFrame failed: {:?}", e))
        }

        fn cancel(&mut self, handle: i32) {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                web_sys::console::error_1(&e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls {
        requested: Vec<i32>,
        cancelled: Vec<i32>,
    }

    #[derive(Clone, Default)]
    struct MockScheduler {
        calls: Rc<RefCell<Calls>>,
        fail: bool,
    }

    impl FrameScheduler for MockScheduler {
        fn request(&mut self) -> Result<i32, String> {
            if self.fail {
                return Err("no display".to_string());
            }
            let mut calls = self.calls.borrow_mut();
            let handle = calls.requested.len() as i32 + 1;
            calls.requested.push(handle);
            Ok(handle)
        }

        fn cancel(&mut self, handle: i32) {
            self.calls.borrow_mut().cancelled.push(handle);
        }
    }

    #[test]
    fn test_arm_once_per_frame() {
        let scheduler = MockScheduler::default();
        let calls = scheduler.calls.clone();
        let mut frames = FrameLoop::new(scheduler);

        assert_eq!(frames.arm(), Ok(true));
        assert_eq!(frames.arm(), Ok(false), "Already pending");
        assert!(frames.is_armed());
        assert_eq!(calls.borrow().requested, vec![1]);

        assert!(frames.fired());
        assert!(!frames.is_armed());
        assert_eq!(frames.arm(), Ok(true));
        assert_eq!(calls.borrow().requested, vec![1, 2]);
    }

    #[test]
    fn test_cancel_drops_pending_request() {
        let scheduler = MockScheduler::default();
        let calls = scheduler.calls.clone();
        let mut frames = FrameLoop::new(scheduler);

        frames.arm().unwrap();
        frames.cancel();

        assert_eq!(calls.borrow().cancelled, vec![1]);
        assert!(!frames.is_armed());
        assert!(frames.is_cancelled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let scheduler = MockScheduler::default();
        let calls = scheduler.calls.clone();
        let mut frames = FrameLoop::new(scheduler);

        frames.arm().unwrap();
        frames.cancel();
        frames.cancel();
        frames.cancel();

        assert_eq!(calls.borrow().cancelled.len(), 1);
    }

    #[test]
    fn test_no_rearm_after_cancel() {
        let scheduler = MockScheduler::default();
        let calls = scheduler.calls.clone();
        let mut frames = FrameLoop::new(scheduler);

        frames.arm().unwrap();
        frames.cancel();

        // A callback already in flight must not tick or schedule another
        assert!(!frames.fired());
        assert_eq!(frames.arm(), Ok(false));
        assert_eq!(calls.borrow().requested.len(), 1);
    }

    #[test]
    fn test_request_failure_leaves_loop_unarmed() {
        let scheduler = MockScheduler {
            fail: true,
            ..Default::default()
        };
        let mut frames = FrameLoop::new(scheduler);

        assert!(frames.arm().is_err());
        assert!(!frames.is_armed());
    }
}
