//! `setInterval` backed tick scheduler

use js_sys::Function;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::scheduler::TickScheduler;

/// Repeating browser timer calling one fixed callback
pub struct IntervalScheduler {
    window: Window,
    callback: Function,
    handle: Option<i32>,
    interval_ms: Option<u32>,
}

impl IntervalScheduler {
    /// The closure must outlive the scheduler
    pub fn new(window: Window, callback: &Closure<dyn FnMut()>) -> Self {
        Self {
            window,
            callback: callback.as_ref().unchecked_ref::<Function>().clone(),
            handle: None,
            interval_ms: None,
        }
    }
}

impl TickScheduler for IntervalScheduler {
    fn schedule(&mut self, interval_ms: u32) {
        self.cancel();
        let timeout = interval_ms.clamp(1, i32::MAX as u32) as i32;
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(&self.callback, timeout)
        {
            Ok(handle) => {
                self.handle = Some(handle);
                self.interval_ms = Some(interval_ms);
            }
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.window.clear_interval_with_handle(handle);
        }
        self.interval_ms = None;
    }

    fn interval(&self) -> Option<u32> {
        self.interval_ms
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
