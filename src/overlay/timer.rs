use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::error::GameError;

/// One-shot `setTimeout` that is cleared when the handle is dropped. The
/// handle owns the callback, so dropping it also frees the closure.
pub struct StepTimer {
    window: Window,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl StepTimer {
    pub fn schedule<F>(window: &Window, delay_ms: u32, callback: F) -> Result<Self, GameError>
    where
        F: FnOnce() + 'static,
    {
        let callback = Closure::once(callback);
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms.min(i32::MAX as u32) as i32,
        )?;
        Ok(Self {
            window: window.clone(),
            handle,
            _callback: callback,
        })
    }
}

impl Drop for StepTimer {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}
