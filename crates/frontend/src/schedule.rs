use gloo_timers::future::TimeoutFuture;
use tabcordion_core::{LayoutScheduler, Task};
use wasm_bindgen_futures::spawn_local;

/// Runs tasks on the next timer tick, after the browser has laid out the
/// role and class changes of the current event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerScheduler;

impl LayoutScheduler for TimerScheduler {
    fn after_layout(&self, task: Task) {
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            task();
        });
    }
}
