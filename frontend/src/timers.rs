use std::time::Duration;

use gloo_timers::callback::Timeout;

use shared::services::Timers;

/// `setTimeout`-backed timers; scheduled tasks are never cancelled here.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl Timers for BrowserTimers {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}
