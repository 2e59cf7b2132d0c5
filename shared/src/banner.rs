use std::cell::Cell;
use std::rc::Rc;

use futures_signals::signal::Mutable;

use crate::constants::BANNER_HIDE_DELAY;
use crate::services::Timers;

/// Transient error line that hides itself after [`BANNER_HIDE_DELAY`].
///
/// Each `show` restarts the countdown: a hide scheduled by an earlier `show`
/// finds a newer generation and does nothing.
#[derive(Debug, Clone, Default)]
pub struct Banner {
    pub text: Mutable<String>,
    pub visible: Mutable<bool>,
    generation: Rc<Cell<u64>>,
}

impl Banner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, message: &str, timers: &impl Timers) {
        self.text.set(message.to_string());
        self.visible.set_neq(true);

        let current = self.generation.get() + 1;
        self.generation.set(current);

        let visible = self.visible.clone();
        let generation = self.generation.clone();
        timers.schedule(
            BANNER_HIDE_DELAY,
            Box::new(move || {
                if generation.get() == current {
                    visible.set_neq(false);
                }
            }),
        );
    }

    pub fn hide(&self) {
        self.visible.set_neq(false);
    }

    pub fn message(&self) -> Option<String> {
        if self.visible.get() {
            Some(self.text.get_cloned())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::ManualTimers;

    #[test]
    fn hides_after_delay() {
        let timers = ManualTimers::new();
        let banner = Banner::new();
        banner.show("boom", &timers);
        assert_eq!(banner.message().as_deref(), Some("boom"));

        timers.advance(Duration::from_millis(4999));
        assert!(banner.visible.get());
        timers.advance(Duration::from_millis(1));
        assert!(!banner.visible.get());
        assert_eq!(banner.message(), None);
    }

    #[test]
    fn new_message_restarts_countdown() {
        let timers = ManualTimers::new();
        let banner = Banner::new();
        banner.show("first", &timers);
        timers.advance(Duration::from_secs(3));
        banner.show("second", &timers);

        timers.advance(Duration::from_secs(2));
        assert_eq!(banner.message().as_deref(), Some("second"));

        timers.advance(Duration::from_secs(3));
        assert_eq!(banner.message(), None);
    }

    #[test]
    fn hide_is_immediate() {
        let timers = ManualTimers::new();
        let banner = Banner::new();
        banner.show("x", &timers);
        banner.hide();
        assert!(!banner.visible.get());
        // keeps the last text for the fade-out
        assert_eq!(banner.text.get_cloned(), "x");
    }
}
