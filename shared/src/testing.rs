use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::services::Timers;

struct Pending {
    due: Duration,
    task: Box<dyn FnOnce()>,
}

/// Timers driven by hand: nothing fires until `advance` passes its due time.
#[derive(Default)]
pub struct ManualTimers {
    now: Cell<Duration>,
    pending: RefCell<Vec<Pending>>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let now = self.now.get() + by;
        self.now.set(now);
        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let due = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= now)
                    .min_by_key(|(_, p)| p.due)
                    .map(|(index, _)| index);
                due.map(|index| pending.remove(index))
            };
            match next {
                Some(pending) => (pending.task)(),
                None => break,
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl Timers for ManualTimers {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.pending.borrow_mut().push(Pending {
            due: self.now.get() + delay,
            task,
        });
    }
}
