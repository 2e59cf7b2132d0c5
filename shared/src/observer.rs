use std::cell::RefCell;
use std::rc::{Rc, Weak};

use futures::channel::mpsc::{unbounded, UnboundedReceiver};
use futures::StreamExt;

use crate::types::Session;

type Observer = Rc<dyn Fn(Option<Session>)>;

#[derive(Default)]
struct ObserverList {
    next_id: u64,
    entries: Vec<(u64, Observer)>,
}

/// Registry of session-change observers kept by an identity service.
#[derive(Clone, Default)]
pub struct SessionObservers {
    list: Rc<RefCell<ObserverList>>,
}

impl SessionObservers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer` and immediately reports `current` to it.
    pub fn subscribe(&self, current: Option<Session>, observer: Box<dyn Fn(Option<Session>)>) -> Subscription {
        let observer: Observer = Rc::from(observer);
        let id = {
            let mut list = self.list.borrow_mut();
            list.next_id += 1;
            let id = list.next_id;
            list.entries.push((id, observer.clone()));
            id
        };
        observer(current);
        Subscription {
            id,
            list: Rc::downgrade(&self.list),
        }
    }

    pub fn notify(&self, session: Option<Session>) {
        // observers may subscribe or unsubscribe while being called
        let observers: Vec<Observer> = self.list.borrow().entries.iter().map(|(_, o)| o.clone()).collect();
        for observer in observers {
            observer(session.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.list.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps an observer registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    list: Weak<RefCell<ObserverList>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(list) = self.list.upgrade() {
            list.borrow_mut().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Session notifications delivered through a channel, in arrival order.
pub struct SessionEvents {
    rx: UnboundedReceiver<Option<Session>>,
    _subscription: Subscription,
}

impl SessionEvents {
    /// Wires a fresh channel into whatever `subscribe` registers.
    pub fn connect(subscribe: impl FnOnce(Box<dyn Fn(Option<Session>)>) -> Subscription) -> Self {
        let (tx, rx) = unbounded();
        let subscription = subscribe(Box::new(move |session| {
            if tx.unbounded_send(session).is_err() {
                log::warn!("session event dropped: receiver closed");
            }
        }));
        Self {
            rx,
            _subscription: subscription,
        }
    }

    pub async fn next(&mut self) -> Option<Option<Session>> {
        self.rx.next().await
    }

    /// Next already-queued event, without waiting.
    pub fn try_next(&mut self) -> Option<Option<Session>> {
        self.rx.try_next().ok().flatten()
    }
}
