use std::{
    fmt,
    rc::{Rc, Weak},
};

use super::{event_subject::observer_key, EventObserver, EventSubject, SharedObserver};

/// Registration token returned by [`EventSubject::subscribe`].
///
/// Dropping the token deregisters the observer. The token holds weak
/// references only, so it outliving the subject or the observer is fine.
#[must_use = "dropping a Subscription deregisters the observer immediately"]
pub struct Subscription<T> {
    subject: Weak<EventSubject<T>>,
    // keeps the observer allocation, hence its identity, from being reused
    _observer: Weak<dyn EventObserver<T>>,
    key: usize,
}

impl<T> Subscription<T> {
    pub(super) fn new(subject: &Rc<EventSubject<T>>, observer: &SharedObserver<T>) -> Self {
        Subscription {
            subject: Rc::downgrade(subject),
            _observer: Rc::downgrade(observer),
            key: observer_key(observer),
        }
    }

    pub fn is_active(&self) -> bool {
        self.subject
            .upgrade()
            .map_or(false, |subject| subject.contains_key(self.key))
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(subject) = self.subject.upgrade() {
            subject.remove_key(self.key);
        }
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
