use std::{
    any::Any,
    cell::RefCell,
    fmt,
    panic::{self, AssertUnwindSafe},
    rc::{Rc, Weak},
};

use log::{debug, trace, warn};

use super::{
    EventObserver, NotifyError, ObserverFailure, Publisher, SharedObserver, Subject, SubjectError,
    Subscription,
};

struct Registration<T> {
    key: usize,
    observer: Weak<dyn EventObserver<T>>,
}

impl<T> Registration<T> {
    fn is_alive(&self) -> bool {
        self.observer.strong_count() > 0
    }
}

/// Ordered set of observers for one payload type.
///
/// Registrations are weak: the subject never keeps an observer alive, and an
/// observer dropped without deregistering is pruned on the next add or
/// broadcast.
pub struct EventSubject<T> {
    registrations: RefCell<Vec<Registration<T>>>,
}

impl<T> Default for EventSubject<T> {
    fn default() -> Self {
        Self {
            registrations: RefCell::new(Vec::new()),
        }
    }
}

impl<T> fmt::Debug for EventSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSubject")
            .field("observer_count", &self.observer_count())
            .finish()
    }
}

impl<T> EventSubject<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observer_count(&self) -> usize {
        self.registrations
            .borrow()
            .iter()
            .filter(|registration| registration.is_alive())
            .count()
    }

    pub fn contains(&self, observer: &SharedObserver<T>) -> bool {
        self.contains_key(observer_key(observer))
    }

    pub fn try_add_observer(&self, observer: SharedObserver<T>) -> Result<(), SubjectError> {
        let key = observer_key(&observer);
        let mut registrations = self.registrations.borrow_mut();
        registrations.retain(Registration::is_alive);
        if registrations.iter().any(|registration| registration.key == key) {
            return Err(SubjectError::AlreadyRegistered);
        }
        registrations.push(Registration {
            key,
            observer: Rc::downgrade(&observer),
        });
        trace!("Observer registered, {} in total", registrations.len());
        Ok(())
    }

    pub fn try_remove_observer(&self, observer: SharedObserver<T>) -> Result<(), SubjectError> {
        if self.remove_key(observer_key(&observer)) {
            Ok(())
        } else {
            Err(SubjectError::NotRegistered)
        }
    }

    /// Registers `observer` and returns a token that deregisters it when
    /// released.
    ///
    /// If the observer was already registered the token takes over that
    /// registration.
    pub fn subscribe(self: &Rc<Self>, observer: SharedObserver<T>) -> Subscription<T> {
        self.add_observer(observer.clone());
        Subscription::new(self, &observer)
    }

    /// Broadcasts like [`Subject::notify_observers`] but keeps delivering
    /// when a handler panics.
    ///
    /// Returns the number of observers that handled the payload, or the
    /// failures collected over the whole snapshot.
    pub fn notify_observers_isolated(&self, payload: &T) -> Result<usize, NotifyError> {
        let snapshot = self.snapshot();
        let mut failures = vec![];
        for (position, observer) in snapshot.iter().enumerate() {
            if let Err(cause) = panic::catch_unwind(AssertUnwindSafe(|| observer.handle(payload)))
            {
                let message = panic_message(cause.as_ref());
                warn!("Observer #{position} failed while handling payload: {message}");
                failures.push(ObserverFailure { position, message });
            }
        }

        let delivered = snapshot.len() - failures.len();
        if failures.is_empty() {
            Ok(delivered)
        } else {
            Err(NotifyError::ObserversFailed {
                delivered,
                failures,
            })
        }
    }

    pub(super) fn contains_key(&self, key: usize) -> bool {
        self.registrations
            .borrow()
            .iter()
            .any(|registration| registration.key == key && registration.is_alive())
    }

    pub(super) fn remove_key(&self, key: usize) -> bool {
        let mut registrations = self.registrations.borrow_mut();
        registrations.retain(Registration::is_alive);
        match registrations
            .iter()
            .position(|registration| registration.key == key)
        {
            Some(index) => {
                registrations.remove(index);
                trace!("Observer unregistered, {} left", registrations.len());
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> Vec<SharedObserver<T>> {
        let mut registrations = self.registrations.borrow_mut();
        registrations.retain(Registration::is_alive);
        registrations
            .iter()
            .filter_map(|registration| registration.observer.upgrade())
            .collect()
    }
}

impl<T> Subject<T> for EventSubject<T> {
    fn add_observer(&self, observer: SharedObserver<T>) -> bool {
        self.try_add_observer(observer)
            .map_err(|e| debug!("Ignoring registration: {e}"))
            .is_ok()
    }

    fn remove_observer(&self, observer: SharedObserver<T>) -> bool {
        self.try_remove_observer(observer)
            .map_err(|e| debug!("Ignoring removal: {e}"))
            .is_ok()
    }

    fn notify_observers(&self, payload: &T) {
        let snapshot = self.snapshot();
        trace!("Notifying {} observer(s)", snapshot.len());
        for observer in &snapshot {
            observer.handle(payload);
        }
    }
}

impl<T> Publisher<T> for EventSubject<T> {
    fn publish(&self, payload: &T) {
        self.notify_observers(payload);
    }
}

pub(super) fn observer_key<T>(observer: &SharedObserver<T>) -> usize {
    Rc::as_ptr(observer) as *const () as usize
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    cause
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| cause.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
