mod error;
mod event_subject;
mod subscription;

use std::rc::Rc;

pub use error::{NotifyError, ObserverFailure, SubjectError};
pub use event_subject::EventSubject;
pub use subscription::Subscription;

pub type SharedObserver<T> = Rc<dyn EventObserver<T>>;

pub trait EventObserver<T> {
    fn handle(&self, payload: &T);
}

impl<T, F> EventObserver<T> for F
where
    F: Fn(&T),
{
    fn handle(&self, payload: &T) {
        self(payload)
    }
}

pub trait Subject<T> {
    fn add_observer(&self, observer: SharedObserver<T>) -> bool;

    fn remove_observer(&self, observer: SharedObserver<T>) -> bool;

    fn notify_observers(&self, payload: &T);
}

pub trait Publisher<T> {
    fn publish(&self, payload: &T);
}
