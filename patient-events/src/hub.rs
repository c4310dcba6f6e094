use std::rc::Rc;

use common::subject_observer::{
    EventSubject, NotifyError, Publisher, SharedObserver, Subject, Subscription,
};
use log::{debug, warn};

use crate::{
    channels::{PatientListener, RegistrationChannel, UpdateChannel},
    PatientEvent, PatientRegistered, PatientUpdated,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubSettings {
    pub isolate_faults: bool,
}

pub trait Channel<T> {
    fn channel(&self) -> &Rc<EventSubject<T>>;
}

#[derive(Debug, Default)]
pub struct PatientEventHub {
    settings: HubSettings,
    registered: Rc<RegistrationChannel>,
    updated: Rc<UpdateChannel>,
}

impl Channel<PatientRegistered> for PatientEventHub {
    fn channel(&self) -> &Rc<RegistrationChannel> {
        &self.registered
    }
}

impl Channel<PatientUpdated> for PatientEventHub {
    fn channel(&self) -> &Rc<UpdateChannel> {
        &self.updated
    }
}

impl PatientEventHub {
    pub fn new(settings: HubSettings) -> Self {
        PatientEventHub {
            settings,
            ..Default::default()
        }
    }

    pub fn subscribe<T>(&self, observer: SharedObserver<T>) -> Subscription<T>
    where
        Self: Channel<T>,
    {
        <Self as Channel<T>>::channel(self).subscribe(observer)
    }

    pub fn attach<L>(&self, listener: &Rc<L>) -> ListenerSubscriptions
    where
        L: PatientListener + 'static,
    {
        ListenerSubscriptions {
            registered: self.subscribe::<PatientRegistered>(listener.clone()),
            updated: self.subscribe::<PatientUpdated>(listener.clone()),
        }
    }

    pub fn try_publish<T>(&self, payload: &T) -> Result<usize, NotifyError>
    where
        Self: Channel<T>,
        T: PatientEvent,
    {
        let channel = <Self as Channel<T>>::channel(self);
        debug!(
            "Publishing {} for {} to {} observer(s)",
            T::KIND,
            payload.medical_record_number(),
            channel.observer_count()
        );
        if self.settings.isolate_faults {
            channel.notify_observers_isolated(payload)
        } else {
            let count = channel.observer_count();
            channel.notify_observers(payload);
            Ok(count)
        }
    }
}

impl<T> Publisher<T> for PatientEventHub
where
    Self: Channel<T>,
    T: PatientEvent,
{
    fn publish(&self, payload: &T) {
        if let Err(e) = self.try_publish(payload) {
            warn!("{} delivery incomplete: {e}", T::KIND);
        }
    }
}

#[derive(Debug)]
#[must_use = "dropping the subscriptions detaches the listener immediately"]
pub struct ListenerSubscriptions {
    registered: Subscription<PatientRegistered>,
    updated: Subscription<PatientUpdated>,
}

impl ListenerSubscriptions {
    pub fn is_active(&self) -> bool {
        self.registered.is_active() && self.updated.is_active()
    }

    pub fn detach(self) {
        drop(self);
    }
}
