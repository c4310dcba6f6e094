use common::subject_observer::{EventObserver, EventSubject};

use crate::{PatientRegistered, PatientUpdated};

pub type RegistrationChannel = EventSubject<PatientRegistered>;
pub type UpdateChannel = EventSubject<PatientUpdated>;

pub trait PatientRegisteredObserver: EventObserver<PatientRegistered> {}

impl<O> PatientRegisteredObserver for O where O: EventObserver<PatientRegistered> + ?Sized {}

pub trait PatientUpdatedObserver: EventObserver<PatientUpdated> {}

impl<O> PatientUpdatedObserver for O where O: EventObserver<PatientUpdated> + ?Sized {}

pub trait PatientListener: PatientRegisteredObserver + PatientUpdatedObserver {}

impl<O> PatientListener for O where
    O: PatientRegisteredObserver + PatientUpdatedObserver + ?Sized
{
}
