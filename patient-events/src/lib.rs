use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

pub mod channels;
pub mod forms;
pub mod hub;
pub mod roster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    PatientRegistered,
    PatientUpdated,
}

pub trait PatientEvent {
    const KIND: EventKind;

    fn medical_record_number(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRegistered {
    pub first_name: String,
    pub last_name: String,
    pub medical_record_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientUpdated {
    pub medical_record_number: String,
    pub new_last_name: String,
}

impl PatientEvent for PatientRegistered {
    const KIND: EventKind = EventKind::PatientRegistered;

    fn medical_record_number(&self) -> &str {
        &self.medical_record_number
    }
}

impl PatientEvent for PatientUpdated {
    const KIND: EventKind = EventKind::PatientUpdated;

    fn medical_record_number(&self) -> &str {
        &self.medical_record_number
    }
}
