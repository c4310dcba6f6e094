use std::{cell::RefCell, collections::BTreeMap, fmt};

use common::subject_observer::EventObserver;
use log::{info, warn};

use crate::{PatientRegistered, PatientUpdated};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Display for PatientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Default)]
pub struct PatientRoster {
    records: RefCell<BTreeMap<String, PatientRecord>>,
}

impl PatientRoster {
    pub fn get(&self, medical_record_number: &str) -> Option<PatientRecord> {
        self.records.borrow().get(medical_record_number).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn records(&self) -> Vec<(String, PatientRecord)> {
        self.records
            .borrow()
            .iter()
            .map(|(mrn, record)| (mrn.clone(), record.clone()))
            .collect()
    }
}

impl EventObserver<PatientRegistered> for PatientRoster {
    fn handle(&self, payload: &PatientRegistered) {
        let record = PatientRecord {
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
        };
        info!("Patient registered: {} {record}", payload.medical_record_number);
        self.records
            .borrow_mut()
            .insert(payload.medical_record_number.clone(), record);
    }
}

impl EventObserver<PatientUpdated> for PatientRoster {
    fn handle(&self, payload: &PatientUpdated) {
        match self
            .records
            .borrow_mut()
            .get_mut(&payload.medical_record_number)
        {
            Some(record) => {
                info!(
                    "Patient {} renamed from {} to {}",
                    payload.medical_record_number, record.last_name, payload.new_last_name
                );
                record.last_name = payload.new_last_name.clone();
            }
            None => warn!(
                "Ignoring update for unknown patient {}",
                payload.medical_record_number
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use common::subject_observer::Publisher;

    use crate::{
        forms::{RegistrationForm, UpdateForm},
        hub::PatientEventHub,
        PatientUpdated,
    };

    use super::{PatientRecord, PatientRoster};

    #[test]
    fn test_roster_should_follow_hub_events() {
        // Given
        let hub = PatientEventHub::default();
        let roster = Rc::new(PatientRoster::default());
        let _subscriptions = hub.attach(&roster);

        // When
        RegistrationForm::new("John", "Doe", "MRN001")
            .submit(&hub)
            .unwrap();
        RegistrationForm::new("Jane", "Roe", "MRN000")
            .submit(&hub)
            .unwrap();
        UpdateForm::new("MRN001", "Smith").submit(&hub).unwrap();

        // Then
        assert_eq!(
            vec![
                (
                    "MRN000".to_string(),
                    PatientRecord {
                        first_name: "Jane".to_string(),
                        last_name: "Roe".to_string(),
                    }
                ),
                (
                    "MRN001".to_string(),
                    PatientRecord {
                        first_name: "John".to_string(),
                        last_name: "Smith".to_string(),
                    }
                ),
            ],
            roster.records()
        );
        assert_eq!("John Smith", roster.get("MRN001").unwrap().to_string());
    }

    #[test]
    fn test_roster_should_ignore_unknown_patient_update() {
        // Given
        let hub = PatientEventHub::default();
        let roster = Rc::new(PatientRoster::default());
        let _subscriptions = hub.attach(&roster);

        // When
        hub.publish(&PatientUpdated {
            medical_record_number: "MRN404".to_string(),
            new_last_name: "Nobody".to_string(),
        });

        // Then
        assert!(roster.is_empty());
    }

    #[test]
    fn test_roster_should_stop_listening_once_detached() {
        // Given
        let hub = PatientEventHub::default();
        let roster = Rc::new(PatientRoster::default());
        let subscriptions = hub.attach(&roster);
        RegistrationForm::new("John", "Doe", "MRN001")
            .submit(&hub)
            .unwrap();

        // When
        subscriptions.detach();
        RegistrationForm::new("Jane", "Roe", "MRN002")
            .submit(&hub)
            .unwrap();

        // Then
        assert_eq!(1, roster.len());
    }
}
