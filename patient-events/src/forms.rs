use common::subject_observer::Publisher;
use log::debug;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::{PatientRegistered, PatientUpdated};

#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("Invalid form: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error("Invalid medical record number {0:?}: only ASCII letters, digits and '-' are allowed")]
    MalformedRecordNumber(String),
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct RegistrationForm {
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    #[validate(length(min = 1, max = 64))]
    pub last_name: String,
    #[validate(length(min = 1, max = 32))]
    pub medical_record_number: String,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct UpdateForm {
    #[validate(length(min = 1, max = 32))]
    pub medical_record_number: String,
    #[validate(length(min = 1, max = 64))]
    pub new_last_name: String,
}

impl RegistrationForm {
    pub fn new(first_name: &str, last_name: &str, medical_record_number: &str) -> Self {
        RegistrationForm {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            medical_record_number: medical_record_number.trim().to_string(),
        }
    }

    pub fn submit<P>(&self, publisher: &P) -> Result<PatientRegistered, FormError>
    where
        P: Publisher<PatientRegistered> + ?Sized,
    {
        self.validate()?;
        check_record_number(&self.medical_record_number)?;

        let payload = PatientRegistered {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            medical_record_number: self.medical_record_number.clone(),
        };
        debug!("Submitting registration for {}", payload.medical_record_number);
        publisher.publish(&payload);
        Ok(payload)
    }
}

impl UpdateForm {
    pub fn new(medical_record_number: &str, new_last_name: &str) -> Self {
        UpdateForm {
            medical_record_number: medical_record_number.trim().to_string(),
            new_last_name: new_last_name.trim().to_string(),
        }
    }

    pub fn submit<P>(&self, publisher: &P) -> Result<PatientUpdated, FormError>
    where
        P: Publisher<PatientUpdated> + ?Sized,
    {
        self.validate()?;
        check_record_number(&self.medical_record_number)?;

        let payload = PatientUpdated {
            medical_record_number: self.medical_record_number.clone(),
            new_last_name: self.new_last_name.clone(),
        };
        debug!("Submitting update for {}", payload.medical_record_number);
        publisher.publish(&payload);
        Ok(payload)
    }
}

fn check_record_number(medical_record_number: &str) -> Result<(), FormError> {
    if medical_record_number
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        Ok(())
    } else {
        Err(FormError::MalformedRecordNumber(
            medical_record_number.to_string(),
        ))
    }
}
