use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubjectError {
    #[error("Observer is already registered")]
    AlreadyRegistered,
    #[error("Observer is not registered")]
    NotRegistered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverFailure {
    pub position: usize,
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("{count} observer(s) failed while handling the payload, {delivered} succeeded", count = .failures.len())]
    ObserversFailed {
        delivered: usize,
        failures: Vec<ObserverFailure>,
    },
}
