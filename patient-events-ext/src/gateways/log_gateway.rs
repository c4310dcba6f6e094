use common::subject_observer::EventObserver;
use log::{log, Level};
use patient_events::{PatientEvent, PatientRegistered, PatientUpdated};

pub const AUDIT_TARGET: &str = "patient_events::audit";

#[derive(Debug, Clone, Copy)]
pub struct LogGateway {
    level: Level,
}

impl Default for LogGateway {
    fn default() -> Self {
        LogGateway { level: Level::Info }
    }
}

impl LogGateway {
    pub fn new(level: Level) -> Self {
        LogGateway { level }
    }
}

fn registration_line(payload: &PatientRegistered) -> String {
    format!(
        "{} mrn={} first_name={:?} last_name={:?}",
        PatientRegistered::KIND,
        payload.medical_record_number,
        payload.first_name,
        payload.last_name
    )
}

fn update_line(payload: &PatientUpdated) -> String {
    format!(
        "{} mrn={} new_last_name={:?}",
        PatientUpdated::KIND,
        payload.medical_record_number,
        payload.new_last_name
    )
}

impl EventObserver<PatientRegistered> for LogGateway {
    fn handle(&self, payload: &PatientRegistered) {
        log!(target: AUDIT_TARGET, self.level, "{}", registration_line(payload));
    }
}

impl EventObserver<PatientUpdated> for LogGateway {
    fn handle(&self, payload: &PatientUpdated) {
        log!(target: AUDIT_TARGET, self.level, "{}", update_line(payload));
    }
}

#[cfg(test)]
mod tests {
    use std::{
        rc::Rc,
        sync::{Mutex, Once},
    };

    use common::subject_observer::Publisher;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use patient_events::{hub::PatientEventHub, PatientRegistered, PatientUpdated};

    use super::{registration_line, update_line, LogGateway, AUDIT_TARGET};

    struct AuditCapture;

    static AUDIT: AuditCapture = AuditCapture;
    static AUDIT_LINES: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
    static INSTALL: Once = Once::new();

    impl Log for AuditCapture {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.target() == AUDIT_TARGET
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                AUDIT_LINES
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    fn capture_audit() {
        INSTALL.call_once(|| {
            log::set_logger(&AUDIT).unwrap();
            log::set_max_level(LevelFilter::Trace);
        });
    }

    // tests share the logger, each one picks its own record number
    fn audit_lines_for(mrn: &str) -> Vec<(Level, String)> {
        let needle = format!("mrn={mrn} ");
        AUDIT_LINES
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(_, line)| line.contains(&needle))
            .cloned()
            .collect()
    }

    #[test]
    fn test_registration_line() {
        // Given
        let payload = PatientRegistered {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            medical_record_number: "MRN001".to_string(),
        };

        // When
        let result = registration_line(&payload);

        // Then
        assert_eq!(
            "patient-registered mrn=MRN001 first_name=\"John\" last_name=\"Doe\"",
            result
        );
    }

    #[test]
    fn test_update_line() {
        // Given
        let payload = PatientUpdated {
            medical_record_number: "MRN001".to_string(),
            new_last_name: "Smith".to_string(),
        };

        // When
        let result = update_line(&payload);

        // Then
        assert_eq!("patient-updated mrn=MRN001 new_last_name=\"Smith\"", result);
    }

    #[test]
    fn test_log_gateway_should_audit_hub_events() {
        // Given
        capture_audit();
        let hub = PatientEventHub::default();
        let gateway = Rc::new(LogGateway::new(Level::Warn));
        let _subscriptions = hub.attach(&gateway);

        // When
        hub.publish(&PatientRegistered {
            first_name: "Jane".to_string(),
            last_name: "Roe".to_string(),
            medical_record_number: "MRN-AUDIT-1".to_string(),
        });
        hub.publish(&PatientUpdated {
            medical_record_number: "MRN-AUDIT-1".to_string(),
            new_last_name: "Poe".to_string(),
        });

        // Then
        assert_eq!(
            vec![
                (
                    Level::Warn,
                    "patient-registered mrn=MRN-AUDIT-1 first_name=\"Jane\" last_name=\"Roe\""
                        .to_string()
                ),
                (
                    Level::Warn,
                    "patient-updated mrn=MRN-AUDIT-1 new_last_name=\"Poe\"".to_string()
                ),
            ],
            audit_lines_for("MRN-AUDIT-1")
        );
    }

    #[test]
    fn test_log_gateway_should_default_to_info() {
        // Given
        capture_audit();
        let hub = PatientEventHub::default();
        let gateway = Rc::new(LogGateway::default());
        let _subscriptions = hub.attach(&gateway);

        // When
        hub.publish(&PatientUpdated {
            medical_record_number: "MRN-AUDIT-2".to_string(),
            new_last_name: "Smith".to_string(),
        });

        // Then
        let lines = audit_lines_for("MRN-AUDIT-2");
        assert_eq!(1, lines.len());
        assert_eq!(Level::Info, lines[0].0);
    }
}
