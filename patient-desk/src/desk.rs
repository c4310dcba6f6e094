use std::{
    io::{BufRead, Write},
    rc::Rc,
};

use log::{debug, info};
use patient_events::{
    forms::FormError,
    hub::{HubSettings, ListenerSubscriptions, PatientEventHub},
    roster::PatientRoster,
};
use patient_events_ext::gateways::{LogGateway, StatsdGateway};

use crate::{command::DeskCommand, config::app::AppConfig, error::AppError};

#[derive(Debug, PartialEq)]
pub enum Reply {
    Message(String),
    Quit,
}

pub struct Desk {
    hub: PatientEventHub,
    roster: Rc<PatientRoster>,
    // the hub only holds weak registrations, the desk owns its listeners
    _audit: Rc<LogGateway>,
    _statsd: Option<Rc<StatsdGateway>>,
    _subscriptions: Vec<ListenerSubscriptions>,
}

impl Desk {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let hub = PatientEventHub::new(HubSettings {
            isolate_faults: config.isolate_faults,
        });
        let roster = Rc::new(PatientRoster::default());
        let audit = Rc::new(LogGateway::new(config.audit_level));
        let mut subscriptions = vec![hub.attach(&roster), hub.attach(&audit)];

        let statsd = if config.statsd_enabled {
            let gateway = StatsdGateway::new((config.statsd_host.clone(), config.statsd_port))
                .map_err(AppError::Metrics)?;
            let gateway = Rc::new(gateway);
            subscriptions.push(hub.attach(&gateway));
            info!(
                "Sending metrics to {}:{}",
                config.statsd_host, config.statsd_port
            );
            Some(gateway)
        } else {
            None
        };

        Ok(Desk {
            hub,
            roster,
            _audit: audit,
            _statsd: statsd,
            _subscriptions: subscriptions,
        })
    }

    pub fn roster(&self) -> &PatientRoster {
        &self.roster
    }

    pub fn execute(&self, command: DeskCommand) -> Result<Reply, FormError> {
        debug!("Executing {:?}", command);
        let reply = match command {
            DeskCommand::Register(form) => {
                let payload = form.submit(&self.hub)?;
                Reply::Message(format!(
                    "Registered {}: {} {}",
                    payload.medical_record_number, payload.first_name, payload.last_name
                ))
            }
            DeskCommand::Update(form) => {
                let payload = form.submit(&self.hub)?;
                Reply::Message(format!(
                    "Updated {}: last name is now {}",
                    payload.medical_record_number, payload.new_last_name
                ))
            }
            DeskCommand::Roster => Reply::Message(self.describe_roster()),
            DeskCommand::Help => Reply::Message(format!("Commands:\n{}", DeskCommand::usage())),
            DeskCommand::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    pub fn run<R, W>(&self, input: R, mut output: W) -> Result<(), AppError>
    where
        R: BufRead,
        W: Write,
    {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let reply = line
                .parse::<DeskCommand>()
                .map_err(|e| e.to_string())
                .and_then(|command| self.execute(command).map_err(|e| e.to_string()));
            match reply {
                Ok(Reply::Message(message)) => writeln!(output, "{message}")?,
                Ok(Reply::Quit) => break,
                Err(message) => writeln!(output, "error: {message}")?,
            }
        }
        output.flush()?;
        Ok(())
    }

    fn describe_roster(&self) -> String {
        let records = self.roster.records();
        if records.is_empty() {
            return "No patient registered".to_string();
        }
        records
            .iter()
            .map(|(mrn, record)| format!("{mrn}: {record}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
