use std::{fmt::Debug, io::Error, net::ToSocketAddrs};

use common::subject_observer::EventObserver;
use dipstick::{Input, InputScope, Prefixed, Statsd};
use log::trace;
use patient_events::{PatientEvent, PatientRegistered, PatientUpdated};

use crate::gateways::{PATIENT_PROXY, REGISTERED, UPDATED};

const METRIC_PREFIX: &str = "patient";

pub struct StatsdGateway {}

impl StatsdGateway {
    pub fn new<A>(address: A) -> Result<Self, Error>
    where
        A: ToSocketAddrs + Debug + Clone,
    {
        let statsd_scope = Statsd::send_to(address)?.metrics();
        Ok(Self::with_output(statsd_scope))
    }

    // the proxy hands its target bare metric names, the prefix lives on the output
    fn with_output<S>(output: S) -> Self
    where
        S: InputScope + Prefixed + Send + Sync + 'static,
    {
        PATIENT_PROXY.target(output.add_name(METRIC_PREFIX));
        StatsdGateway {}
    }
}

impl EventObserver<PatientRegistered> for StatsdGateway {
    fn handle(&self, payload: &PatientRegistered) {
        trace!("Counting {} for {}", PatientRegistered::KIND, payload.medical_record_number);
        REGISTERED.count(1);
    }
}

impl EventObserver<PatientUpdated> for StatsdGateway {
    fn handle(&self, payload: &PatientUpdated) {
        trace!("Counting {} for {}", PatientUpdated::KIND, payload.medical_record_number);
        UPDATED.count(1);
    }
}
