mod log_gateway;
mod statsd_gateway;

pub use log_gateway::{LogGateway, AUDIT_TARGET};
pub use statsd_gateway::StatsdGateway;

use dipstick::*;

metrics! {
    PATIENT_PROXY: Proxy = "patient" => {
        REGISTERED: Counter = "registered";
        UPDATED: Counter = "updated";
    }
}
