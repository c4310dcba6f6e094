use env_logger::Env;
use log::Level;
use patient_events_ext::gateways::AUDIT_TARGET;

pub fn init(audit_level: Level) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter(audit_level)))
        .init();
}

// audit lines must pass whatever level the gateway writes them at
fn default_filter(audit_level: Level) -> String {
    format!(
        "info,{AUDIT_TARGET}={}",
        audit_level.to_string().to_lowercase()
    )
}
