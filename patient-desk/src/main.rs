use std::io;

use anyhow::Context;
use log::{debug, info};

use crate::{config::app::AppConfig, desk::Desk};

mod command;
mod config;
mod desk;
mod error;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Unable to load configuration")?;
    config::log::init(config.audit_level);
    debug!("Starting front desk with configuration: {:?}", config);

    let desk = Desk::new(&config)?;
    info!("Front desk ready, type 'help' for the list of commands");
    desk.run(io::stdin().lock(), io::stdout())?;

    info!(
        "Front desk closed with {} patient(s) on the roster",
        desk.roster().len()
    );
    Ok(())
}
