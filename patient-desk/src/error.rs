use std::io;

use config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Unable to reach statsd: {0}")]
    Metrics(io::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
