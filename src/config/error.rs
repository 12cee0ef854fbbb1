use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid IP address: {0}")]
    Address(String),
    #[error("invalid interval: {0}")]
    Interval(String),
    #[error("interval must be greater than 0")]
    NonPositive,
    #[error("invalid port:protocol in list: {0}")]
    Token(String),
    #[error("ports must be between 1 and 65535")]
    Port,
    #[error("protocol must be UDP or TCP")]
    Protocol,
    #[error("no ports to knock")]
    Empty,
    #[error("{}: {source}", .path.display())]
    Read {
        path:   PathBuf,
        source: io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Parse {
        path:   PathBuf,
        source: ini::ParseError,
    },
    #[error("{}: no such profile: {name}", .path.display())]
    MissingProfile {
        path: PathBuf,
        name: String,
    },
    #[error("{}: {name}: missing key: {key}", .path.display())]
    MissingKey {
        path: PathBuf,
        name: String,
        key:  &'static str,
    },
    #[error("{}: {name}: {reason}", .path.display())]
    Profile {
        path:   PathBuf,
        name:   String,
        reason: Box<ConfigError>,
    },
}
