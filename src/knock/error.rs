use std::io;
use thiserror::Error;
use super::probe::Knock;

#[derive(Debug, Error)]
pub enum KnockError {
    #[error("socket creation failed for {knock}: {source}")]
    Socket {
        knock:  Knock,
        source: io::Error,
    },
    #[error("send failed for {knock}: {source}")]
    Send {
        knock:  Knock,
        source: io::Error,
    },
}

impl KnockError {
    pub fn socket(knock: Knock, source: io::Error) -> Self {
        Self::Socket { knock, source }
    }

    pub fn send(knock: Knock, source: io::Error) -> Self {
        Self::Send { knock, source }
    }

    /// The knock that aborted the sequence.
    pub fn knock(&self) -> Knock {
        match self {
            Self::Socket { knock, .. } => *knock,
            Self::Send   { knock, .. } => *knock,
        }
    }
}
