use crate::Sequence;
use super::{parse, ConfigError, Load};

/// Sequence given directly as address, interval and port tokens.
#[derive(Clone, Debug, Default)]
pub struct Direct {
    pub addr:     String,
    pub interval: String,
    pub ports:    Vec<String>,
}

impl Load for Direct {
    fn load(&self) -> Result<Sequence, ConfigError> {
        let addr     = parse::addr(&self.addr)?;
        let interval = parse::interval(&self.interval)?;
        let knocks   = parse::knocks(self.ports.iter().map(String::as_str))?;
        Ok(Sequence { addr, interval, knocks })
    }
}
