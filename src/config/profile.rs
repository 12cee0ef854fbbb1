use std::fs;
use std::path::PathBuf;
use ini::{Ini, Properties};
use log::debug;
use crate::Sequence;
use super::{parse, ConfigError, Load};

/// A named section of an INI-style profile file:
///
/// ```ini
/// [home]
/// ipaddr = 1.2.3.4
/// interval = 500
/// ports = 111:TCP 222:TCP 333:UDP
/// ```
///
/// `interval` is in milliseconds and `ports` is whitespace separated.
#[derive(Clone, Debug)]
pub struct Profile {
    pub path: PathBuf,
    pub name: String,
}

impl Profile {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, name: S) -> Self {
        Self { path: path.into(), name: name.into() }
    }

    fn section<'i>(&self, ini: &'i Ini) -> Result<&'i Properties, ConfigError> {
        ini.section(Some(self.name.as_str())).ok_or_else(|| ConfigError::MissingProfile {
            path: self.path.clone(),
            name: self.name.clone(),
        })
    }

    fn get<'p>(&self, section: &'p Properties, key: &'static str) -> Result<&'p str, ConfigError> {
        section.get(key).ok_or_else(|| ConfigError::MissingKey {
            path: self.path.clone(),
            name: self.name.clone(),
            key:  key,
        })
    }

    fn invalid(&self, reason: ConfigError) -> ConfigError {
        ConfigError::Profile {
            path:   self.path.clone(),
            name:   self.name.clone(),
            reason: Box::new(reason),
        }
    }
}

impl Load for Profile {
    fn load(&self) -> Result<Sequence, ConfigError> {
        let path = &self.path;

        let text = fs::read_to_string(path).map_err(|source| {
            ConfigError::Read { path: path.clone(), source }
        })?;

        let ini = Ini::load_from_str(&text).map_err(|source| {
            ConfigError::Parse { path: path.clone(), source }
        })?;

        debug!("loaded profile file {}", path.display());

        let section  = self.section(&ini)?;
        let addr     = self.get(section, "ipaddr")?;
        let interval = self.get(section, "interval")?;
        let ports    = self.get(section, "ports")?;

        let addr     = parse::addr(addr).map_err(|e| self.invalid(e))?;
        let interval = parse::interval(interval).map_err(|e| self.invalid(e))?;
        let knocks   = parse::knocks(ports.split_whitespace()).map_err(|e| self.invalid(e))?;

        Ok(Sequence { addr, interval, knocks })
    }
}
