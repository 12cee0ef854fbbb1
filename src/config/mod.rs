pub use direct::Direct;
pub use error::ConfigError;
pub use profile::Profile;

pub mod parse;

mod direct;
mod error;
mod profile;

use crate::Sequence;

/// Source of a knock sequence.
pub trait Load {
    fn load(&self) -> Result<Sequence, ConfigError>;
}
