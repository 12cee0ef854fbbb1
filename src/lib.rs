#![allow(clippy::module_inception, clippy::redundant_field_names)]

pub use bind::Bind;

pub use config::ConfigError;
pub use config::Load;

pub use knock::Knock;
pub use knock::KnockError;
pub use knock::Knocker;
pub use knock::Report;
pub use knock::Sequence;

pub mod config;
pub mod knock;

mod bind;
