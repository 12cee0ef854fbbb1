pub use error::KnockError;
pub use knock::Knocker;
pub use knock::Sequence;
pub use probe::Knock;
pub use report::{Quiet, Report};
pub use sock::{Open, Sockets, CONNECT_WAIT};

mod error;
mod knock;
mod probe;
mod report;
mod sock;
