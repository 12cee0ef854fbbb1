use std::fmt;

/// A single knock: one port on one transport.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Knock {
    TCP(u16),
    UDP(u16),
}

impl Knock {
    pub fn port(&self) -> u16 {
        match self {
            Self::TCP(port) => *port,
            Self::UDP(port) => *port,
        }
    }

    pub fn proto(&self) -> &'static str {
        match self {
            Self::TCP(..) => "TCP",
            Self::UDP(..) => "UDP",
        }
    }
}

impl fmt::Display for Knock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.port(), self.proto())
    }
}
