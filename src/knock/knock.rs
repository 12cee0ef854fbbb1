use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;
use log::trace;
use tokio::time::sleep;
use crate::Bind;
use super::error::KnockError;
use super::probe::Knock;
use super::report::Report;
use super::sock::{self, Open, Sockets};

#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    pub addr:     Ipv4Addr,
    pub interval: Duration,
    pub knocks:   Vec<Knock>,
}

pub struct Knocker<O = Sockets> {
    open: O,
}

impl Knocker {
    pub fn new(bind: &Bind) -> Self {
        Self::with(Sockets::new(bind))
    }
}

impl<O: Open> Knocker<O> {
    pub fn with(open: O) -> Self {
        Self { open }
    }

    /// Knocks on every port of the sequence in order, sleeping for the
    /// interval after each one, the last included. Stops at the first
    /// knock whose socket cannot be created.
    pub async fn knock(&self, sequence: &Sequence, report: &dyn Report) -> Result<(), KnockError> {
        let Sequence { addr, interval, ref knocks } = *sequence;

        for &knock in knocks {
            report.knock(addr, &knock);

            self.send(addr, knock).await?;

            trace!("sleeping {:?}", interval);
            sleep(interval).await;
        }

        Ok(())
    }

    async fn send(&self, addr: Ipv4Addr, knock: Knock) -> Result<(), KnockError> {
        let dst  = SocketAddrV4::new(addr, knock.port());
        let sock = self.open.open(&knock).map_err(|e| KnockError::socket(knock, e))?;

        match knock {
            Knock::TCP(..) => sock::tcp(sock, knock, dst).await,
            Knock::UDP(..) => sock::udp(sock, knock, dst),
        }
    }
}
