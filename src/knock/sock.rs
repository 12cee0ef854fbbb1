use std::io::{self, ErrorKind};
use std::net::SocketAddrV4;
use std::time::Duration;
use libc::{EBADF, EINPROGRESS, ENOBUFS, ENOMEM, ENOTSOCK};
use log::debug;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tokio::net::TcpStream;
use tokio::time::timeout;
use crate::Bind;
use super::error::KnockError;
use super::probe::Knock;

/// Upper bound on the wait for a TCP connect to make progress. Independent
/// of the knock interval.
pub const CONNECT_WAIT: Duration = Duration::from_millis(200);

/// Allocates the socket for a single knock.
pub trait Open {
    fn open(&self, knock: &Knock) -> io::Result<Socket>;
}

#[derive(Clone, Debug, Default)]
pub struct Sockets {
    bind: Bind,
}

impl Sockets {
    pub fn new(bind: &Bind) -> Self {
        Self { bind: bind.clone() }
    }
}

impl Open for Sockets {
    fn open(&self, knock: &Knock) -> io::Result<Socket> {
        let ipv4 = Domain::IPV4;

        let sock = match knock {
            Knock::TCP(..) => Socket::new(ipv4, Type::STREAM, Some(Protocol::TCP))?,
            Knock::UDP(..) => Socket::new(ipv4, Type::DGRAM, Some(Protocol::UDP))?,
        };

        if self.bind.is_set() {
            sock.bind(&self.bind.sa4().into())?;
        }

        Ok(sock)
    }
}

pub async fn tcp(sock: Socket, knock: Knock, dst: SocketAddrV4) -> Result<(), KnockError> {
    sock.set_nonblocking(true).map_err(|e| KnockError::socket(knock, e))?;

    match sock.connect(&SockAddr::from(dst)) {
        Ok(())                    => {}
        Err(e) if in_progress(&e) => {}
        Err(e) => {
            debug!("{} connect: {}", knock, e);
            return Ok(());
        }
    }

    let stream = TcpStream::from_std(sock.into()).map_err(|e| {
        KnockError::socket(knock, e)
    })?;

    match timeout(CONNECT_WAIT, stream.writable()).await {
        Ok(Ok(())) => match stream.peer_addr() {
            Ok(peer) => debug!("{} connected to {}", knock, peer),
            Err(_)   => debug!("{} not accepted", knock),
        },
        Ok(Err(e)) => debug!("{} poll: {}", knock, e),
        Err(_)     => debug!("{} pending after {:?}", knock, CONNECT_WAIT),
    }

    Ok(())
}

pub fn udp(sock: Socket, knock: Knock, dst: SocketAddrV4) -> Result<(), KnockError> {
    sock.set_nonblocking(true).map_err(|e| KnockError::socket(knock, e))?;

    match sock.send_to(&[], &SockAddr::from(dst)) {
        Ok(n)                   => debug!("{} sent {} bytes", knock, n),
        Err(e) if local(&e)     => return Err(KnockError::send(knock, e)),
        Err(e)                  => debug!("{} send: {}", knock, e),
    }

    Ok(())
}

fn in_progress(e: &io::Error) -> bool {
    e.raw_os_error() == Some(EINPROGRESS) || e.kind() == ErrorKind::WouldBlock
}

// the datagram never left this host; anything else is a delivery outcome
fn local(e: &io::Error) -> bool {
    matches!(e.raw_os_error(), Some(ENOBUFS) | Some(ENOMEM) | Some(EBADF) | Some(ENOTSOCK))
}
