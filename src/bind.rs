use std::net::*;

#[derive(Clone, Debug, Default)]
pub struct Bind {
    ip4: Option<Ipv4Addr>,
}

impl Bind {
    pub fn sa4(&self) -> SocketAddr {
        let addr = self.ip4.unwrap_or(Ipv4Addr::UNSPECIFIED);
        SocketAddr::V4(SocketAddrV4::new(addr, 0))
    }

    pub fn set(&mut self, addr: Ipv4Addr) {
        self.ip4 = Some(addr);
    }

    pub fn is_set(&self) -> bool {
        self.ip4.is_some()
    }
}
