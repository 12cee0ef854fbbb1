use std::net::Ipv4Addr;
use super::probe::Knock;

/// Progress hook, called once per knock before it is sent.
pub trait Report {
    fn knock(&self, addr: Ipv4Addr, knock: &Knock);
}

impl<F: Fn(Ipv4Addr, &Knock)> Report for F {
    fn knock(&self, addr: Ipv4Addr, knock: &Knock) {
        self(addr, knock)
    }
}

/// Discards progress.
#[derive(Debug, Default)]
pub struct Quiet;

impl Report for Quiet {
    fn knock(&self, _addr: Ipv4Addr, _knock: &Knock) {}
}
