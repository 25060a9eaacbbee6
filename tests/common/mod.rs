use std::net::{IpAddr, Ipv4Addr};

use basp_routing::{AddressListing, ConnectionHandle, DatagramHandle, EndpointHandle, NodeId};
use tracing_subscriber::{fmt, EnvFilter};

#[allow(dead_code)]
pub fn enable_tracing() {
    // Several tests in one binary may try to install the subscriber.
    let _ = fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[allow(dead_code)]
pub fn conn(id: i64) -> EndpointHandle {
    ConnectionHandle::new(id).into()
}

#[allow(dead_code)]
pub fn dgram(id: i64) -> EndpointHandle {
    DatagramHandle::new(id).into()
}

/// Produces an identifier that sorts by `n`.
#[allow(dead_code)]
pub fn node(n: u32) -> NodeId {
    NodeId::new(n, [0xaa; NodeId::HOST_ID_BYTES])
}

#[allow(dead_code)]
pub fn listing(last_octets: &[u8]) -> AddressListing {
    last_octets
        .iter()
        .map(|&i| IpAddr::V4(Ipv4Addr::new(192, 168, 0, i)))
        .collect()
}
