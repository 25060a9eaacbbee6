//! Routing table configuration.

/// Decides what happens when a forwarder is set for a node that already has one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ForwarderPolicy {
    /// Keep the endpoint that first mentioned the node.
    #[default]
    FirstWins,
    /// Replace the recorded forwarder with the most recent one.
    Overwrite,
}

/// Configuration for a [`RoutingTable`](crate::RoutingTable).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The write policy for forwarders.
    pub forwarder_policy: ForwarderPolicy,
    /// The number of nodes to reserve space for up front.
    pub capacity: usize,
}

impl Config {
    /// Creates a configuration with the given forwarder policy and node capacity.
    pub fn new(forwarder_policy: ForwarderPolicy, capacity: usize) -> Self {
        Self {
            forwarder_policy,
            capacity,
        }
    }
}
