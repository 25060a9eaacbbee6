//! A peer routing table for node-to-node actor messaging.
//!
//! The [`RoutingTable`] tracks, for each remote node, how to reach it: over a direct endpoint
//! (a stream connection or a datagram endpoint), or indirectly through the endpoint that first
//! told us about it. It also records the communication state and the known addresses of each
//! node.
//!
//! Losing a direct endpoint cascades: the node it led to and every node only known through it
//! are reported to the caller and forgotten, so no route to an unreachable node is left behind.
//!
//! The table never performs I/O. It is driven by the session layer on connection, handshake,
//! introduction and disconnection events. [`SyncRoutingTable`] (feature `sync`) wraps it for
//! shared use.
//!
//! ```
//! use basp_routing::{Communication, ConnectionHandle, EndpointHandle, NodeId, RoutingTable};
//!
//! let mut rt = RoutingTable::new();
//! let hdl = EndpointHandle::from(ConnectionHandle::new(1));
//! let (peer, introduced) = (NodeId::rand(), NodeId::rand());
//!
//! rt.add(hdl, peer);
//! rt.set_status(&peer, Communication::Established);
//! rt.set_forwarder(&introduced, hdl);
//! assert!(rt.reachable(&introduced));
//!
//! let mut lost = vec![];
//! rt.erase(&hdl, |nid| lost.push(*nid));
//! assert_eq!(lost, vec![peer, introduced]);
//! ```

#![cfg_attr(doc_cfg, feature(doc_cfg))]

pub mod basp;

mod core;

#[cfg(feature = "sync")]
pub use crate::basp::SyncRoutingTable;
pub use crate::{
    basp::{Config, ForwarderPolicy, NodeInfo, RoutingTable},
    core::{
        address::{AddressListing, Network},
        communication::Communication,
        error::RoutingError,
        handle::{ConnectionHandle, DatagramHandle, EndpointHandle},
        id::NodeId,
    },
};
