use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    basp::{
        config::Config,
        table::{NodeInfo, RoutingTable},
    },
    core::{
        address::AddressListing, communication::Communication, error::RoutingError,
        handle::EndpointHandle, id::NodeId,
    },
};

#[cfg_attr(doc_cfg, doc(cfg(feature = "sync")))]
#[derive(Debug, Default, Clone)]
/// A routing table suitable for sharing between tasks and threads.
///
/// It wraps [`RoutingTable`] in a lock held for the duration of each call. Erase notifications
/// are delivered after the lock is released, so callbacks are free to call back into the table.
pub struct SyncRoutingTable {
    routing_table: Arc<RwLock<RoutingTable>>,
}

impl SyncRoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            routing_table: Arc::new(RwLock::new(RoutingTable::with_config(config))),
        }
    }

    pub fn config(&self) -> Config {
        self.routing_table.read().config()
    }

    pub fn lookup_node(&self, hdl: &EndpointHandle) -> Option<NodeId> {
        self.routing_table.read().lookup_node(hdl)
    }

    pub fn lookup_handle(&self, nid: &NodeId) -> Option<EndpointHandle> {
        self.routing_table.read().lookup_handle(nid)
    }

    /// See [`RoutingTable::add`].
    pub fn add(&self, hdl: EndpointHandle, nid: NodeId) {
        self.routing_table.write().add(hdl, nid)
    }

    pub fn try_add(&self, hdl: EndpointHandle, nid: NodeId) -> Result<(), RoutingError> {
        self.routing_table.write().try_add(hdl, nid)
    }

    /// Removes the direct route over `hdl` and returns the nodes that became unreachable, the
    /// node `hdl` was assigned to first.
    pub fn erase(&self, hdl: &EndpointHandle) -> Vec<NodeId> {
        self.routing_table.write().erase_collect(hdl)
    }

    /// Like [`erase`](SyncRoutingTable::erase), but calls `cb` for each lost node once the lock
    /// has been released.
    pub fn erase_with<F>(&self, hdl: &EndpointHandle, mut cb: F)
    where
        F: FnMut(&NodeId),
    {
        // The write lock is released once `erase` returns.
        let lost = self.erase(hdl);

        for nid in &lost {
            cb(nid);
        }
    }

    pub fn reachable(&self, nid: &NodeId) -> bool {
        self.routing_table.read().reachable(nid)
    }

    pub fn set_status(&self, nid: &NodeId, status: Communication) -> bool {
        self.routing_table.write().set_status(nid, status)
    }

    pub fn status(&self, nid: &NodeId) -> Option<Communication> {
        self.routing_table.read().status(nid)
    }

    pub fn set_forwarder(&self, nid: &NodeId, hdl: EndpointHandle) -> bool {
        self.routing_table.write().set_forwarder(nid, hdl)
    }

    pub fn forwarder(&self, nid: &NodeId) -> Option<EndpointHandle> {
        self.routing_table.read().forwarder(nid)
    }

    pub fn add_addresses(&self, nid: &NodeId, addrs: AddressListing) -> bool {
        self.routing_table.write().add_addresses(nid, addrs)
    }

    /// Returns a copy of the addresses to reach `nid`, the lock can't outlive the call.
    pub fn addresses(&self, nid: &NodeId) -> Option<AddressListing> {
        self.routing_table.read().addresses(nid).cloned()
    }

    pub fn node_info(&self, nid: &NodeId) -> Option<NodeInfo> {
        self.routing_table.read().node_info(nid).cloned()
    }

    pub fn indirect_nodes(&self, hdl: &EndpointHandle) -> Vec<NodeId> {
        self.routing_table.read().indirect_nodes(hdl)
    }

    /// Returns a snapshot of the live direct routes.
    pub fn direct_routes(&self) -> Vec<(EndpointHandle, NodeId)> {
        self.routing_table
            .read()
            .direct_routes()
            .map(|(&hdl, &nid)| (hdl, nid))
            .collect()
    }

    pub fn num_direct(&self) -> usize {
        self.routing_table.read().num_direct()
    }

    pub fn num_known(&self) -> usize {
        self.routing_table.read().num_known()
    }

    pub fn is_empty(&self) -> bool {
        self.routing_table.read().is_empty()
    }

    /// Runs `f` with exclusive access to the underlying table, for batching several updates
    /// under one lock.
    pub fn with_table<R>(&self, f: impl FnOnce(&mut RoutingTable) -> R) -> R {
        f(&mut self.routing_table.write())
    }
}
