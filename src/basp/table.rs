use std::collections::{hash_map::Entry, HashMap};

use tracing::{debug, trace, warn};

use crate::{
    basp::config::{Config, ForwarderPolicy},
    core::{
        address::AddressListing, communication::Communication, error::RoutingError,
        handle::EndpointHandle, id::NodeId,
    },
};

/// Bundles what the table knows about a remote node.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    // Tracks the state to determine if messages can be sent or have to be buffered.
    status: Communication,
    // Interfaces of the node for sharing with neighbours.
    addresses: AddressListing,
    // The endpoint that first told us about the node.
    forwarder: Option<EndpointHandle>,
}

impl NodeInfo {
    /// Returns the communication state of the node.
    pub fn status(&self) -> Communication {
        self.status
    }

    /// Returns the addresses the node might be reachable at.
    pub fn addresses(&self) -> &AddressListing {
        &self.addresses
    }

    /// Returns the endpoint the node was learned through, if any.
    pub fn forwarder(&self) -> Option<EndpointHandle> {
        self.forwarder
    }
}

/// Stores routing information for a single broker participating as a peer, providing both
/// direct and indirect paths.
///
/// Direct routes are kept as an exact bijection between endpoint handles and node identifiers.
/// Every node the table has heard of, directly routed or not, has a [`NodeInfo`] entry which is
/// only ever removed by [`erase`](RoutingTable::erase).
#[derive(Debug, Default, Clone)]
pub struct RoutingTable {
    config: Config,
    // Maps live endpoint handles to the node they connect to.
    direct_by_hdl: HashMap<EndpointHandle, NodeId>,
    // The reverse of `direct_by_hdl`.
    direct_by_nid: HashMap<NodeId, EndpointHandle>,
    // Every known node (directly routed, forwarded or neither).
    node_information_base: HashMap<NodeId, NodeInfo>,
}

impl RoutingTable {
    /// Creates a new routing table with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new routing table with the supplied configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            direct_by_hdl: HashMap::with_capacity(config.capacity),
            direct_by_nid: HashMap::with_capacity(config.capacity),
            node_information_base: HashMap::with_capacity(config.capacity),
        }
    }

    /// Returns the configuration the table was created with.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Returns the node reachable via `hdl`, if `hdl` is a live direct route.
    pub fn lookup_node(&self, hdl: &EndpointHandle) -> Option<NodeId> {
        self.direct_by_hdl.get(hdl).copied()
    }

    /// Returns the handle for direct communication with `nid`, if there is one.
    pub fn lookup_handle(&self, nid: &NodeId) -> Option<EndpointHandle> {
        self.direct_by_nid.get(nid).copied()
    }

    /// Adds a new direct route to the table, replacing any route either side was part of.
    ///
    /// The node gets a default [`NodeInfo`] if it is unknown, its communication state is left
    /// untouched otherwise.
    ///
    /// If `nid` moves to a new handle, nodes it forwarded follow it to that handle. If `hdl` is
    /// reassigned to another node, forwarders naming `hdl` are cleared.
    ///
    /// # Panics
    ///
    /// Panics if `hdl` is invalid or `nid` is [`NodeId::NONE`]; see
    /// [`try_add`](RoutingTable::try_add) for the checked version.
    pub fn add(&mut self, hdl: EndpointHandle, nid: NodeId) {
        assert!(hdl.is_valid(), "{}", RoutingError::InvalidHandle(hdl));
        assert!(!nid.is_none(), "{}", RoutingError::NoneNode);

        self.insert_direct(hdl, nid);
    }

    /// Like [`add`](RoutingTable::add), but reports contract violations instead of panicking.
    /// The table is left untouched on error.
    pub fn try_add(&mut self, hdl: EndpointHandle, nid: NodeId) -> Result<(), RoutingError> {
        if !hdl.is_valid() {
            warn!(?hdl, %nid, "rejected direct route over an invalid handle");
            return Err(RoutingError::InvalidHandle(hdl));
        }

        if nid.is_none() {
            warn!(?hdl, "rejected direct route to the \"no node\" identifier");
            return Err(RoutingError::NoneNode);
        }

        self.insert_direct(hdl, nid);

        Ok(())
    }

    fn insert_direct(&mut self, hdl: EndpointHandle, nid: NodeId) {
        // Drop the stale reverse entries first so neither side ends up mapped twice.
        if let Some(old_nid) = self.direct_by_hdl.insert(hdl, nid) {
            if old_nid != nid {
                let _res = self.direct_by_nid.remove(&old_nid);
                debug_assert_eq!(_res, Some(hdl));

                // Whatever `old_nid` forwarded over `hdl` doesn't go through the new peer.
                let cleared = self.retarget_forwarders(&hdl, None);
                debug!(?hdl, %old_nid, cleared, "handle reassigned, dropped its previous direct route");
            }
        }

        if let Some(old_hdl) = self.direct_by_nid.insert(nid, hdl) {
            if old_hdl != hdl {
                let _res = self.direct_by_hdl.remove(&old_hdl);
                debug_assert_eq!(_res, Some(nid));

                // Same peer on a new endpoint, it still knows the nodes it told us about.
                let moved = self.retarget_forwarders(&old_hdl, Some(hdl));
                debug!(%nid, ?old_hdl, moved, "node moved to a new handle, dropped its previous direct route");
            }
        }

        self.node_information_base.entry(nid).or_default();

        debug!(?hdl, %nid, "added direct route");
    }

    // Replaces every recorded forwarder equal to `from` and returns how many were touched.
    fn retarget_forwarders(&mut self, from: &EndpointHandle, to: Option<EndpointHandle>) -> usize {
        let mut count = 0;
        for info in self.node_information_base.values_mut() {
            if info.forwarder == Some(*from) {
                info.forwarder = to;
                count += 1;
            }
        }

        count
    }

    /// Removes the direct route over `hdl` and calls `cb` for every node that became unreachable
    /// as a result, starting with the node `hdl` was assigned to.
    ///
    /// Nodes that were only known because `hdl` forwarded them are forgotten. Each node is
    /// reported at most once and nothing happens if `hdl` isn't a live direct route.
    pub fn erase<F>(&mut self, hdl: &EndpointHandle, mut cb: F)
    where
        F: FnMut(&NodeId),
    {
        let nid = match self.direct_by_hdl.remove(hdl) {
            Some(nid) => nid,
            None => return,
        };

        let _res = self.direct_by_nid.remove(&nid);
        debug_assert_eq!(_res, Some(*hdl));

        debug!(?hdl, %nid, "lost direct route");
        cb(&nid);

        // The node itself survives only if a different live endpoint told us about it.
        let still_forwarded = self
            .node_information_base
            .get(&nid)
            .and_then(|info| info.forwarder)
            .is_some_and(|fwd| fwd != *hdl && self.direct_by_hdl.contains_key(&fwd));

        if !still_forwarded {
            self.node_information_base.remove(&nid);
        }

        let mut orphans = vec![];
        for (id, info) in self.node_information_base.iter_mut() {
            if info.forwarder != Some(*hdl) {
                continue;
            }

            if self.direct_by_nid.contains_key(id) {
                // Still directly routed, only the forwarder is gone.
                info.forwarder = None;
            } else {
                orphans.push(*id);
            }
        }

        // Map iteration order is arbitrary, report in a stable one.
        orphans.sort_unstable();

        for id in orphans {
            self.node_information_base.remove(&id);
            trace!(?hdl, %id, "lost indirect route");
            cb(&id);
        }
    }

    /// Like [`erase`](RoutingTable::erase), but returns the nodes that became unreachable, in
    /// the order they would have been passed to the callback.
    pub fn erase_collect(&mut self, hdl: &EndpointHandle) -> Vec<NodeId> {
        let mut lost = vec![];
        self.erase(hdl, |nid| lost.push(*nid));

        lost
    }

    /// Queries whether `nid` is reachable, either directly or through the live endpoint that
    /// forwarded it.
    pub fn reachable(&self, nid: &NodeId) -> bool {
        if self.direct_by_nid.contains_key(nid) {
            return true;
        }

        self.forwarder(nid)
            .is_some_and(|fwd| self.direct_by_hdl.contains_key(&fwd))
    }

    /// Sets the communication state of `nid`, creating its entry if needed.
    ///
    /// Returns `true` if the table changed, `false` if the state was already set or `nid` is
    /// [`NodeId::NONE`].
    pub fn set_status(&mut self, nid: &NodeId, status: Communication) -> bool {
        if nid.is_none() {
            return false;
        }

        match self.node_information_base.entry(*nid) {
            Entry::Occupied(mut entry) => {
                let info = entry.get_mut();
                if info.status == status {
                    return false;
                }

                trace!(%nid, from = info.status.as_str(), to = status.as_str(), "status changed");
                info.status = status;
            }
            Entry::Vacant(entry) => {
                trace!(%nid, to = status.as_str(), "status set on new node");
                entry.insert(NodeInfo {
                    status,
                    ..Default::default()
                });
            }
        }

        true
    }

    /// Returns the communication state of `nid`, if it is known.
    pub fn status(&self, nid: &NodeId) -> Option<Communication> {
        self.node_information_base.get(nid).map(|info| info.status)
    }

    /// Records `hdl` as the endpoint that told us about `nid`, creating its entry if needed.
    ///
    /// Whether an existing forwarder gets replaced depends on the configured
    /// [`ForwarderPolicy`]. Returns `true` if the forwarder was written.
    pub fn set_forwarder(&mut self, nid: &NodeId, hdl: EndpointHandle) -> bool {
        if nid.is_none() || !hdl.is_valid() {
            return false;
        }

        let policy = self.config.forwarder_policy;
        let info = self.node_information_base.entry(*nid).or_default();

        let write = match (info.forwarder, policy) {
            (None, _) => true,
            (Some(_), ForwarderPolicy::FirstWins) => false,
            (Some(current), ForwarderPolicy::Overwrite) => current != hdl,
        };

        if write {
            trace!(%nid, ?hdl, previous = ?info.forwarder, "forwarder set");
            info.forwarder = Some(hdl);
        }

        write
    }

    /// Returns the endpoint that told us about `nid`, if any.
    pub fn forwarder(&self, nid: &NodeId) -> Option<EndpointHandle> {
        self.node_information_base
            .get(nid)
            .and_then(|info| info.forwarder)
    }

    /// Adds `addrs` to the addresses to reach `nid`, creating its entry if needed.
    ///
    /// Returns `true` if the table changed, i.e. the entry was created or the listing grew.
    pub fn add_addresses(&mut self, nid: &NodeId, addrs: AddressListing) -> bool {
        if nid.is_none() {
            return false;
        }

        match self.node_information_base.entry(*nid) {
            Entry::Occupied(mut entry) => {
                let changed = entry.get_mut().addresses.merge(&addrs);
                if changed {
                    trace!(%nid, "merged addresses");
                }

                changed
            }
            Entry::Vacant(entry) => {
                trace!(%nid, count = addrs.len(), "addresses set on new node");
                entry.insert(NodeInfo {
                    addresses: addrs,
                    ..Default::default()
                });

                true
            }
        }
    }

    /// Returns the addresses to reach `nid`, if it is known.
    pub fn addresses(&self, nid: &NodeId) -> Option<&AddressListing> {
        self.node_information_base
            .get(nid)
            .map(|info| &info.addresses)
    }

    /// Returns everything known about `nid`.
    pub fn node_info(&self, nid: &NodeId) -> Option<&NodeInfo> {
        self.node_information_base.get(nid)
    }

    /// Returns the nodes whose recorded forwarder is `hdl`, sorted.
    pub fn indirect_nodes(&self, hdl: &EndpointHandle) -> Vec<NodeId> {
        let mut ids: Vec<_> = self
            .node_information_base
            .iter()
            .filter(|(_, info)| info.forwarder == Some(*hdl))
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();

        ids
    }

    /// Iterates over the live direct routes.
    pub fn direct_routes(&self) -> impl Iterator<Item = (&EndpointHandle, &NodeId)> {
        self.direct_by_hdl.iter()
    }

    /// Iterates over every known node.
    pub fn known_nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.node_information_base.keys()
    }

    /// Returns the number of live direct routes.
    pub fn num_direct(&self) -> usize {
        self.direct_by_hdl.len()
    }

    /// Returns the number of known nodes.
    pub fn num_known(&self) -> usize {
        self.node_information_base.len()
    }

    /// Returns `true` if no node is known.
    pub fn is_empty(&self) -> bool {
        self.node_information_base.is_empty()
    }
}
