//! Address listings shared between peers.

use std::{
    collections::{BTreeMap, BTreeSet},
    net::IpAddr,
};

#[cfg(feature = "codec")]
use bincode::{Decode, Encode};

/// The network protocol an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub enum Network {
    Ipv4,
    Ipv6,
}

impl Network {
    /// Returns the network the address belongs to.
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Network::Ipv4,
            IpAddr::V6(_) => Network::Ipv6,
        }
    }
}

/// The interfaces at which a node might be reachable, grouped by network.
///
/// A listing behaves like a set: the same address can only appear once and merging is a union.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub struct AddressListing {
    addrs: BTreeMap<Network, BTreeSet<IpAddr>>,
}

impl AddressListing {
    /// Creates an empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the address under its network, returning `false` if it was already listed.
    pub fn insert(&mut self, addr: IpAddr) -> bool {
        self.addrs.entry(Network::of(&addr)).or_default().insert(addr)
    }

    /// Merges `other` into this listing, returning `true` if any address was new.
    pub fn merge(&mut self, other: &AddressListing) -> bool {
        let mut changed = false;
        for addr in other.iter() {
            changed |= self.insert(addr);
        }

        changed
    }

    /// Returns the addresses listed for the network, if any.
    pub fn get(&self, network: Network) -> Option<&BTreeSet<IpAddr>> {
        self.addrs.get(&network)
    }

    pub fn contains(&self, addr: &IpAddr) -> bool {
        self.addrs
            .get(&Network::of(addr))
            .is_some_and(|set| set.contains(addr))
    }

    /// Iterates over all listed addresses, IPv4 first.
    pub fn iter(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.addrs.values().flat_map(|set| set.iter().copied())
    }

    /// Returns the total number of listed addresses.
    pub fn len(&self) -> usize {
        self.addrs.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        // Empty sets are never left behind by `insert`, but a decoded listing may carry them.
        self.addrs.values().all(BTreeSet::is_empty)
    }
}

impl FromIterator<IpAddr> for AddressListing {
    fn from_iter<I: IntoIterator<Item = IpAddr>>(iter: I) -> Self {
        let mut listing = AddressListing::new();
        for addr in iter {
            listing.insert(addr);
        }

        listing
    }
}

impl Extend<IpAddr> for AddressListing {
    fn extend<I: IntoIterator<Item = IpAddr>>(&mut self, iter: I) {
        for addr in iter {
            self.insert(addr);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr};

    use super::*;

    fn v4(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn insert_groups_by_network() {
        let mut listing = AddressListing::new();
        assert!(listing.is_empty());

        assert!(listing.insert(v4(1)));
        assert!(listing.insert(IpAddr::V6(Ipv6Addr::LOCALHOST)));
        // Duplicate.
        assert!(!listing.insert(v4(1)));

        assert_eq!(listing.len(), 2);
        assert_eq!(listing.get(Network::Ipv4).unwrap().len(), 1);
        assert_eq!(listing.get(Network::Ipv6).unwrap().len(), 1);
        assert!(listing.contains(&v4(1)));
        assert!(!listing.contains(&v4(2)));
    }

    #[test]
    fn merge() {
        let mut listing: AddressListing = [v4(1), v4(2)].into_iter().collect();
        let other: AddressListing = [v4(2), v4(3)].into_iter().collect();

        assert!(listing.merge(&other));
        assert_eq!(listing.iter().collect::<Vec<_>>(), vec![v4(1), v4(2), v4(3)]);

        // Merging the same data again changes nothing.
        assert!(!listing.merge(&other));
        assert_eq!(listing.len(), 3);
    }

    #[test]
    fn merge_empty() {
        let mut listing: AddressListing = [v4(1)].into_iter().collect();
        assert!(!listing.merge(&AddressListing::new()));
        assert_eq!(listing.len(), 1);
    }

    #[test]
    fn iter_orders_ipv4_first() {
        let mut listing = AddressListing::new();
        listing.extend([IpAddr::V6(Ipv6Addr::LOCALHOST), v4(9)]);

        assert_eq!(
            listing.iter().collect::<Vec<_>>(),
            vec![v4(9), IpAddr::V6(Ipv6Addr::LOCALHOST)]
        );
    }
}
