//! Node identifier types.

use std::fmt;

#[cfg(feature = "codec")]
use bincode::{Decode, Encode};

/// A globally unique identifier naming a remote node.
///
/// The identifier combines the hash of the host the node runs on with the process identifier
/// of the node on that host. The all-zero value, [`NodeId::NONE`], denotes the absence of a node
/// and is never a valid key in the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub struct NodeId {
    process_id: u32,
    host_id: [u8; Self::HOST_ID_BYTES],
}

impl NodeId {
    /// The size of the host identifier in bytes.
    pub const HOST_ID_BYTES: usize = 20;

    /// The distinguished "no node" value.
    pub const NONE: NodeId = NodeId {
        process_id: 0,
        host_id: [0u8; Self::HOST_ID_BYTES],
    };

    /// Creates a new identifier from a process identifier and host identifier.
    pub fn new(process_id: u32, host_id: [u8; Self::HOST_ID_BYTES]) -> Self {
        Self {
            process_id,
            host_id,
        }
    }

    /// Returns the process identifier of the node.
    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    /// Returns the bytes backing the host identifier.
    pub fn host_id(&self) -> [u8; Self::HOST_ID_BYTES] {
        self.host_id
    }

    /// Returns `true` if this is the "no node" value.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    #[cfg(test)]
    /// Convenience function for working with small identifiers during testing.
    pub fn from_u16(raw: u16) -> Self {
        let mut host_id = [0u8; Self::HOST_ID_BYTES];
        host_id[..2].copy_from_slice(&raw.to_le_bytes());

        Self {
            process_id: raw.into(),
            host_id,
        }
    }

    #[doc(hidden)]
    /// Convenience function for generating random identifiers during testing.
    pub fn rand() -> Self {
        use rand::{thread_rng, Fill, Rng};

        let mut rng = thread_rng();
        let mut host_id = [0u8; Self::HOST_ID_BYTES];
        assert!(host_id.try_fill(&mut rng).is_ok());

        // A non-zero process id keeps us clear of NONE even for an all-zero host id.
        Self {
            process_id: rng.gen_range(1..=u32::MAX),
            host_id,
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("none");
        }

        write!(f, "{}#", self.process_id)?;
        for byte in self.host_id {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}
