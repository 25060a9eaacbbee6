//! Per-node communication state.

#[cfg(feature = "codec")]
use bincode::{Decode, Encode};

use crate::core::error::RoutingError;

/// Describes the communication state for a remote node.
///
/// The state is orthogonal to whether the node is routed directly or indirectly: the table
/// records it as told and places no ordering constraint on transitions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub enum Communication {
    /// No usable path is currently known to be live.
    #[default]
    Unavailable,
    /// A path exists but the peer hasn't confirmed readiness yet, messages should be buffered.
    Pending,
    /// Ready for application traffic.
    Established,
}

impl Communication {
    /// Returns the raw protocol code for the state.
    pub fn code(&self) -> u8 {
        match self {
            Communication::Unavailable => 0,
            Communication::Pending => 1,
            Communication::Established => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Communication::Unavailable => "unavailable",
            Communication::Pending => "pending",
            Communication::Established => "established",
        }
    }
}

impl TryFrom<u8> for Communication {
    type Error = RoutingError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Communication::Unavailable),
            1 => Ok(Communication::Pending),
            2 => Ok(Communication::Established),
            code => Err(RoutingError::InvalidCommunication(code)),
        }
    }
}
