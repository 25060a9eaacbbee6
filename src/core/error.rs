//! Routing table error types.

use thiserror::Error;

use crate::core::handle::EndpointHandle;

/// Errors reported when a caller breaks the routing table's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("invalid endpoint handle: {0:?}")]
    InvalidHandle(EndpointHandle),

    #[error("the \"no node\" identifier can't be routed")]
    NoneNode,

    #[error("invalid communication state: {0}")]
    InvalidCommunication(u8),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::handle::ConnectionHandle;

    #[test]
    fn display() {
        let err = RoutingError::InvalidHandle(ConnectionHandle::INVALID.into());
        assert_eq!(
            err.to_string(),
            "invalid endpoint handle: Connection(ConnectionHandle(-1))"
        );

        let err = RoutingError::NoneNode;
        assert_eq!(err.to_string(), "the \"no node\" identifier can't be routed");

        let err = RoutingError::InvalidCommunication(3);
        assert_eq!(err.to_string(), "invalid communication state: 3");
    }
}
