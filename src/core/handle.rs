//! Transport endpoint handles.
//!
//! The transport layer hands out handles for stream connections and datagram endpoints. The
//! routing table indexes both through [`EndpointHandle`], whose equality and hash include the
//! transport kind so a stream handle and a datagram handle never alias, even when they share a
//! raw id.

#[cfg(feature = "codec")]
use bincode::{Decode, Encode};

const INVALID_ID: i64 = -1;

/// A handle to a stream-oriented connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub struct ConnectionHandle(i64);

/// A handle to a datagram-oriented endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub struct DatagramHandle(i64);

macro_rules! impl_handle {
    ($handle:ident) => {
        impl $handle {
            /// The handle that never refers to a live endpoint.
            pub const INVALID: $handle = $handle(INVALID_ID);

            /// Creates a handle from the transport layer's raw id.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw id of the handle.
            pub fn id(&self) -> i64 {
                self.0
            }

            /// Returns `false` for the invalid handle.
            pub fn is_valid(&self) -> bool {
                self.0 != INVALID_ID
            }
        }

        impl Default for $handle {
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

impl_handle!(ConnectionHandle);
impl_handle!(DatagramHandle);

/// Either kind of transport handle, unified for indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "codec", derive(Encode, Decode))]
pub enum EndpointHandle {
    /// A stream connection.
    Connection(ConnectionHandle),
    /// A datagram endpoint.
    Datagram(DatagramHandle),
}

impl EndpointHandle {
    /// Returns the raw id of the wrapped handle.
    pub fn id(&self) -> i64 {
        match self {
            EndpointHandle::Connection(hdl) => hdl.id(),
            EndpointHandle::Datagram(hdl) => hdl.id(),
        }
    }

    /// Returns `false` if the wrapped handle is the invalid handle for its kind.
    pub fn is_valid(&self) -> bool {
        match self {
            EndpointHandle::Connection(hdl) => hdl.is_valid(),
            EndpointHandle::Datagram(hdl) => hdl.is_valid(),
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, EndpointHandle::Connection(_))
    }

    pub fn is_datagram(&self) -> bool {
        matches!(self, EndpointHandle::Datagram(_))
    }
}

impl From<ConnectionHandle> for EndpointHandle {
    fn from(hdl: ConnectionHandle) -> Self {
        EndpointHandle::Connection(hdl)
    }
}

impl From<DatagramHandle> for EndpointHandle {
    fn from(hdl: DatagramHandle) -> Self {
        EndpointHandle::Datagram(hdl)
    }
}
