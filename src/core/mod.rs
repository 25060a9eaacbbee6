//! Foundational and often-reused types.

pub(crate) mod address;
pub(crate) mod communication;
pub(crate) mod error;
pub(crate) mod handle;
pub(crate) mod id;
