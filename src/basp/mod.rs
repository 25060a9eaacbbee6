//! The peer routing table.

mod config;
#[cfg(feature = "sync")]
mod sync;
mod table;

pub use config::{Config, ForwarderPolicy};
#[cfg(feature = "sync")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "sync")))]
pub use sync::SyncRoutingTable;
pub use table::{NodeInfo, RoutingTable};
