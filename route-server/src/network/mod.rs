//! Transit network data provider.
//!
//! Loads the network dataset from a file or URL into an immutable
//! [`NetworkSnapshot`], exposes typed lookups through [`NetworkView`], and
//! keeps a refreshable shared handle for the web layer.

mod catalog;
mod client;
mod error;
mod shared;
mod snapshot;

pub use catalog::{CatalogEntry, catalog};
pub use client::{NetworkClient, NetworkClientConfig, NetworkSource};
pub use error::{LookupError, NetworkError};
pub use shared::SharedNetwork;
pub use snapshot::{NetworkSnapshot, NetworkView};
