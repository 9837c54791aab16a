//! # netpath
//!
//! An in-memory network of named hosts and directed, described links, with
//! fewest-hop path queries served over a small HTTP API.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install netpath
//! PORT=3000 netpath
//! curl -XPOST localhost:3000/host -d '{"name":"A"}'
//! curl localhost:3000/path/A/to/B
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use netpath::prelude::*;
//!
//! let mut network = Network::new();
//! network.add_host(Some(&NewHost::new("A"))).unwrap();
//! network.add_host(Some(&NewHost::new("B"))).unwrap();
//! network.add_link(Some(&NewLink::new("A", "B", "scp"))).unwrap();
//!
//! let path = network.path(Some("A"), Some("B")).unwrap();
//! assert_eq!(path.len(), 1);
//! ```
//!
//! ## Crate Structure
//!
//! - `netpath-core` - Network store, validation, error taxonomy, BFS path query
//! - `netpath-api` - actix-web routes and the JSON error envelope

// Re-export core types
pub use netpath_core::{
    Network, Link, NewHost, NewLink, Field,
    Error, ErrorKind, Result,
};

// Re-export API
pub use netpath_api::{RestApi, SharedNetwork, ApiError, ErrorBody};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Network, Link, NewHost, NewLink, Field,
        Error, ErrorKind, Result,
        RestApi, SharedNetwork,
    };
}
