//! # netpath Core
//!
//! Core library for the netpath network store.
//!
//! This crate provides the data model and the query engine:
//!
//! - [`Network`] - Directed host/link graph with validated mutations
//! - [`Link`] - A described edge, also the unit of a computed path
//! - [`NewHost`] / [`NewLink`] - Mutation requests, validated field by field
//! - [`Field`] - Raw request field; mistyped values survive until validation
//! - [`Error`] - Typed failures carrying the offending argument or host
//!
//! ## Example
//!
//! ```rust
//! use netpath_core::{Link, Network, NewHost, NewLink};
//!
//! let mut network = Network::new();
//! for name in ["A", "B", "C"] {
//!     network.add_host(Some(&NewHost::new(name))).unwrap();
//! }
//! network.add_link(Some(&NewLink::new("A", "B", "scp"))).unwrap();
//! network.add_link(Some(&NewLink::new("B", "C", "ftp"))).unwrap();
//!
//! let path = network.path(Some("A"), Some("C")).unwrap();
//! assert_eq!(path, vec![Link::new("A", "B", "scp"), Link::new("B", "C", "ftp")]);
//! ```

pub mod error;
pub mod graph;
pub mod network;
pub mod validate;

pub use error::{Error, ErrorKind, Result};
pub use graph::{Field, Link, NewHost, NewLink};
pub use network::Network;
pub use validate::{FieldViolation, Rule, Violations};
