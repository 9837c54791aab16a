//! # netpath API
//!
//! HTTP binding for the netpath network store. Routes marshal JSON in and
//! out of [`netpath_core::Network`] and translate its errors into the
//! `{status, title, detail}` envelope.

pub mod error;
pub mod rest;

pub use error::{ApiError, ErrorBody};
pub use rest::{RestApi, SharedNetwork};
