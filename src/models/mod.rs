//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.
//!
//! ```rust
//! use submerge::models::{Proxy, ProxyType};
//!
//! let proxy = Proxy::vless_construct("edge", "example.com", 443, "uuid", "tls");
//! assert_eq!(proxy.proxy_type(), ProxyType::Vless);
//! ```

mod aggregate;
mod proxy;

pub use aggregate::{dedupe, Aggregate, AggregateItem};
pub(crate) use aggregate::scalar_to_string;
pub use proxy::*;
