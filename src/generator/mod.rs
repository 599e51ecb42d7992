//! Output formats built from the aggregate.

pub mod config;
pub mod error;

pub use config::formats::clash::proxy_to_clash;
pub use config::formats::single::{proxy_to_single, proxy_to_uri};
pub use config::formats::v2ray::proxy_to_v2ray;
pub use error::EmitError;
