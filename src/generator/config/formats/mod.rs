pub mod clash;
pub mod single;
pub mod v2ray;

pub use clash::proxy_to_clash;
pub use single::proxy_to_single;
pub use v2ray::proxy_to_v2ray;
