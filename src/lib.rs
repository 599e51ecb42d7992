pub mod constants;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;

// Re-export the main proxy types for easier access
pub use models::{Proxy, ProxyExtra, ProxyType};

pub use interfaces::run;
pub use settings::Settings;
