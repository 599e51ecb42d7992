pub mod base64;
pub mod file;
pub mod http;

pub use file::{file_exists, file_get, file_write};
pub use http::{Fetcher, HttpFetcher};
