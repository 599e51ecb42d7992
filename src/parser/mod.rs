//! Turning subscription bodies into nodes.

pub mod clash;
pub mod detect;
pub mod error;
pub mod explodes;
pub mod fields;
pub mod subparser;

pub use detect::{classify, ContentKind};
pub use error::ParseError;
pub use explodes::explode;
pub use subparser::{parse_content, SourceContent, SourceEntry};
