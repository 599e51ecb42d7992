pub mod aggregator;

pub use aggregator::{collect, load_sources, run, Collected, OutputTarget, RunReport};
