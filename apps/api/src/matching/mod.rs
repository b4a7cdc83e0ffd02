pub mod analyzer;
pub mod chunker;
pub mod handlers;
pub mod normalizer;
pub mod scorer;
pub mod store;
pub mod vectors;
