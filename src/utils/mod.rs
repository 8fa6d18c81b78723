pub mod encoding;
pub mod normalizer;
pub mod sort;
