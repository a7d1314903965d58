pub mod encoder;
pub mod types;
