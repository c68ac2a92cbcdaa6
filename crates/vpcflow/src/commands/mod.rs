pub mod list;
pub mod synth;
pub mod validate;
