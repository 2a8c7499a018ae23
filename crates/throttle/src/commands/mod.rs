pub mod preview;
pub mod validate;
