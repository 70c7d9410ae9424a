pub mod builder;
pub mod module;
pub mod types;

pub use builder::*;
pub use module::*;
pub use types::*;
