pub mod components;
pub mod renderer;
pub mod renders;
pub mod scopes;
pub mod template;
pub mod traits;
pub mod types;
pub mod visibility;

pub use components::*;
pub use renderer::*;
pub use renders::*;
pub use template::*;
pub use traits::*;
pub use types::*;
pub use visibility::*;
