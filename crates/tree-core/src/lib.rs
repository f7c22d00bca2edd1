pub mod animation;
pub mod color;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod scene;
pub mod viewport;

pub use animation::*;
pub use constants::*;
pub use error::*;
pub use gesture::*;
pub use scene::*;
pub use viewport::*;

// Shader bundled as a string constant
pub static TREE_WGSL: &str = include_str!("../shaders/tree.wgsl");
