pub mod bitmap;
pub mod control;
pub mod errors;
pub mod image_control;
pub mod properties;
pub mod render;
pub mod serialization;

pub use bitmap::*;
pub use control::*;
pub use errors::*;
pub use image_control::*;
pub use properties::*;
pub use render::*;
