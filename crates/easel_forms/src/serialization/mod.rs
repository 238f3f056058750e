pub mod encoding;
pub mod factory;
pub mod fragment;

pub use encoding::*;
pub use factory::*;
pub use fragment::*;
