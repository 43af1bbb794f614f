pub mod fuzzy;
pub mod normalize;

pub use fuzzy::*;
pub use normalize::*;
