pub mod conversation;
pub mod label;
pub mod utterance;

pub use conversation::*;
pub use label::*;
pub use utterance::*;
