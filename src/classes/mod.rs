pub mod card;
pub mod set;

pub use card::{CardRecord, PocketCard};
pub use set::PocketSet;
