/// Instruction builders for token launches
pub mod mint;

pub use mint::*;
