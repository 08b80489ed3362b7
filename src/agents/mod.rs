mod inference;
mod language;

pub use inference::*;
pub use language::*;
