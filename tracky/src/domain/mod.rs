mod catalog;
mod time_entry;
mod time_span;

pub use catalog::*;
pub use time_entry::*;
pub use time_span::*;
