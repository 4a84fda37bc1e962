//! Core domain types.

mod date;
mod frequency;
mod option_type;
mod tenor;

pub use date::Date;
pub use frequency::Frequency;
pub use option_type::{ExerciseStyle, OptionType};
pub use tenor::{Tenor, TenorUnit};
