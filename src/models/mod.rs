pub mod brand;
pub mod card;
pub mod catalog;

pub use brand::*;
pub use card::*;
pub use catalog::*;
