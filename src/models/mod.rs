pub mod card;
pub mod deck;
pub mod record;
pub mod report;
pub mod set;
pub mod sub;

pub use card::*;
pub use deck::*;
pub use record::*;
pub use report::*;
pub use set::*;
pub use sub::*;
