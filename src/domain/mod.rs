pub mod category;
pub mod common;
pub mod expense;

pub use category::{CategoryLabel, CategorySet};
pub use common::{Clock, FixedClock, SystemClock};
pub use expense::{ExpenseEntry, OwnerId};
