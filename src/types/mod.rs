//! Data types for the table builder.

mod axis;
mod catalog;
mod cell;
mod question;
mod table;

pub use axis::*;
pub use catalog::*;
pub use cell::*;
pub use question::*;
pub use table::*;
