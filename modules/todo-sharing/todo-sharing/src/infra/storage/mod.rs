//! Document layout and record mapping for the `users/` tree.

pub mod paths;
pub mod records;
