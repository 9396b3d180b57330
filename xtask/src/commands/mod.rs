//! Command families.

pub mod docs;
