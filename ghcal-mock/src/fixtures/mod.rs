//! Synthetic markup shaped like the pages GitHub serves.

pub mod pages;
pub mod profiles;
