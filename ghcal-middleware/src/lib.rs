#![doc = include_str!("../README.md")]
//! ghcal-middleware
//!
//! Process-wide response cache for serialized contribution reports.

mod cache;

pub use crate::cache::{CachedReport, ResponseCache};
