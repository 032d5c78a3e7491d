//! Platform-neutral building blocks shared by the results views.

pub mod catalog;
pub mod config;
pub mod format;
pub mod platform;
pub mod readiness;
pub mod storage;
