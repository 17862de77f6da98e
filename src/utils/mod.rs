//! Shared helpers for dates, process execution, paths and pluralization.

pub mod date;
pub mod exec;
pub mod path;
pub mod platform;
pub mod plural;

pub use plural::plural_count;
