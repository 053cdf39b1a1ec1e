//! Command implementations.

pub mod create;
pub mod fetch;
pub mod join;
pub mod send;
pub mod watch;
