pub mod cache;
pub mod config;
pub mod consts;
pub mod error;
pub mod filter;
pub mod roster;
pub mod session;
pub mod slots;
pub mod stats;
// cmd and reports belong to the binary (main.rs).

pub use self::error::{RfResult, RosterError};
