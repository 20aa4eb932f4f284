//! Core types for fxlog.
//!
//! This crate provides the building blocks the logger is assembled from:
//! - [`Error`] and [`Result`] for every fallible logging operation
//! - [`Value`], the argument model, and [`inspect`] for structural rendering
//! - [`Clock`] with a system and a manually driven implementation
//! - [`logging`] targets for the crate's own diagnostics

#![forbid(unsafe_code)]

mod clock;
mod error;
pub mod logging;
mod value;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{BoxError, Error, Result};
pub use value::{DEFAULT_DEPTH, Value, inspect, inspect_depth};
