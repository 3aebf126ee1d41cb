//! Confirmation probability estimation for waitlisted railway tickets.
//!
//! The [`prediction`] module carries the scoring engine and its delivery
//! surface; [`config`], [`telemetry`], and [`error`] provide the service
//! plumbing shared by the binary.

pub mod config;
pub mod error;
pub mod prediction;
pub mod telemetry;
