//! Schedule selection and dynamic pricing engine.
//!
//! This crate turns a guest's selected weekdays into a validated, contiguous
//! run of nights and prices it for a listing under the nightly, weekly or
//! monthly rental model, across reservation spans and recurring weekly
//! patterns.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod schedule;
