//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod bind;
pub mod config;
pub mod run;
pub mod sources;
