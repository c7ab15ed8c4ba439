//! # textcycle-core
//!
//! Core library for textcycle, a text overlay rotator for streaming software.
//!
//! This crate provides:
//! - Rotation state over a list of strings ([`Rotator`])
//! - Text sources backed by files that OBS-style text sources read ([`FileSourceHost`])
//! - Repeating timers behind a [`Scheduler`] trait, with a manual scheduler for tests
//! - The [`Cycler`] that ties settings, rotation, and source together
//! - Hotkey bindings and their persistence
//! - TOML configuration

pub mod config;
pub mod cycler;
pub mod error;
pub mod hotkey;
pub mod rotation;
pub mod scheduler;
pub mod settings;
pub mod signal;
pub mod source;

pub use config::{Config, HotkeyConfig};
pub use cycler::{Cycler, SettingsChange, SharedCycler, TickOutcome, lock, schedule};
pub use error::{Error, Result};
pub use hotkey::{HotkeyBinding, HotkeyStore, Modifier};
pub use rotation::Rotator;
pub use scheduler::{ManualScheduler, Scheduler, Task, ThreadScheduler};
pub use settings::{CycleSettings, parse_text_list};
pub use signal::StopSignal;
pub use source::{FileSourceHost, SourceHost};
