//! Core types and definitions for the Lastlight survival loop.
//!
//! This crate defines the vocabulary shared across all other crates:
//! phases, grades, multiplier bundles, tuning constants, commands, and
//! events. It has no dependency on any runtime or I/O layer.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod types;
