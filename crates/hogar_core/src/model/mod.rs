//! Domain model for household gamification.
//!
//! # Responsibility
//! - Define the value types exchanged between progression, evaluation and storage.
//! - Fix the persisted JSON shape of each type.
//!
//! # Invariants
//! - Every type is passed by value; no component holds a shared mutable reference.
//! - `Profile` is a singleton per installation.

pub mod achievement;
pub mod profile;
pub mod task;
