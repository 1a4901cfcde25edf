//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate pure gamification calls and gateway persistence.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod gamification_service;
pub mod task_service;
