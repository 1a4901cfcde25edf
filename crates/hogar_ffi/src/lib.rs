//! Flutter-facing bindings for the Mi Hogar core.

pub mod api;
