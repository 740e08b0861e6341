//! Domain types shared across the Beats al Vuelo marketplace backend.
//!
//! - [`error`] -- the domain error taxonomy.
//! - [`licensing`] -- license tiers and their delivery bundles.
//! - [`money`] -- minor-unit currency handling and the marketplace fee.
//! - [`roles`] -- account role constants.
//! - [`slug`] -- URL slug generation for producers and beats.

pub mod error;
pub mod licensing;
pub mod money;
pub mod roles;
pub mod slug;
pub mod types;
