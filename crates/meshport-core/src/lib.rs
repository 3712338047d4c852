//! meshport Core - Core types shared by the meshport crates
//!
//! This crate provides:
//! - Mathematical primitives (re-exported from glam)
//! - The coordinate convention applied to imported geometry
//! - A plain RGBA color type

pub mod convention;
pub mod types;

pub use convention::to_render_space;
pub use glam::Vec3;
pub use types::Color;
