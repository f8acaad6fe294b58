//! Core engine types and utilities for Island Defense.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial helpers
//! - Frame time management
//! - Mesh data behind the `Shape` capability trait
//! - The scene sink the gameplay code draws through

pub mod mesh;
pub mod scene;
pub mod time;
pub mod transform;

pub use mesh::*;
pub use scene::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
