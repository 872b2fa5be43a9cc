//! Geometry utilities for camera motion.
//!
//! This module provides:
//! - [`linalg`]: camera basis recovery and axis-angle rotation
//! - [`raycast`]: ray versus bounding-box collision clamping
//! - [`constraints`]: the height → distance → raycast clamping pipeline

pub mod constraints;
pub mod linalg;
pub mod raycast;

pub use constraints::{clamp_distance, clamp_height, constrain_position};
pub use linalg::{camera_basis, rotate_about, CameraBasis, WORLD_UP};
pub use raycast::{clamp_position_with_raycast, surface_offset};

/// Real-valued 3D point or direction.
pub type Vec3 = nalgebra::Vector3<f64>;
