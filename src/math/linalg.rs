//! Linear algebra helpers for camera orientation.
//!
//! All primitives share one basis recovery ([`camera_basis`]) so that the
//! gimbal-lock fallback is identical everywhere: when the view direction is
//! parallel to world-up, the right axis falls back to world X.

use nalgebra::{Unit, UnitQuaternion};

use super::Vec3;

/// World up direction (Y-up, right-handed).
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// World X, used as the right axis when the view is vertical.
pub const WORLD_X: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Orthonormal camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Unit view direction (camera → target).
    pub forward: Vec3,
    /// Unit screen-right direction.
    pub right: Vec3,
    /// Unit screen-up direction.
    pub up: Vec3,
}

/// Recover the camera frame from a position and a look-at point.
///
/// Returns `None` when the camera coincides with its target (view vector
/// shorter than `eps`).
#[must_use]
pub fn camera_basis(position: &Vec3, target: &Vec3, eps: f64) -> Option<CameraBasis> {
    let view = target - position;
    let len = view.norm();
    if len < eps {
        return None;
    }
    let forward = view / len;

    let right = forward.cross(&WORLD_UP);
    let right = if right.norm() < eps {
        WORLD_X
    } else {
        right.normalize()
    };
    let up = right.cross(&forward).normalize();

    Some(CameraBasis { forward, right, up })
}

/// Rotate `v` about `axis` by `angle` radians (right-hand rule).
///
/// A zero-length axis leaves `v` unchanged.
#[must_use]
pub fn rotate_about(v: &Vec3, axis: &Vec3, angle: f64) -> Vec3 {
    match Unit::try_new(*axis, 1e-12) {
        Some(axis) => UnitQuaternion::from_axis_angle(&axis, angle) * v,
        None => *v,
    }
}

/// Elevation of a direction above the horizontal plane, in radians.
#[must_use]
pub fn elevation(direction: &Vec3) -> f64 {
    let len = direction.norm();
    if len < 1e-12 {
        return 0.0;
    }
    (direction.y / len).clamp(-1.0, 1.0).asin()
}

/// Unit vector along `v`, or `fallback` when `v` is shorter than `eps`.
#[must_use]
pub fn normalize_or(v: &Vec3, fallback: Vec3, eps: f64) -> Vec3 {
    let len = v.norm();
    if len < eps {
        fallback
    } else {
        v / len
    }
}

/// Whether every component is finite.
#[must_use]
#[inline]
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_basis_looking_down_negative_z() {
        let basis = camera_basis(&Vec3::new(0.0, 0.0, 5.0), &Vec3::zeros(), 1e-9).unwrap();
        assert_relative_eq!(basis.forward, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
        assert_relative_eq!(basis.right, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(basis.up, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_basis_gimbal_fallback() {
        // Looking straight down: right falls back to world X
        let basis = camera_basis(&Vec3::new(0.0, 10.0, 0.0), &Vec3::zeros(), 1e-9).unwrap();
        assert_relative_eq!(basis.right, WORLD_X, epsilon = 1e-12);
        assert_relative_eq!(basis.up.dot(&basis.forward), 0.0, epsilon = 1e-12);
        assert_relative_eq!(basis.up.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_basis_degenerate() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        assert!(camera_basis(&p, &p, 1e-9).is_none());
    }

    #[test]
    fn test_rotate_about_y() {
        let v = Vec3::new(0.0, 0.0, 5.0);
        let r = rotate_about(&v, &WORLD_UP, -FRAC_PI_2);
        assert_relative_eq!(r, Vec3::new(-5.0, 0.0, 0.0), epsilon = 1e-9);

        let unchanged = rotate_about(&v, &Vec3::zeros(), 1.0);
        assert_eq!(unchanged, v);
    }

    #[test]
    fn test_elevation() {
        assert_relative_eq!(elevation(&Vec3::new(1.0, 1.0, 0.0)), FRAC_PI_2 / 2.0, epsilon = 1e-12);
        assert_relative_eq!(elevation(&Vec3::new(0.0, 0.0, -1.0)), 0.0);
        assert_relative_eq!(elevation(&Vec3::zeros()), 0.0);
    }

    #[test]
    fn test_normalize_or() {
        let n = normalize_or(&Vec3::new(3.0, 4.0, 0.0), WORLD_X, 1e-9);
        assert_relative_eq!(n.x, 0.6);
        assert_relative_eq!(n.y, 0.8);
        assert_eq!(normalize_or(&Vec3::zeros(), WORLD_X, 1e-9), WORLD_X);
    }
}
