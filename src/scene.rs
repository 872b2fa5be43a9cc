//! Read-only scene and environment context.
//!
//! These types are supplied by the surrounding application: the subject's
//! bounding box and named feature points ([`SceneContext`]), and the safety
//! envelope plus user framing preference ([`EnvContext`]).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Axis-aligned bounding box of the subject.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
    /// Center of the subject (usually the box midpoint).
    pub center: Vec3,
}

impl Bounds {
    /// Build bounds from two corners, with the center at the midpoint.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        let lo = min.inf(&max);
        let hi = min.sup(&max);
        Self {
            min: lo,
            max: hi,
            center: (lo + hi) * 0.5,
        }
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the box diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.size().norm()
    }

    /// Largest extent along any axis.
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.size().max()
    }

    /// The same box moved along world Y.
    #[must_use]
    pub fn shifted_vertically(&self, offset: f64) -> Self {
        let shift = Vec3::new(0.0, offset, 0.0);
        Self {
            min: self.min + shift,
            max: self.max + shift,
            center: self.center + shift,
        }
    }

    /// Whether `point` lies strictly inside the box (surface excluded).
    #[must_use]
    pub fn contains_strictly(&self, point: &Vec3) -> bool {
        (0..3).all(|i| point[i] > self.min[i] && point[i] < self.max[i])
    }

    /// Whether `point` lies inside the box or on its surface.
    #[must_use]
    pub fn contains(&self, point: &Vec3) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}

/// A named point of interest on or around the subject.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneFeature {
    /// Stable identifier.
    pub id: String,
    /// Human-readable description (may also be used as a lookup key).
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// World-space position.
    pub position: Vec3,
}

impl SceneFeature {
    /// Create a feature point.
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            position,
        }
    }
}

/// Spatial description of the subject being filmed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct SceneContext {
    /// Subject bounding box, if known.
    pub bounds: Option<Bounds>,
    /// Named feature points.
    pub features: Vec<SceneFeature>,
}

impl SceneContext {
    /// Scene with the given bounds and no features.
    #[must_use]
    pub const fn with_bounds(bounds: Bounds) -> Self {
        Self {
            bounds: Some(bounds),
            features: Vec::new(),
        }
    }

    /// Add a feature point.
    #[must_use]
    pub fn with_feature(mut self, feature: SceneFeature) -> Self {
        self.features.push(feature);
        self
    }

    /// Bounds shifted by the user's vertical adjustment.
    #[must_use]
    pub fn adjusted_bounds(&self, env: &EnvContext) -> Option<Bounds> {
        self.bounds
            .map(|b| b.shifted_vertically(env.user_vertical_adjustment))
    }
}

/// Safety envelope for camera placement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CameraConstraints {
    /// Minimum camera-to-anchor distance.
    pub min_distance: f64,
    /// Maximum camera-to-anchor distance.
    pub max_distance: f64,
    /// Minimum camera height (world Y).
    pub min_height: f64,
    /// Maximum camera height (world Y).
    pub max_height: f64,
}

impl CameraConstraints {
    /// Create a constraint envelope.
    #[must_use]
    pub const fn new(min_distance: f64, max_distance: f64, min_height: f64, max_height: f64) -> Self {
        Self {
            min_distance,
            max_distance,
            min_height,
            max_height,
        }
    }

    /// Whether `position` satisfies every constraint relative to `anchor`.
    #[must_use]
    pub fn admits(&self, position: &Vec3, anchor: &Vec3, tolerance: f64) -> bool {
        let distance = (position - anchor).norm();
        position.y >= self.min_height - tolerance
            && position.y <= self.max_height + tolerance
            && distance >= self.min_distance - tolerance
            && distance <= self.max_distance + tolerance
    }
}

/// Environment supplied alongside the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct EnvContext {
    /// Safety envelope, if the caller imposes one.
    pub camera_constraints: Option<CameraConstraints>,
    /// Vertical offset applied to landmarks and collision bounds.
    pub user_vertical_adjustment: f64,
}

impl EnvContext {
    /// Environment with constraints and no vertical adjustment.
    #[must_use]
    pub const fn with_constraints(constraints: CameraConstraints) -> Self {
        Self {
            camera_constraints: Some(constraints),
            user_vertical_adjustment: 0.0,
        }
    }

    /// Set the vertical adjustment.
    #[must_use]
    pub const fn with_vertical_adjustment(mut self, offset: f64) -> Self {
        self.user_vertical_adjustment = offset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds_normalizes_corners() {
        let b = Bounds::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(b.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(b.center, Vec3::zeros());
        assert_relative_eq!(b.diagonal(), 12.0_f64.sqrt());
        assert_relative_eq!(b.max_extent(), 2.0);
    }

    #[test]
    fn test_strict_containment_excludes_surface() {
        let b = Bounds::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(b.contains_strictly(&Vec3::zeros()));
        assert!(!b.contains_strictly(&Vec3::new(1.0, 0.0, 0.0)));
        assert!(b.contains(&Vec3::new(1.0, 0.0, 0.0)));
        assert!(!b.contains(&Vec3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn test_vertical_adjustment_shifts_bounds() {
        let scene = SceneContext::with_bounds(Bounds::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 2.0, 1.0),
        ));
        let env = EnvContext::default().with_vertical_adjustment(0.5);
        let adjusted = scene.adjusted_bounds(&env).unwrap();
        assert_relative_eq!(adjusted.min.y, 0.5);
        assert_relative_eq!(adjusted.max.y, 2.5);
        assert_relative_eq!(adjusted.center.y, 1.5);
    }

    #[test]
    fn test_constraints_admit() {
        let c = CameraConstraints::new(2.0, 10.0, 0.0, 5.0);
        let anchor = Vec3::zeros();
        assert!(c.admits(&Vec3::new(0.0, 1.0, 4.0), &anchor, 1e-9));
        assert!(!c.admits(&Vec3::new(0.0, 1.0, 1.0), &anchor, 1e-9));
        assert!(!c.admits(&Vec3::new(0.0, 6.0, 4.0), &anchor, 1e-9));
        assert!(!c.admits(&Vec3::new(0.0, 1.0, 11.0), &anchor, 1e-9));
    }
}
