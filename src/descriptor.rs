//! Qualitative magnitude descriptors and their numeric mappings.
//!
//! Planners describe amounts with words ("a little closer", "far"). This
//! module normalizes those words to a [`Descriptor`] and turns descriptors
//! into zoom factors, travel distances, angles, or absolute framing
//! distances, scaled to the subject and the current camera.
//!
//! # Tables
//!
//! | Descriptor | Zoom in | Zoom out | Distance scale | Angle (°) | Goal distance |
//! |------------|---------|----------|----------------|-----------|---------------|
//! | tiny       | 0.90    | 1.10     | 0.10           | 10        | 0.5 × size    |
//! | small      | 0.75    | 1.30     | 0.25           | 20        | 1.0 × size    |
//! | medium     | 0.60    | 1.60     | 0.50           | 45        | 1.5 × size    |
//! | large      | 0.45    | 2.20     | 1.00           | 90        | 2.5 × size    |
//! | huge       | 0.30    | 3.00     | 2.00           | 180       | 4.0 × size    |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::plan::{Direction, PrimitiveKind};
use crate::scene::{EnvContext, SceneContext};

/// Object size assumed when the scene has no bounds.
pub const DEFAULT_OBJECT_SIZE: f64 = 1.0;

/// Qualitative magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Descriptor {
    /// Barely noticeable.
    Tiny,
    /// Modest.
    Small,
    /// Moderate.
    Medium,
    /// Pronounced.
    Large,
    /// Extreme.
    Huge,
}

impl Descriptor {
    /// All descriptors, smallest first.
    pub const ALL: [Self; 5] = [Self::Tiny, Self::Small, Self::Medium, Self::Large, Self::Huge];

    /// Canonical word.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
        }
    }

    const fn zoom_in_factor(self) -> f64 {
        match self {
            Self::Tiny => 0.9,
            Self::Small => 0.75,
            Self::Medium => 0.6,
            Self::Large => 0.45,
            Self::Huge => 0.3,
        }
    }

    const fn zoom_out_factor(self) -> f64 {
        match self {
            Self::Tiny => 1.1,
            Self::Small => 1.3,
            Self::Medium => 1.6,
            Self::Large => 2.2,
            Self::Huge => 3.0,
        }
    }

    const fn distance_scale(self) -> f64 {
        match self {
            Self::Tiny => 0.1,
            Self::Small => 0.25,
            Self::Medium => 0.5,
            Self::Large => 1.0,
            Self::Huge => 2.0,
        }
    }

    const fn angle_degrees(self) -> f64 {
        match self {
            Self::Tiny => 10.0,
            Self::Small => 20.0,
            Self::Medium => 45.0,
            Self::Large => 90.0,
            Self::Huge => 180.0,
        }
    }

    const fn goal_distance_scale(self) -> f64 {
        match self {
            Self::Tiny => 0.5,
            Self::Small => 1.0,
            Self::Medium => 1.5,
            Self::Large => 2.5,
            Self::Huge => 4.0,
        }
    }
}

impl std::fmt::Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alias table: (alias, canonical descriptor).
const ALIASES: &[(&str, Descriptor)] = &[
    ("tiny", Descriptor::Tiny),
    ("very_small", Descriptor::Tiny),
    ("minimal", Descriptor::Tiny),
    ("slight", Descriptor::Tiny),
    ("slightly", Descriptor::Tiny),
    ("a_bit", Descriptor::Tiny),
    ("very_close", Descriptor::Tiny),
    ("extreme_close_up", Descriptor::Tiny),
    ("small", Descriptor::Small),
    ("little", Descriptor::Small),
    ("a_little", Descriptor::Small),
    ("short", Descriptor::Small),
    ("close", Descriptor::Small),
    ("closer", Descriptor::Small),
    ("near", Descriptor::Small),
    ("nearer", Descriptor::Small),
    ("close_up", Descriptor::Small),
    ("medium", Descriptor::Medium),
    ("moderate", Descriptor::Medium),
    ("mid", Descriptor::Medium),
    ("normal", Descriptor::Medium),
    ("average", Descriptor::Medium),
    ("medium_distance", Descriptor::Medium),
    ("medium_shot", Descriptor::Medium),
    ("large", Descriptor::Large),
    ("big", Descriptor::Large),
    ("significant", Descriptor::Large),
    ("long", Descriptor::Large),
    ("far", Descriptor::Large),
    ("farther", Descriptor::Large),
    ("further", Descriptor::Large),
    ("distant", Descriptor::Large),
    ("wide", Descriptor::Large),
    ("wide_shot", Descriptor::Large),
    ("huge", Descriptor::Huge),
    ("very_large", Descriptor::Huge),
    ("massive", Descriptor::Huge),
    ("enormous", Descriptor::Huge),
    ("extreme", Descriptor::Huge),
    ("very_far", Descriptor::Huge),
    ("very_distant", Descriptor::Huge),
    ("extreme_wide", Descriptor::Huge),
];

/// Normalize a free-form magnitude word.
///
/// Case-insensitive; surrounding whitespace is ignored and inner spaces or
/// hyphens are treated as underscores, so `"Very Far"` and `"very-far"` both
/// map to [`Descriptor::Huge`]. Unknown words yield `None`.
#[must_use]
pub fn normalize_descriptor(raw: &str) -> Option<Descriptor> {
    let key = raw
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|&(_, descriptor)| descriptor)
}

/// What kind of number a descriptor is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagnitudeType {
    /// Multiplicative zoom factor on the camera-to-target distance.
    Factor,
    /// Absolute travel distance in world units.
    Distance,
    /// Angle in degrees.
    Angle,
}

/// Characteristic size of the subject (largest extent).
#[must_use]
pub fn object_size(scene: &SceneContext) -> f64 {
    scene
        .bounds
        .map(|b| b.max_extent())
        .filter(|s| *s > 0.0)
        .unwrap_or(DEFAULT_OBJECT_SIZE)
}

/// Map a descriptor to a number for a given motion.
///
/// # Arguments
///
/// * `descriptor` - Qualitative amount
/// * `magnitude` - Kind of value wanted
/// * `motion` - Primitive the value is for (selects the distance metric)
/// * `direction` - Zoom direction; `Out` selects the zoom-out table, anything
///   else the zoom-in table
///
/// # Returns
///
/// - `Factor`: table value clamped so the resulting camera-to-target distance
///   stays within the distance constraints
/// - `Distance`: base metric × descriptor scale, capped at
///   `max(5 × object size, 20)`. The base metric is the object height for
///   pedestal, its width for truck, `max(0.5 × object size, 0.5 × current
///   distance)` for dolly and the bounding-box diagonal otherwise.
/// - `Angle`: degrees from the angle table
#[must_use]
pub fn map_descriptor_to_value(
    descriptor: Descriptor,
    magnitude: MagnitudeType,
    motion: PrimitiveKind,
    scene: &SceneContext,
    env: &EnvContext,
    camera: &CameraState,
    direction: Option<Direction>,
) -> f64 {
    match magnitude {
        MagnitudeType::Factor => {
            let factor = if direction == Some(Direction::Out) {
                descriptor.zoom_out_factor()
            } else {
                descriptor.zoom_in_factor()
            };
            clamp_factor_to_constraints(factor, camera.distance(), env)
        }
        MagnitudeType::Distance => {
            let size = object_size(scene);
            let extent = scene.bounds.map(|b| b.size());
            let base = match motion {
                PrimitiveKind::Pedestal => extent.map_or(size, |e| e.y),
                PrimitiveKind::Truck => extent.map_or(size, |e| e.x),
                PrimitiveKind::Dolly => (0.5 * size).max(0.5 * camera.distance()),
                _ => scene
                    .bounds
                    .map_or(size * 3.0_f64.sqrt(), |b| b.diagonal()),
            };
            // Flat subjects have no height or width to scale by
            let base = if base > 0.0 { base } else { size };
            let cap = (5.0 * size).max(20.0);
            (base * descriptor.distance_scale()).min(cap)
        }
        MagnitudeType::Angle => descriptor.angle_degrees(),
    }
}

/// Map a descriptor to an absolute camera-to-target distance.
///
/// Independent of the camera: `tiny` ≈ 0.5×, `small` ≈ 1×, `medium` ≈ 1.5×,
/// `large` ≈ 2.5×, `huge` ≈ 4× the object size.
#[must_use]
pub fn map_descriptor_to_goal_distance(descriptor: Descriptor, scene: &SceneContext) -> f64 {
    descriptor.goal_distance_scale() * object_size(scene)
}

fn clamp_factor_to_constraints(factor: f64, current_distance: f64, env: &EnvContext) -> f64 {
    match &env.camera_constraints {
        Some(c) if current_distance > 0.0 => {
            let lo = c.min_distance / current_distance;
            let hi = c.max_distance / current_distance;
            if lo <= hi {
                factor.clamp(lo, hi)
            } else {
                factor
            }
        }
        _ => factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::scene::{Bounds, CameraConstraints};
    use approx::assert_relative_eq;

    fn scene() -> SceneContext {
        SceneContext::with_bounds(Bounds::new(
            Vec3::new(-2.0, 0.0, -1.0),
            Vec3::new(2.0, 3.0, 1.0),
        ))
    }

    fn camera() -> CameraState {
        CameraState::new(Vec3::new(0.0, 1.5, 10.0), Vec3::new(0.0, 1.5, 0.0))
    }

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(normalize_descriptor("close"), Some(Descriptor::Small));
        assert_eq!(normalize_descriptor("Nearer"), Some(Descriptor::Small));
        assert_eq!(normalize_descriptor("far"), Some(Descriptor::Large));
        assert_eq!(normalize_descriptor("  distant "), Some(Descriptor::Large));
        assert_eq!(normalize_descriptor("Very Far"), Some(Descriptor::Huge));
        assert_eq!(normalize_descriptor("very-far"), Some(Descriptor::Huge));
        assert_eq!(normalize_descriptor("extreme close up"), Some(Descriptor::Tiny));
        assert_eq!(normalize_descriptor("galactic"), None);
        assert_eq!(normalize_descriptor(""), None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for (alias, expected) in ALIASES {
            let once = normalize_descriptor(alias).unwrap();
            assert_eq!(once, *expected);
            assert_eq!(normalize_descriptor(once.as_str()), Some(once), "alias {alias}");
        }
        for d in Descriptor::ALL {
            assert_eq!(normalize_descriptor(&d.to_string()), Some(d));
        }
    }

    #[test]
    fn test_zoom_factor_tables() {
        let env = EnvContext::default();
        let cam = camera();
        for d in Descriptor::ALL {
            let zin = map_descriptor_to_value(d, MagnitudeType::Factor, PrimitiveKind::Zoom, &scene(), &env, &cam, Some(Direction::In));
            let zout = map_descriptor_to_value(d, MagnitudeType::Factor, PrimitiveKind::Zoom, &scene(), &env, &cam, Some(Direction::Out));
            assert!(zin < 1.0 && zin > 0.0);
            assert!(zout > 1.0);
        }
        // Larger descriptors move further from 1.0
        let small = map_descriptor_to_value(Descriptor::Small, MagnitudeType::Factor, PrimitiveKind::Zoom, &scene(), &env, &cam, Some(Direction::In));
        let huge = map_descriptor_to_value(Descriptor::Huge, MagnitudeType::Factor, PrimitiveKind::Zoom, &scene(), &env, &cam, Some(Direction::In));
        assert!(huge < small);
    }

    #[test]
    fn test_zoom_factor_respects_distance_constraints() {
        let env = EnvContext::with_constraints(CameraConstraints::new(6.0, 12.0, -10.0, 10.0));
        let cam = camera(); // distance 10
        let zin = map_descriptor_to_value(Descriptor::Huge, MagnitudeType::Factor, PrimitiveKind::Zoom, &scene(), &env, &cam, Some(Direction::In));
        assert_relative_eq!(zin, 0.6);
        let zout = map_descriptor_to_value(Descriptor::Huge, MagnitudeType::Factor, PrimitiveKind::Zoom, &scene(), &env, &cam, Some(Direction::Out));
        assert_relative_eq!(zout, 1.2);
    }

    #[test]
    fn test_distance_metric_per_motion() {
        let env = EnvContext::default();
        let cam = camera();
        let s = scene();
        // Height 3 for pedestal
        let ped = map_descriptor_to_value(Descriptor::Large, MagnitudeType::Distance, PrimitiveKind::Pedestal, &s, &env, &cam, None);
        assert_relative_eq!(ped, 3.0);
        // Width 4 for truck
        let truck = map_descriptor_to_value(Descriptor::Medium, MagnitudeType::Distance, PrimitiveKind::Truck, &s, &env, &cam, None);
        assert_relative_eq!(truck, 2.0);
        // Dolly: max(0.5 * 4, 0.5 * 10) = 5
        let dolly = map_descriptor_to_value(Descriptor::Large, MagnitudeType::Distance, PrimitiveKind::Dolly, &s, &env, &cam, None);
        assert_relative_eq!(dolly, 5.0);
        // Others: diagonal
        let other = map_descriptor_to_value(Descriptor::Large, MagnitudeType::Distance, PrimitiveKind::MoveTo, &s, &env, &cam, None);
        assert_relative_eq!(other, s.bounds.unwrap().diagonal());
    }

    #[test]
    fn test_distance_is_capped() {
        let env = EnvContext::default();
        let far_cam = CameraState::new(Vec3::new(0.0, 0.0, 200.0), Vec3::zeros());
        let dolly = map_descriptor_to_value(Descriptor::Huge, MagnitudeType::Distance, PrimitiveKind::Dolly, &scene(), &env, &far_cam, None);
        assert_relative_eq!(dolly, 20.0);
    }

    #[test]
    fn test_angle_table() {
        let env = EnvContext::default();
        let angle = map_descriptor_to_value(Descriptor::Large, MagnitudeType::Angle, PrimitiveKind::Orbit, &scene(), &env, &camera(), None);
        assert_relative_eq!(angle, 90.0);
    }

    #[test]
    fn test_goal_distance() {
        let s = scene(); // object size 4
        assert_relative_eq!(map_descriptor_to_goal_distance(Descriptor::Tiny, &s), 2.0);
        assert_relative_eq!(map_descriptor_to_goal_distance(Descriptor::Small, &s), 4.0);
        assert_relative_eq!(map_descriptor_to_goal_distance(Descriptor::Medium, &s), 6.0);
        assert_relative_eq!(map_descriptor_to_goal_distance(Descriptor::Large, &s), 10.0);
        assert_relative_eq!(map_descriptor_to_goal_distance(Descriptor::Huge, &s), 16.0);

        let empty = SceneContext::default();
        assert_relative_eq!(map_descriptor_to_goal_distance(Descriptor::Medium, &empty), 1.5);
    }
}
