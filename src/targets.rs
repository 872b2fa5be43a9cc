//! Named-target resolution.
//!
//! Resolution order:
//!
//! 1. `current_target` → the camera's current look-at point
//! 2. Object landmarks derived from the bounding box (`center`, `top_center`,
//!    `front_left_corner`, ...), optionally prefixed with `object_`, each
//!    raised by the user's vertical adjustment
//! 3. Scene features, matched by id, then by description (case-insensitive)
//!
//! Orientation: front = +Z, right = +X, top = +Y. Corners sit at the
//! subject's center height.

use crate::math::Vec3;
use crate::scene::{Bounds, EnvContext, SceneContext};

/// Keyword for the camera's current look-at point.
pub const CURRENT_TARGET: &str = "current_target";

/// Resolve a named target to a world position.
///
/// Returns `None` if the name matches nothing; callers treat that as a
/// recoverable step error.
#[must_use]
pub fn resolve_target_position(
    name: &str,
    scene: &SceneContext,
    env: &EnvContext,
    current_target: &Vec3,
) -> Option<Vec3> {
    let key = normalize_name(name);
    if key.is_empty() {
        return None;
    }
    if key == CURRENT_TARGET {
        return Some(*current_target);
    }

    if let Some(bounds) = &scene.bounds {
        let landmark_key = key.strip_prefix("object_").unwrap_or(&key);
        if let Some(point) = landmark(landmark_key, bounds) {
            return Some(point + Vec3::new(0.0, env.user_vertical_adjustment, 0.0));
        }
    }

    let trimmed = name.trim();
    scene
        .features
        .iter()
        .find(|f| f.id.eq_ignore_ascii_case(trimmed))
        .or_else(|| {
            scene
                .features
                .iter()
                .find(|f| !f.description.is_empty() && f.description.trim().eq_ignore_ascii_case(trimmed))
        })
        .map(|f| f.position)
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn landmark(key: &str, b: &Bounds) -> Option<Vec3> {
    let c = b.center;
    let point = match key {
        "center" => c,
        "top_center" => Vec3::new(c.x, b.max.y, c.z),
        "bottom_center" => Vec3::new(c.x, b.min.y, c.z),
        "left_center" => Vec3::new(b.min.x, c.y, c.z),
        "right_center" => Vec3::new(b.max.x, c.y, c.z),
        "front_center" => Vec3::new(c.x, c.y, b.max.z),
        "back_center" => Vec3::new(c.x, c.y, b.min.z),
        "front_left_corner" => Vec3::new(b.min.x, c.y, b.max.z),
        "front_right_corner" => Vec3::new(b.max.x, c.y, b.max.z),
        "back_left_corner" => Vec3::new(b.min.x, c.y, b.min.z),
        "back_right_corner" => Vec3::new(b.max.x, c.y, b.min.z),
        _ => return None,
    };
    Some(point)
}
