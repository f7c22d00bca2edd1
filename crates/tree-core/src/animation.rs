//! Per-tick control law mapping gesture signals onto the group transform.
//!
//! Each tick computes a rotation target from the horizontal hand position and
//! a clamped scale target from the hand span, then closes a fixed fraction of
//! the remaining gap. Only scale is clamped; rotation follows the hand even if
//! the detector reports positions outside \[0, 1\].

use crate::constants::*;
use crate::gesture::HandSignals;
use glam::{Mat4, Quat, Vec3};

/// Rotation about the vertical axis and scale of the scene group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupTransform {
    pub rotation_y: f32,
    pub scale: Vec3,
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self {
            rotation_y: 0.0,
            scale: Vec3::ONE,
        }
    }
}

impl GroupTransform {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_y(self.rotation_y),
            Vec3::ZERO,
        )
    }
}

/// Gains of the gesture-to-transform filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlLaw {
    pub rotation_gain: f32,
    pub hand_x_center: f32,
    pub neutral_span: f32,
    pub scale_gain: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub smoothing: f32,
}

impl Default for ControlLaw {
    fn default() -> Self {
        Self {
            rotation_gain: ROTATION_GAIN,
            hand_x_center: HAND_X_CENTER,
            neutral_span: NEUTRAL_HAND_SPAN,
            scale_gain: SCALE_GAIN,
            scale_min: SCALE_MIN,
            scale_max: SCALE_MAX,
            smoothing: SMOOTHING_FACTOR,
        }
    }
}

impl ControlLaw {
    #[inline]
    pub fn target_rotation(&self, hand_x: f32) -> f32 {
        (hand_x - self.hand_x_center) * self.rotation_gain
    }

    #[inline]
    pub fn target_scale(&self, hand_size: f32) -> f32 {
        (1.0 + (self.neutral_span - hand_size) * self.scale_gain)
            .clamp(self.scale_min, self.scale_max)
    }

    /// Advance `transform` one tick toward the targets implied by `signals`.
    pub fn tick(&self, transform: &mut GroupTransform, signals: HandSignals) {
        let target_rotation = self.target_rotation(signals.hand_x);
        transform.rotation_y += (target_rotation - transform.rotation_y) * self.smoothing;

        let target_scale = self.target_scale(signals.hand_size);
        transform.scale = transform
            .scale
            .lerp(Vec3::splat(target_scale), self.smoothing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_span_maps_to_unit_scale() {
        let law = ControlLaw::default();
        assert!((law.target_scale(0.18) - 1.0).abs() < 1e-6);
        assert!((law.target_rotation(0.5)).abs() < 1e-6);
    }

    #[test]
    fn scale_target_is_clamped_both_ways() {
        let law = ControlLaw::default();
        assert_eq!(law.target_scale(1.0), 0.6);
        assert_eq!(law.target_scale(-1.0), 2.5);
        assert!((law.target_scale(0.0) - 2.08).abs() < 1e-5);
    }

    #[test]
    fn rotation_target_is_not_clamped() {
        let law = ControlLaw::default();
        assert!((law.target_rotation(2.0) - 4.5).abs() < 1e-6);
        assert!((law.target_rotation(-1.0) + 4.5).abs() < 1e-6);
    }

    #[test]
    fn one_tick_closes_a_tenth_of_the_gap() {
        let law = ControlLaw::default();
        let mut t = GroupTransform::default();
        law.tick(
            &mut t,
            HandSignals {
                hand_x: 1.0,
                hand_size: 0.0,
            },
        );
        assert!((t.rotation_y - 0.15).abs() < 1e-6);
        assert!((t.scale.x - 1.108).abs() < 1e-5);
        assert_eq!(t.scale.x, t.scale.y);
        assert_eq!(t.scale.y, t.scale.z);
    }

    #[test]
    fn model_matrix_of_identity_transform() {
        let m = GroupTransform::default().model_matrix();
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn model_matrix_rotates_then_scales() {
        let t = GroupTransform {
            rotation_y: std::f32::consts::FRAC_PI_2,
            scale: Vec3::splat(2.0),
        };
        let p = t.model_matrix().transform_point3(Vec3::X);
        // +X turns to -Z under a right-handed quarter turn about +Y
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-5));
    }
}
