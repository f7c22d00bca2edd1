//! Hand landmarks to gesture signals.
//!
//! The detector reports zero or more hands as lists of normalised image-space
//! landmarks. Only the first hand is used: its middle-finger knuckle gives the
//! horizontal position, and the distance between the index and pinky knuckles
//! gives an apparent hand width that shrinks as the hand moves away.

use crate::constants::*;
use crate::error::GestureError;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance in the image plane, ignoring depth.
    #[inline]
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One detected hand, landmarks in detector order.
pub type HandLandmarks = Vec<Landmark>;

/// Most recent control signals derived from hand tracking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandSignals {
    /// Horizontal palm position, nominally in \[0, 1\].
    pub hand_x: f32,
    /// Index-to-pinky knuckle span in normalised image units.
    pub hand_size: f32,
}

impl Default for HandSignals {
    fn default() -> Self {
        Self {
            hand_x: DEFAULT_HAND_X,
            hand_size: DEFAULT_HAND_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalUpdate {
    Updated,
    /// No hand in view; previous values kept.
    Held,
}

impl HandSignals {
    /// Derive signals from a single hand.
    pub fn from_hand(hand: &[Landmark]) -> Result<Self, GestureError> {
        let middle = landmark(hand, LANDMARK_MIDDLE_MCP)?;
        let index = landmark(hand, LANDMARK_INDEX_MCP)?;
        let pinky = landmark(hand, LANDMARK_PINKY_MCP)?;
        Ok(Self {
            hand_x: middle.x,
            hand_size: index.planar_distance(&pinky),
        })
    }

    /// Fold one detector result into the state.
    ///
    /// The state is replaced as a whole from the first hand, held when no hand
    /// is present, and left untouched when the first hand is malformed.
    pub fn apply_detection(&mut self, hands: &[HandLandmarks]) -> Result<SignalUpdate, GestureError> {
        match hands.first() {
            Some(hand) => {
                *self = Self::from_hand(hand)?;
                Ok(SignalUpdate::Updated)
            }
            None => Ok(SignalUpdate::Held),
        }
    }
}

fn landmark(hand: &[Landmark], index: usize) -> Result<Landmark, GestureError> {
    let lm = hand.get(index).copied().ok_or(GestureError::MissingLandmark {
        index,
        available: hand.len(),
    })?;
    if !(lm.x.is_finite() && lm.y.is_finite()) {
        return Err(GestureError::NonFiniteLandmark { index });
    }
    Ok(lm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_with(points: &[(usize, f32, f32)]) -> HandLandmarks {
        let mut hand = vec![Landmark::default(); 21];
        for &(i, x, y) in points {
            hand[i] = Landmark::new(x, y, 0.0);
        }
        hand
    }

    #[test]
    fn defaults_are_neutral() {
        let s = HandSignals::default();
        assert_eq!(s.hand_x, 0.5);
        assert_eq!(s.hand_size, 0.15);
    }

    #[test]
    fn extracts_position_and_span() {
        let hand = hand_with(&[(9, 0.3, 0.5), (5, 0.4, 0.4), (17, 0.4, 0.7)]);
        let s = HandSignals::from_hand(&hand).unwrap();
        assert!((s.hand_x - 0.3).abs() < 1e-6);
        assert!((s.hand_size - 0.3).abs() < 1e-6);
    }

    #[test]
    fn span_ignores_depth() {
        let mut hand = hand_with(&[(5, 0.0, 0.0), (17, 0.3, 0.4)]);
        hand[17].z = 5.0;
        let s = HandSignals::from_hand(&hand).unwrap();
        assert!((s.hand_size - 0.5).abs() < 1e-6);
    }

    #[test]
    fn short_hand_is_rejected() {
        let hand = vec![Landmark::default(); 10];
        assert_eq!(
            HandSignals::from_hand(&hand),
            Err(GestureError::MissingLandmark {
                index: 17,
                available: 10
            })
        );
    }

    #[test]
    fn non_finite_landmark_is_rejected() {
        let hand = hand_with(&[(9, f32::NAN, 0.5)]);
        assert_eq!(
            HandSignals::from_hand(&hand),
            Err(GestureError::NonFiniteLandmark { index: 9 })
        );
    }

    #[test]
    fn malformed_first_hand_leaves_state_untouched() {
        let mut s = HandSignals {
            hand_x: 0.2,
            hand_size: 0.3,
        };
        let before = s;
        assert!(s.apply_detection(&[vec![Landmark::default(); 3]]).is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn only_first_hand_counts() {
        let first = hand_with(&[(9, 0.1, 0.0)]);
        let second = hand_with(&[(9, 0.9, 0.0)]);
        let mut s = HandSignals::default();
        assert_eq!(s.apply_detection(&[first, second]), Ok(SignalUpdate::Updated));
        assert!((s.hand_x - 0.1).abs() < 1e-6);
    }
}
