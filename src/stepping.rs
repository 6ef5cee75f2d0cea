//! Stepping policies: when a rotor advances during the stepping phase.
//!
//! Every rotor in a [`ScramblerChain`](crate::chain::ScramblerChain) is
//! wrapped by exactly one policy. Once per keystroke, before the signal
//! pass, the chain runs every policy in chain order. A policy only gates
//! [`Rotor::rotate`]; rotation state lives in the rotor.
//!
//! | Policy              | Transition                                              |
//! |---------------------|---------------------------------------------------------|
//! | `Always`            | rotate                                                  |
//! | `Never`             | nothing                                                 |
//! | `FixedAt(p)`        | force rotation to `p`                                   |
//! | `Notch(w)`          | rotate if `w` just left a notch                         |
//! | `NotchDoubleStep(w)`| rotate if `w` just left a notch, else if own notch is up|
//!
//! `NotchDoubleStep` reproduces the double-stepping anomaly of the middle
//! rotor. The watched rotor must come earlier in the chain than the rotor
//! watching it, because "just left a notch" is only observable after the
//! watched rotor's own step in the same phase.

use crate::chain::RotorId;
use crate::scrambler::Rotor;

/// Decides whether a wrapped rotor advances on a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    /// Advance on every keystroke (the fast, rightmost rotor).
    Always,
    /// Never advance (thin rotors, adjustable reflectors).
    Never,
    /// Pin the rotation to a fixed position on every keystroke.
    FixedAt(usize),
    /// Advance when the watched rotor has just moved off a notch.
    Notch(RotorId),
    /// As `Notch`, and also advance when sitting on the own notch.
    NotchDoubleStep(RotorId),
}

impl StepPolicy {
    /// The rotor this policy observes, if any.
    pub fn watched(&self) -> Option<RotorId> {
        match *self {
            StepPolicy::Notch(id) | StepPolicy::NotchDoubleStep(id) => Some(id),
            StepPolicy::Always | StepPolicy::Never | StepPolicy::FixedAt(_) => None,
        }
    }

    /// Runs one stepping transition for the rotor `own`.
    ///
    /// The own "has rotated" flag is cleared first, so it only ever reports
    /// movement made during the current phase.
    pub(crate) fn step(self, own: RotorId, rotors: &mut [Rotor]) {
        rotors[own.0].clear_rotated();
        match self {
            StepPolicy::Always => rotors[own.0].rotate(),
            StepPolicy::Never => {}
            StepPolicy::FixedAt(position) => rotors[own.0].set_rotation(position),
            StepPolicy::Notch(watched) => {
                if rotors[watched.0].is_moved_from_notch_point() {
                    rotors[own.0].rotate();
                }
            }
            StepPolicy::NotchDoubleStep(watched) => {
                if rotors[watched.0].is_moved_from_notch_point()
                    || rotors[own.0].is_in_notch_point()
                {
                    rotors[own.0].rotate();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue;

    fn rotors(keys: [char; 2]) -> Vec<Rotor> {
        let mut fast = Rotor::new(&catalogue::ROTOR_III).unwrap();
        fast.with_key(keys[0]).unwrap();
        let mut slow = Rotor::new(&catalogue::ROTOR_II).unwrap();
        slow.with_key(keys[1]).unwrap();
        vec![fast, slow]
    }

    #[test]
    fn test_always_advances() {
        let mut r = rotors(['A', 'A']);
        StepPolicy::Always.step(RotorId(0), &mut r);
        assert_eq!(r[0].key(), 'B');
        assert!(r[0].has_rotated());
    }

    #[test]
    fn test_never_holds_position() {
        let mut r = rotors(['K', 'A']);
        for _ in 0..30 {
            StepPolicy::Never.step(RotorId(0), &mut r);
        }
        assert_eq!(r[0].key(), 'K');
        assert!(!r[0].has_rotated());
    }

    #[test]
    fn test_fixed_at_forces_rotation() {
        let mut r = rotors(['K', 'A']);
        StepPolicy::FixedAt(3).step(RotorId(0), &mut r);
        assert_eq!(r[0].key(), 'D');
        StepPolicy::FixedAt(3).step(RotorId(0), &mut r);
        assert_eq!(r[0].key(), 'D');
    }

    #[test]
    fn test_notch_not_kicked_without_transit() {
        // III notch is V; stepping from T to U is not a transit.
        let mut r = rotors(['T', 'A']);
        StepPolicy::Always.step(RotorId(0), &mut r);
        StepPolicy::Notch(RotorId(0)).step(RotorId(1), &mut r);
        assert_eq!(r[1].key(), 'A');
        assert!(!r[1].has_rotated());
    }

    #[test]
    fn test_notch_kicked_exactly_once_on_transit() {
        let mut r = rotors(['V', 'A']);
        StepPolicy::Always.step(RotorId(0), &mut r);
        assert!(r[0].is_moved_from_notch_point());
        StepPolicy::Notch(RotorId(0)).step(RotorId(1), &mut r);
        assert_eq!(r[1].key(), 'B');

        StepPolicy::Always.step(RotorId(0), &mut r);
        StepPolicy::Notch(RotorId(0)).step(RotorId(1), &mut r);
        assert_eq!(r[1].key(), 'B');
    }

    #[test]
    fn test_notch_ignores_own_notch() {
        // II notch is E; a plain notch policy does not double step.
        let mut r = rotors(['A', 'E']);
        StepPolicy::Always.step(RotorId(0), &mut r);
        StepPolicy::Notch(RotorId(0)).step(RotorId(1), &mut r);
        assert_eq!(r[1].key(), 'E');
    }

    #[test]
    fn test_double_step_on_own_notch() {
        let mut r = rotors(['A', 'E']);
        StepPolicy::Always.step(RotorId(0), &mut r);
        StepPolicy::NotchDoubleStep(RotorId(0)).step(RotorId(1), &mut r);
        assert_eq!(r[1].key(), 'F');
        assert!(r[1].is_moved_from_notch_point());
    }

    #[test]
    fn test_double_step_advances_once_when_both_conditions_hold() {
        let mut r = rotors(['V', 'E']);
        StepPolicy::Always.step(RotorId(0), &mut r);
        StepPolicy::NotchDoubleStep(RotorId(0)).step(RotorId(1), &mut r);
        assert_eq!(r[1].key(), 'F');
    }

    #[test]
    fn test_watched() {
        assert_eq!(StepPolicy::Always.watched(), None);
        assert_eq!(StepPolicy::FixedAt(2).watched(), None);
        assert_eq!(StepPolicy::Notch(RotorId(4)).watched(), Some(RotorId(4)));
        assert_eq!(
            StepPolicy::NotchDoubleStep(RotorId(1)).watched(),
            Some(RotorId(1))
        );
    }
}
