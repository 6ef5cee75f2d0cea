//! Scrambler: the stateful substitution unit, and the Rotor built on it.
//!
//! A [`Scrambler`] holds a fixed wiring permutation, a rotation and a ring
//! offset. It substitutes positions forward (`input`) and backward
//! (`output`). A reflecting scrambler returns its input unchanged on the
//! backward leg, so a reflector's wiring is applied exactly once per signal
//! pass.
//!
//! A [`Rotor`] composes a scrambler with notch detection and the single
//! stepping primitive [`Rotor::rotate`]. Whether and when a rotor steps is
//! decided by its [`StepPolicy`](crate::stepping::StepPolicy), not by the
//! rotor itself.

use crate::alphabet::{self, SIZE};
use crate::error::EnigmaResult;
use crate::wiring::{Permutation, WiringSpec};

/// A ring setting, either a 1-based number or a letter.
///
/// `Number(1)` and `Letter('A')` both mean "no ring offset".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingSetting {
    /// 1-based numeric setting; any integer is accepted and reduced modulo 26.
    Number(i64),
    /// Letter setting; `'A'` is offset 0.
    Letter(char),
}

impl RingSetting {
    /// Returns the zero-based ring offset this setting represents, in
    /// `[0, 26)`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`](crate::EnigmaError::OutOfAlphabet)
    /// for a letter outside the alphabet.
    pub fn offset(self) -> EnigmaResult<i64> {
        match self {
            RingSetting::Number(n) => {
                let size = SIZE as i64;
                Ok((n.rem_euclid(size) + size - 1) % size)
            }
            RingSetting::Letter(c) => Ok(alphabet::index_of(c)? as i64),
        }
    }
}

impl From<i64> for RingSetting {
    fn from(n: i64) -> Self {
        RingSetting::Number(n)
    }
}

impl From<char> for RingSetting {
    fn from(c: char) -> Self {
        RingSetting::Letter(c)
    }
}

/// A permutation unit: plugboard, entry wheel, reflector, or the wiring
/// core of a rotor.
#[derive(Debug, Clone)]
pub struct Scrambler {
    name: String,
    wiring: Permutation,
    rotation: usize,
    ring_offset: i64,
    reflecting: bool,
}

impl Scrambler {
    /// Creates a plain unit (plugboard or entry wheel) from `spec`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`](crate::EnigmaError::InvalidWiring)
    /// if `spec` is not a bijection.
    pub fn new(spec: &WiringSpec) -> EnigmaResult<Self> {
        Ok(Scrambler {
            name: spec.name().to_string(),
            wiring: spec.permutation()?,
            rotation: 0,
            ring_offset: 0,
            reflecting: false,
        })
    }

    /// Creates a unit in the reflector role: `output` is the identity.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`](crate::EnigmaError::InvalidWiring)
    /// if `spec` is not a bijection.
    pub fn reflector(spec: &WiringSpec) -> EnigmaResult<Self> {
        let mut unit = Self::new(spec)?;
        unit.reflecting = true;
        Ok(unit)
    }

    /// Returns the display name of the wiring.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this unit is in the reflector role.
    pub fn is_reflecting(&self) -> bool {
        self.reflecting
    }

    /// Current rotation in `[0, 26)`.
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Ring offset in `[0, 26)`.
    pub fn ring_offset(&self) -> i64 {
        self.ring_offset
    }

    /// Sets the rotation, normalized modulo 26.
    pub fn set_rotation(&mut self, rotation: usize) {
        self.rotation = rotation % SIZE;
    }

    pub(crate) fn set_ring_offset(&mut self, offset: i64) {
        self.ring_offset = alphabet::wrap(offset) as i64;
    }

    #[inline]
    pub(crate) fn forward(&self, position: usize) -> usize {
        self.wiring.forward(position)
    }

    #[inline]
    pub(crate) fn backward(&self, position: usize) -> usize {
        if self.reflecting {
            position
        } else {
            self.wiring.backward(position)
        }
    }

    /// Substitutes `symbol` through the forward wiring.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`](crate::EnigmaError::OutOfAlphabet)
    /// for a symbol outside the alphabet.
    pub fn input(&self, symbol: char) -> EnigmaResult<char> {
        Ok(alphabet::symbol_at(self.forward(alphabet::index_of(symbol)?)))
    }

    /// Inverse of [`input`](Self::input); identity in the reflector role.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`](crate::EnigmaError::OutOfAlphabet)
    /// for a symbol outside the alphabet.
    pub fn output(&self, symbol: char) -> EnigmaResult<char> {
        Ok(alphabet::symbol_at(self.backward(alphabet::index_of(symbol)?)))
    }

    /// Shifts `symbol` by `rot_offset` positions modulo 26.
    ///
    /// Used by connectors to re-express a signal in this unit's frame.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`](crate::EnigmaError::OutOfAlphabet)
    /// for a symbol outside the alphabet.
    pub fn rotate_input(&self, symbol: char, rot_offset: i64) -> EnigmaResult<char> {
        alphabet::rotate_symbol(symbol, rot_offset)
    }
}

/// A rotating wheel: a scrambler with notches and a stepping primitive.
#[derive(Debug, Clone)]
pub struct Rotor {
    scrambler: Scrambler,
    has_rotated: bool,
}

impl Rotor {
    /// Creates a stepping rotor from `spec`, notches included.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`](crate::EnigmaError::InvalidWiring)
    /// if `spec` is not a bijection.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmasim::{catalogue, Rotor};
    ///
    /// let mut rotor = Rotor::new(&catalogue::ROTOR_I).unwrap();
    /// rotor.with_key('Q').unwrap();
    /// assert!(rotor.is_in_notch_point());
    /// rotor.rotate();
    /// assert!(rotor.is_moved_from_notch_point());
    /// assert_eq!(rotor.key(), 'R');
    /// ```
    pub fn new(spec: &WiringSpec) -> EnigmaResult<Self> {
        Ok(Rotor {
            scrambler: Scrambler::new(spec)?,
            has_rotated: false,
        })
    }

    /// Creates a positionable reflector: a rotor whose `output` is the
    /// identity. It is usually wrapped in a `Never` step policy.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`](crate::EnigmaError::InvalidWiring)
    /// if `spec` is not a bijection.
    pub fn adjustable_reflector(spec: &WiringSpec) -> EnigmaResult<Self> {
        Ok(Rotor {
            scrambler: Scrambler::reflector(spec)?,
            has_rotated: false,
        })
    }

    /// The underlying permutation unit.
    pub fn scrambler(&self) -> &Scrambler {
        &self.scrambler
    }

    /// Display name of the rotor wiring.
    pub fn name(&self) -> &str {
        self.scrambler.name()
    }

    /// Current rotation in `[0, 26)`.
    pub fn rotation(&self) -> usize {
        self.scrambler.rotation
    }

    /// Ring offset in `[0, 26)`.
    pub fn ring_offset(&self) -> i64 {
        self.scrambler.ring_offset
    }

    /// Whether the rotor stepped during the current stepping phase.
    pub fn has_rotated(&self) -> bool {
        self.has_rotated
    }

    /// Advances the rotor by one position and records that it moved.
    pub fn rotate(&mut self) {
        self.has_rotated = true;
        self.scrambler.rotation = (self.scrambler.rotation + 1) % SIZE;
    }

    pub(crate) fn clear_rotated(&mut self) {
        self.has_rotated = false;
    }

    pub(crate) fn set_rotation(&mut self, rotation: usize) {
        self.scrambler.set_rotation(rotation);
    }

    /// True iff the current window letter is a notch letter.
    pub fn is_in_notch_point(&self) -> bool {
        self.scrambler.wiring.is_notch(self.scrambler.rotation)
    }

    /// True iff the rotor stepped in this phase and the position it left
    /// was a notch position.
    pub fn is_moved_from_notch_point(&self) -> bool {
        let previous = alphabet::wrap(self.scrambler.rotation as i64 - 1);
        self.has_rotated && self.scrambler.wiring.is_notch(previous)
    }

    /// Applies a ring setting.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`](crate::EnigmaError::OutOfAlphabet)
    /// for a letter setting outside the alphabet.
    pub fn with_inner_ring(&mut self, setting: impl Into<RingSetting>) -> EnigmaResult<&mut Self> {
        let offset = setting.into().offset()?;
        self.scrambler.set_ring_offset(offset);
        Ok(self)
    }

    /// Turns the rotor so `symbol` shows in the window.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`](crate::EnigmaError::OutOfAlphabet)
    /// for a symbol outside the alphabet.
    pub fn with_key(&mut self, symbol: char) -> EnigmaResult<&mut Self> {
        self.scrambler.rotation = alphabet::index_of(symbol)?;
        Ok(self)
    }

    /// The letter currently showing in the rotor window.
    pub fn key(&self) -> char {
        alphabet::symbol_at(self.scrambler.rotation)
    }
}
