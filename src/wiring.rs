//! Wiring specifications and the validated permutations derived from them.
//!
//! A [`WiringSpec`] is plain configuration data: a 26-symbol string whose
//! i-th symbol is the image of the i-th alphabet symbol, a set of notch
//! letters and a display name. [`WiringSpec::permutation`] checks that the
//! string really is a bijection and produces a [`Permutation`] with forward
//! and inverse lookup tables, which is what the scrambler units consume.

use std::borrow::Cow;

use crate::alphabet::{self, ALPHABET, SIZE};
use crate::error::{EnigmaError, EnigmaResult};

/// Wiring of a single wheel, reflector or plugboard.
///
/// Catalogue entries are `static` values borrowing `'static` strings;
/// plugboard wirings are generated at runtime and own their strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiringSpec {
    name: Cow<'static, str>,
    wiring: Cow<'static, str>,
    notches: Cow<'static, str>,
}

impl WiringSpec {
    /// Creates a wiring from static strings, usable in `const` context.
    pub const fn from_static(
        name: &'static str,
        wiring: &'static str,
        notches: &'static str,
    ) -> Self {
        WiringSpec {
            name: Cow::Borrowed(name),
            wiring: Cow::Borrowed(wiring),
            notches: Cow::Borrowed(notches),
        }
    }

    /// Creates a wiring from owned strings.
    ///
    /// No validation happens here; call [`permutation`](Self::permutation).
    pub fn new(
        name: impl Into<String>,
        wiring: impl Into<String>,
        notches: impl Into<String>,
    ) -> Self {
        WiringSpec {
            name: Cow::Owned(name.into()),
            wiring: Cow::Owned(wiring.into()),
            notches: Cow::Owned(notches.into()),
        }
    }

    /// Returns the identity wiring (no substitution).
    pub const fn identity() -> Self {
        Self::from_static("identity", ALPHABET, "")
    }

    /// Builds plugboard wiring from space-separated letter pairs.
    ///
    /// Each pair `XY` swaps `X` and `Y`; letters not mentioned map to
    /// themselves. An empty (or all-whitespace) string yields the identity.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidPlugboard`] if a pair is not exactly two
    /// alphabet letters, pairs a letter with itself, or reuses a letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmasim::WiringSpec;
    ///
    /// let plugboard = WiringSpec::plugboard("AB CD").unwrap();
    /// assert_eq!(&plugboard.wiring()[..5], "BADCE");
    /// assert!(WiringSpec::plugboard("AB BC").is_err());
    /// ```
    pub fn plugboard(pairs: &str) -> EnigmaResult<Self> {
        let mut table: Vec<char> = ALPHABET.chars().collect();
        let mut used = [false; SIZE];
        for pair in pairs.split_whitespace() {
            let mut letters = pair.chars();
            let (a, b) = match (letters.next(), letters.next(), letters.next()) {
                (Some(a), Some(b), None) => (a, b),
                _ => {
                    return Err(EnigmaError::InvalidPlugboard(format!(
                        "pair {pair:?} must be exactly two letters"
                    )))
                }
            };
            let ia = alphabet::index_of(a)
                .map_err(|_| EnigmaError::InvalidPlugboard(format!("{a:?} is not a letter")))?;
            let ib = alphabet::index_of(b)
                .map_err(|_| EnigmaError::InvalidPlugboard(format!("{b:?} is not a letter")))?;
            if ia == ib {
                return Err(EnigmaError::InvalidPlugboard(format!(
                    "{a:?} is paired with itself"
                )));
            }
            for (letter, index) in [(a, ia), (b, ib)] {
                if used[index] {
                    return Err(EnigmaError::InvalidPlugboard(format!(
                        "{letter:?} is plugged more than once"
                    )));
                }
                used[index] = true;
            }
            table.swap(ia, ib);
        }
        Ok(WiringSpec::new(
            format!("plugboard({})", pairs.trim()),
            table.into_iter().collect::<String>(),
            "",
        ))
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the 26-symbol wiring string.
    pub fn wiring(&self) -> &str {
        &self.wiring
    }

    /// Returns the notch letters.
    pub fn notches(&self) -> &str {
        &self.notches
    }

    /// Validates the wiring and derives its lookup tables.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`] if the wiring is not a
    /// permutation of the alphabet or a notch letter is outside it.
    pub fn permutation(&self) -> EnigmaResult<Permutation> {
        let invalid = |reason: String| EnigmaError::InvalidWiring {
            name: self.name.to_string(),
            reason,
        };

        let count = self.wiring.chars().count();
        if count != SIZE {
            return Err(invalid(format!("expected {SIZE} symbols, got {count}")));
        }

        let mut forward = [0u8; SIZE];
        let mut backward = [0u8; SIZE];
        let mut seen = [false; SIZE];
        for (i, symbol) in self.wiring.chars().enumerate() {
            let target = alphabet::index_of(symbol)
                .map_err(|_| invalid(format!("symbol {symbol:?} is not in the alphabet")))?;
            if seen[target] {
                return Err(invalid(format!("symbol {symbol:?} appears twice")));
            }
            seen[target] = true;
            forward[i] = target as u8;
            backward[target] = i as u8;
        }

        let mut notches = [false; SIZE];
        for symbol in self.notches.chars() {
            let index = alphabet::index_of(symbol)
                .map_err(|_| invalid(format!("notch {symbol:?} is not in the alphabet")))?;
            notches[index] = true;
        }

        Ok(Permutation {
            forward,
            backward,
            notches,
        })
    }
}

/// A validated bijection on the alphabet plus its notch mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    forward: [u8; SIZE],
    backward: [u8; SIZE],
    notches: [bool; SIZE],
}

impl Permutation {
    /// Forward image of `position`.
    #[inline]
    pub fn forward(&self, position: usize) -> usize {
        self.forward[position] as usize
    }

    /// Inverse image of `position`.
    #[inline]
    pub fn backward(&self, position: usize) -> usize {
        self.backward[position] as usize
    }

    /// Whether `position` is a notch position.
    #[inline]
    pub fn is_notch(&self, position: usize) -> bool {
        self.notches[position]
    }
}
