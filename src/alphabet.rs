//! The fixed 26-symbol alphabet and modular position arithmetic.
//!
//! Every rotation, ring offset and permutation in the crate is expressed as
//! an index `0..26` into [`ALPHABET`]. Offsets may be negative or exceed the
//! alphabet length; [`wrap`] always normalizes them into `[0, 26)`.

use crate::error::{EnigmaError, EnigmaResult};

/// The ordered symbol set all positions are expressed in.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of symbols in [`ALPHABET`].
pub const SIZE: usize = 26;

const SYMBOLS: &[u8; SIZE] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns the alphabet position of `symbol`.
///
/// # Errors
/// Returns [`EnigmaError::OutOfAlphabet`] for anything other than `A..=Z`.
///
/// # Examples
///
/// ```
/// use enigmasim::alphabet;
///
/// assert_eq!(alphabet::index_of('C').unwrap(), 2);
/// assert!(alphabet::index_of('c').is_err());
/// ```
pub fn index_of(symbol: char) -> EnigmaResult<usize> {
    if symbol.is_ascii_uppercase() {
        Ok(symbol as usize - 'A' as usize)
    } else {
        Err(EnigmaError::OutOfAlphabet(symbol))
    }
}

/// Returns `true` if `symbol` belongs to the alphabet.
pub fn contains(symbol: char) -> bool {
    symbol.is_ascii_uppercase()
}

/// Returns the symbol at `position`, taken modulo the alphabet size.
pub fn symbol_at(position: usize) -> char {
    SYMBOLS[position % SIZE] as char
}

/// Normalizes a signed position into `[0, 26)`.
pub fn wrap(position: i64) -> usize {
    position.rem_euclid(SIZE as i64) as usize
}

/// Shifts `position` by `offset` steps around the alphabet.
pub(crate) fn shift(position: usize, offset: i64) -> usize {
    (position % SIZE + wrap(offset)) % SIZE
}

/// Shifts `symbol` by `offset` steps around the alphabet.
///
/// # Errors
/// Returns [`EnigmaError::OutOfAlphabet`] if `symbol` is not in the alphabet.
pub fn rotate_symbol(symbol: char, offset: i64) -> EnigmaResult<char> {
    Ok(symbol_at(shift(index_of(symbol)?, offset)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of_bounds() {
        assert_eq!(index_of('A').unwrap(), 0);
        assert_eq!(index_of('Z').unwrap(), 25);
        assert_eq!(index_of('.'), Err(EnigmaError::OutOfAlphabet('.')));
        assert_eq!(index_of('a'), Err(EnigmaError::OutOfAlphabet('a')));
        assert_eq!(index_of('Ä'), Err(EnigmaError::OutOfAlphabet('Ä')));
    }

    #[test]
    fn test_symbol_at_matches_alphabet() {
        for (i, c) in ALPHABET.chars().enumerate() {
            assert_eq!(symbol_at(i), c);
            assert_eq!(index_of(c).unwrap(), i);
        }
        assert_eq!(symbol_at(26), 'A');
    }

    #[test]
    fn test_wrap_negative_and_large() {
        assert_eq!(wrap(-1), 25);
        assert_eq!(wrap(-27), 25);
        assert_eq!(wrap(26), 0);
        assert_eq!(wrap(53), 1);
    }

    #[test]
    fn test_rotate_symbol() {
        assert_eq!(rotate_symbol('A', 1).unwrap(), 'B');
        assert_eq!(rotate_symbol('A', -1).unwrap(), 'Z');
        assert_eq!(rotate_symbol('Y', 3).unwrap(), 'B');
        assert_eq!(rotate_symbol('M', -52).unwrap(), 'M');
        assert!(rotate_symbol('?', 1).is_err());
        assert_eq!(rotate_symbol('A', i64::MAX).unwrap(), 'H');
        assert_eq!(rotate_symbol('A', i64::MIN).unwrap(), 'S');
    }
}
