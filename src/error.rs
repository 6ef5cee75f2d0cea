//! Error types for the enigmasim library.

use thiserror::Error;

/// Errors produced by the enigmasim library.
///
/// None of these conditions is transient: every failure is reported
/// synchronously to the caller and retrying with the same input fails again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnigmaError {
    /// A symbol outside the 26-letter alphabet (and not a configured
    /// pass-through symbol) was presented for encoding or configuration.
    #[error("Symbol {0:?} is not in the alphabet")]
    OutOfAlphabet(char),

    /// A wiring table is not a bijection on the alphabet.
    #[error("Invalid wiring for {name}: {reason}")]
    InvalidWiring { name: String, reason: String },

    /// A plugboard pairing is malformed (duplicate or self-paired letters).
    #[error("Invalid plugboard pairing: {0}")]
    InvalidPlugboard(String),

    /// A catalogue lookup did not match any known component.
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// Key or ring settings do not provide exactly one value per rotor.
    #[error("Expected {expected} settings (one per rotor), got {actual}")]
    SettingCountMismatch { expected: usize, actual: usize },

    /// The scrambler chain cannot be assembled as requested.
    #[error("Invalid scrambler chain: {0}")]
    InvalidChain(String),

    /// A pass-through symbol collides with the alphabet.
    #[error("Pass-through symbol {0:?} is part of the alphabet")]
    InvalidPassThrough(char),

    /// A machine configuration could not be parsed or is inconsistent.
    #[error("Config error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type EnigmaResult<T> = Result<T, EnigmaError>;
