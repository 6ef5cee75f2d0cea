//! Enigma rotor cipher machine simulator.
//!
//! Simulates the army/navy Enigma I (M3), the four-rotor naval M4 and the
//! Enigma K Railway, reproducing rotor stepping (double-step anomaly
//! included), ring settings, plugboard and reflector. Encryption and
//! decryption are the same operation from the same starting key.
//!
//! # Architecture
//!
//! ```text
//! WiringSpec  (catalogue data: wiring string + notch letters)
//!     ↓ validated into
//! Scrambler   (permutation unit: rotation, ring offset, forward/backward)
//!     ↓ wrapped by
//! Rotor       (scrambler + notches + rotate) ← StepPolicy decides when
//!     ↕ coupled by Connectors (relative rotation/ring compensation)
//! ScramblerChain (arena of units and rotors: stepping + signal path)
//!     ↓ driven by
//! EnigmaMachine  (presets, key and ring settings, encode)
//! ```
//!
//! # Examples
//!
//! Encrypt with the default army setup and decrypt from the same key:
//!
//! ```
//! use enigmasim::{catalogue, EnigmaMachine};
//!
//! let mut machine = EnigmaMachine::m3(
//!     &catalogue::REFLECTOR_B,
//!     &catalogue::ROTOR_I,
//!     &catalogue::ROTOR_II,
//!     &catalogue::ROTOR_III,
//!     "AB CD",
//! )
//! .unwrap();
//!
//! machine.set_key("KEY").unwrap();
//! let cipher = machine.encode("ATTACKATDAWN").unwrap();
//!
//! machine.set_key("KEY").unwrap();
//! assert_eq!(machine.encode(&cipher).unwrap(), "ATTACKATDAWN");
//! ```
//!
//! Build a machine from a stored key sheet:
//!
//! ```
//! use enigmasim::MachineConfig;
//!
//! let config = MachineConfig::from_json(
//!     r#"{ "model": "m3", "rotors": ["I", "II", "III"], "key": "AAA" }"#,
//! )
//! .unwrap();
//! let mut machine = config.build().unwrap();
//! assert_eq!(machine.encode("HELLOWORLD").unwrap(), "ILBDAAMTAZ");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod builder;
pub mod catalogue;
pub mod chain;
pub mod config;
pub mod error;
pub mod machine;
pub mod scrambler;
pub mod stepping;
pub mod wiring;

pub use builder::MachineBuilder;
pub use chain::{
    ChainElement, Connector, ElementRef, PassThrough, RotorId, ScramblerChain, UnitId,
};
pub use config::{MachineConfig, Model};
pub use error::{EnigmaError, EnigmaResult};
pub use machine::EnigmaMachine;
pub use scrambler::{RingSetting, Rotor, Scrambler};
pub use stepping::StepPolicy;
pub use wiring::{Permutation, WiringSpec};
