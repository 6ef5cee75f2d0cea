//! Historical wiring tables.
//!
//! Rotor, reflector and entry-wheel wirings of the Enigma I/M3, the naval M4
//! and the Enigma K Railway, as process-wide constants.

use crate::error::{EnigmaError, EnigmaResult};
use crate::wiring::WiringSpec;

// ──────── Army / navy rotors ────────

pub static ROTOR_I: WiringSpec = WiringSpec::from_static("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "Q");
pub static ROTOR_II: WiringSpec = WiringSpec::from_static("II", "AJDKSIRUXBLHWTMCQGZNPYFVOE", "E");
pub static ROTOR_III: WiringSpec =
    WiringSpec::from_static("III", "BDFHJLCPRTXVZNYEIWGAKMUSQO", "V");
pub static ROTOR_IV: WiringSpec = WiringSpec::from_static("IV", "ESOVPZJAYQUIRHXLNFTGKDCMWB", "J");
pub static ROTOR_V: WiringSpec = WiringSpec::from_static("V", "VZBRGITYUPSDNHLXAWMJQOFECK", "Z");
pub static ROTOR_VI: WiringSpec = WiringSpec::from_static("VI", "JPGVOUMFYQBENHZRDKASXLICTW", "ZM");
pub static ROTOR_VII: WiringSpec =
    WiringSpec::from_static("VII", "NZJHGRCXMYSWBOUFAIVLPEKQDT", "ZM");
pub static ROTOR_VIII: WiringSpec =
    WiringSpec::from_static("VIII", "FKQHTLXOCBJSPDZRAMEWNIUYGV", "ZM");

// ──────── M4 thin rotors (never step) ────────

pub static ROTOR_BETA: WiringSpec =
    WiringSpec::from_static("Beta", "LEYJVCNIXWPBQMDRTAKZGFUHOS", "");
pub static ROTOR_GAMMA: WiringSpec =
    WiringSpec::from_static("Gamma", "FSOKANUERHMBTIYCWLQPZXVGJD", "");

// ──────── Reflectors ────────

pub static REFLECTOR_A: WiringSpec = WiringSpec::from_static("A", "EJMZALYXVBWFCRQUONTSPIKHGD", "");
pub static REFLECTOR_B: WiringSpec = WiringSpec::from_static("B", "YRUHQSLDPXNGOKMIEBFZCWVJAT", "");
pub static REFLECTOR_B_THIN: WiringSpec =
    WiringSpec::from_static("B-Thin", "ENKQAUYWJICOPBLMDXZVFTHRGS", "");
pub static REFLECTOR_C_THIN: WiringSpec =
    WiringSpec::from_static("C-Thin", "RDOBJNTKVEHMLFCWZAXGYIPSUQ", "");

// ──────── Entry wheels ────────

/// Enigma K entry wheel (keyboard order QWERTZ...).
pub static ETW_QWERTZ: WiringSpec =
    WiringSpec::from_static("ETW-QWERTZ", "JWULCMNOHPQZYXIRADKEGVBTSF", "");
/// Enigma T entry wheel.
pub static ETW_KZROUQ: WiringSpec =
    WiringSpec::from_static("ETW-KZROUQ", "ILXRZTKGJYAMWVDUFCPQEONSHB", "");

// ──────── Enigma K Railway ────────

pub static RAILWAY_ROTOR_I: WiringSpec =
    WiringSpec::from_static("KR-I", "JGDQOXUSCAMIFRVTPNEWKBLZYH", "N");
pub static RAILWAY_ROTOR_II: WiringSpec =
    WiringSpec::from_static("KR-II", "NTZPSFBOKMWRCJDIVLAEYUXHGQ", "E");
pub static RAILWAY_ROTOR_III: WiringSpec =
    WiringSpec::from_static("KR-III", "JVIUBHTCDYAKEQZPOSGXNRMWFL", "Y");
/// Manually positionable reflector of the Railway machine; it has no notch.
pub static RAILWAY_REFLECTOR: WiringSpec =
    WiringSpec::from_static("UKW-KR", "QYHOGNECVPUZTFDJAXWMKISRBL", "");

static ROTORS: [&WiringSpec; 8] = [
    &ROTOR_I,
    &ROTOR_II,
    &ROTOR_III,
    &ROTOR_IV,
    &ROTOR_V,
    &ROTOR_VI,
    &ROTOR_VII,
    &ROTOR_VIII,
];

static THIN_ROTORS: [&WiringSpec; 2] = [&ROTOR_BETA, &ROTOR_GAMMA];

static REFLECTORS: [&WiringSpec; 4] = [
    &REFLECTOR_A,
    &REFLECTOR_B,
    &REFLECTOR_B_THIN,
    &REFLECTOR_C_THIN,
];

static RAILWAY_ROTORS: [&WiringSpec; 3] = [&RAILWAY_ROTOR_I, &RAILWAY_ROTOR_II, &RAILWAY_ROTOR_III];

fn lookup(table: &[&'static WiringSpec], name: &str) -> EnigmaResult<&'static WiringSpec> {
    let wanted = name.trim();
    table
        .iter()
        .copied()
        .find(|spec| spec.name().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| EnigmaError::UnknownComponent(name.to_string()))
}

/// Looks up an army/navy rotor by its roman numeral (`"I"` .. `"VIII"`).
///
/// # Errors
/// Returns [`EnigmaError::UnknownComponent`] for any other name.
pub fn rotor(name: &str) -> EnigmaResult<&'static WiringSpec> {
    lookup(&ROTORS, name)
}

/// Looks up an M4 thin rotor (`"Beta"` or `"Gamma"`).
///
/// # Errors
/// Returns [`EnigmaError::UnknownComponent`] for any other name.
pub fn thin_rotor(name: &str) -> EnigmaResult<&'static WiringSpec> {
    lookup(&THIN_ROTORS, name)
}

/// Looks up a reflector (`"A"`, `"B"`, `"B-Thin"`, `"C-Thin"`).
///
/// # Errors
/// Returns [`EnigmaError::UnknownComponent`] for any other name.
pub fn reflector(name: &str) -> EnigmaResult<&'static WiringSpec> {
    lookup(&REFLECTORS, name)
}

/// Looks up a Railway rotor (`"KR-I"`, `"KR-II"`, `"KR-III"`).
///
/// # Errors
/// Returns [`EnigmaError::UnknownComponent`] for any other name.
pub fn railway_rotor(name: &str) -> EnigmaResult<&'static WiringSpec> {
    lookup(&RAILWAY_ROTORS, name)
}

/// Whether `spec` is one of the thin reflectors that fit beside an M4 thin
/// rotor.
pub fn is_thin_reflector(spec: &WiringSpec) -> bool {
    [&REFLECTOR_B_THIN, &REFLECTOR_C_THIN]
        .iter()
        .any(|thin| *thin == spec)
}
