//! Serializable machine settings.
//!
//! A [`MachineConfig`] names every component by its catalogue name, so a
//! daily key sheet can be stored as JSON and turned into a ready machine:
//!
//! ```json
//! {
//!   "model": "m3",
//!   "reflector": "A",
//!   "rotors": ["II", "I", "III"],
//!   "rings": [24, 13, 22],
//!   "key": "ABL",
//!   "plugboard": "AM FI NV PS TU WZ"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::catalogue;
use crate::chain::PassThrough;
use crate::error::{EnigmaError, EnigmaResult};
use crate::machine::EnigmaMachine;
use crate::wiring::WiringSpec;

/// Machine family a configuration describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    /// Three-rotor army/navy machine with plugboard.
    #[default]
    M3,
    /// Four-rotor naval machine; the first rotor is a thin rotor.
    M4,
    /// Enigma K Railway: no plugboard, adjustable reflector.
    Railway,
}

impl Model {
    /// Number of wheel names a configuration lists for this model.
    pub fn wheel_count(self) -> usize {
        match self {
            Model::M3 | Model::Railway => 3,
            Model::M4 => 4,
        }
    }

    /// Number of key letters and ring settings the built machine takes.
    pub fn setting_count(self) -> usize {
        match self {
            Model::M3 => 3,
            Model::M4 | Model::Railway => 4,
        }
    }

    fn default_reflector(self) -> &'static WiringSpec {
        match self {
            Model::M3 | Model::Railway => &catalogue::REFLECTOR_B,
            Model::M4 => &catalogue::REFLECTOR_B_THIN,
        }
    }
}

/// Complete setting of one machine.
///
/// Missing fields take their defaults. Empty `rings` leaves every ring at 1
/// and an empty `key` leaves every rotor at `A`, whatever the model's rotor
/// count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Machine family.
    /// Default: `m3`.
    pub model: Model,

    /// Reflector name. `None` selects B (M3) or B-Thin (M4); the Railway
    /// always uses its own adjustable reflector.
    /// Default: `None`.
    pub reflector: Option<String>,

    /// Wheel names, left to right. The M4 lists its thin rotor first.
    /// Default: `["I", "II", "III"]`.
    pub rotors: Vec<String>,

    /// 1-based ring settings, left to right.
    /// Default: empty (every ring at 1).
    pub rings: Vec<i64>,

    /// Window letters, left to right.
    /// Default: empty (every rotor at `A`).
    pub key: String,

    /// Space-separated plugboard pairs.
    /// Default: empty.
    pub plugboard: String,

    /// Symbols copied through unchanged.
    /// Default: `['.']`.
    pub pass_through: Vec<char>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            model: Model::M3,
            reflector: None,
            rotors: vec!["I".to_string(), "II".to_string(), "III".to_string()],
            rings: Vec::new(),
            key: String::new(),
            plugboard: String::new(),
            pass_through: vec!['.'],
        }
    }
}

/// Catalogue entries a configuration resolves to.
struct Resolved {
    reflector: &'static WiringSpec,
    wheels: Vec<&'static WiringSpec>,
}

impl MachineConfig {
    fn resolve(&self) -> EnigmaResult<Resolved> {
        let expected = self.model.wheel_count();
        if self.rotors.len() != expected {
            return Err(EnigmaError::Config(format!(
                "{:?} takes {expected} rotors, got {}",
                self.model,
                self.rotors.len()
            )));
        }
        let wheels = self
            .rotors
            .iter()
            .enumerate()
            .map(|(i, name)| match self.model {
                Model::M3 => catalogue::rotor(name),
                Model::M4 if i == 0 => catalogue::thin_rotor(name),
                Model::M4 => catalogue::rotor(name),
                Model::Railway => catalogue::railway_rotor(name),
            })
            .collect::<EnigmaResult<Vec<_>>>()?;
        let reflector = match (&self.reflector, self.model) {
            (Some(name), Model::M3 | Model::M4) => catalogue::reflector(name)?,
            _ => self.model.default_reflector(),
        };
        let thin = catalogue::is_thin_reflector(reflector);
        match self.model {
            Model::M3 if thin => {
                return Err(EnigmaError::Config(format!(
                    "M3 takes a full-width reflector, got {}",
                    reflector.name()
                )))
            }
            Model::M4 if !thin => {
                return Err(EnigmaError::Config(format!(
                    "M4 takes a thin reflector, got {}",
                    reflector.name()
                )))
            }
            _ => {}
        }
        Ok(Resolved { reflector, wheels })
    }

    /// Runs every check and returns the catalogue entries to build from.
    fn checked(&self) -> EnigmaResult<Resolved> {
        let resolved = self.resolve()?;
        let expected = self.model.setting_count();
        for actual in [self.rings.len(), self.key.chars().count()] {
            if actual != 0 && actual != expected {
                return Err(EnigmaError::SettingCountMismatch { expected, actual });
            }
        }
        for symbol in self.key.chars() {
            crate::alphabet::index_of(symbol)?;
        }
        WiringSpec::plugboard(&self.plugboard)?;
        PassThrough::new(self.pass_through.iter().copied())?;
        Ok(resolved)
    }

    /// Validate configuration parameters.
    ///
    /// # Errors
    /// - [`EnigmaError::Config`] if the number of rotors does not match the
    ///   model, or the reflector width does not: the M3 takes A or B, the M4
    ///   takes B-Thin or C-Thin.
    /// - [`EnigmaError::UnknownComponent`] for a name not in the catalogue.
    /// - [`EnigmaError::SettingCountMismatch`] if `rings` or `key` is
    ///   non-empty and does not hold one entry per rotor.
    /// - [`EnigmaError::OutOfAlphabet`] for a key letter outside the alphabet.
    /// - [`EnigmaError::InvalidPlugboard`] for malformed pairs.
    /// - [`EnigmaError::InvalidPassThrough`] for a pass-through letter.
    pub fn validate(&self) -> EnigmaResult<()> {
        self.checked().map(|_| ())
    }

    /// Builds a machine set to this configuration.
    ///
    /// # Errors
    /// Any error [`validate`](Self::validate) reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmasim::MachineConfig;
    ///
    /// let config = MachineConfig::from_json(r#"{ "key": "QET" }"#).unwrap();
    /// let mut machine = config.build().unwrap();
    /// assert_eq!(machine.encode("AAAAA").unwrap(), "IHRWF");
    /// assert_eq!(machine.rotors_position(), "RGY");
    /// ```
    pub fn build(&self) -> EnigmaResult<EnigmaMachine> {
        let Resolved { reflector, wheels } = self.checked()?;

        let mut machine = match self.model {
            Model::M3 => EnigmaMachine::m3(
                reflector,
                wheels[0],
                wheels[1],
                wheels[2],
                &self.plugboard,
            )?,
            Model::M4 => EnigmaMachine::m4(
                reflector,
                wheels[0],
                wheels[1],
                wheels[2],
                wheels[3],
                &self.plugboard,
            )?,
            Model::Railway => {
                if self.reflector.is_some() {
                    log::warn!("railway machine ignores reflector setting {:?}", self.reflector);
                }
                if !self.plugboard.trim().is_empty() {
                    log::warn!("railway machine has no plugboard, ignoring {:?}", self.plugboard);
                }
                EnigmaMachine::railway(wheels[0], wheels[1], wheels[2])?
            }
        };

        if !self.rings.is_empty() {
            machine.set_inner_ring_offset(self.rings.iter().copied())?;
        }
        if !self.key.is_empty() {
            machine.set_key(&self.key)?;
        }
        machine.set_pass_through(PassThrough::new(self.pass_through.iter().copied())?);

        log::debug!(
            "built {:?} machine with rotors {:?} at {}",
            self.model,
            self.rotors,
            machine.rotors_position()
        );
        Ok(machine)
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> EnigmaResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| EnigmaError::Config(format!("JSON parse error: {e}")))
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json(&self) -> EnigmaResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EnigmaError::Config(format!("JSON serialize error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MachineConfig::default();
        assert!(config.validate().is_ok());
        let mut machine = config.build().unwrap();
        assert_eq!(machine.encode("HELLOWORLD").unwrap(), "ILBDAAMTAZ");
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = MachineConfig::from_json(r#"{ "plugboard": "AB CD" }"#).unwrap();
        assert_eq!(config.model, Model::M3);
        assert_eq!(config.rotors, vec!["I", "II", "III"]);
        assert_eq!(config.plugboard, "AB CD");
        assert_eq!(config.pass_through, vec!['.']);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = MachineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EnigmaError::Config(ref msg) if msg.contains("JSON parse error")));
        assert!(MachineConfig::from_json(r#"{ "model": "m5" }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = MachineConfig {
            model: Model::M4,
            reflector: Some("C-Thin".to_string()),
            rotors: vec!["Gamma".into(), "VI".into(), "VII".into(), "VIII".into()],
            rings: vec![1, 2, 3, 4],
            key: "ZZZZ".to_string(),
            plugboard: "QW ER".to_string(),
            pass_through: vec![' ', '.'],
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"m4\""));
        assert_eq!(MachineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_validate_rotor_count() {
        let config = MachineConfig {
            rotors: vec!["I".into(), "II".into()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EnigmaError::Config(_))));
    }

    #[test]
    fn test_validate_unknown_names() {
        let config = MachineConfig {
            reflector: Some("Q".into()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(EnigmaError::UnknownComponent("Q".to_string()))
        );

        // A thin rotor is not accepted in a regular slot.
        let config = MachineConfig {
            model: Model::M4,
            rotors: vec!["I".into(), "Beta".into(), "II".into(), "III".into()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EnigmaError::UnknownComponent(_))
        ));
    }

    #[test]
    fn test_validate_setting_counts() {
        let config = MachineConfig {
            key: "AAAA".into(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(EnigmaError::SettingCountMismatch {
                expected: 3,
                actual: 4
            })
        );

        let config = MachineConfig {
            rings: vec![1, 1, 1],
            key: "AAA".into(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = MachineConfig {
            model: Model::Railway,
            rotors: vec!["KR-I".into(), "KR-II".into(), "KR-III".into()],
            rings: vec![1, 1, 1],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(EnigmaError::SettingCountMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_validate_plugboard_and_pass_through() {
        let config = MachineConfig {
            plugboard: "AA".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EnigmaError::InvalidPlugboard(_))
        ));

        let config = MachineConfig {
            pass_through: vec!['E'],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(EnigmaError::InvalidPassThrough('E')));
    }

    #[test]
    fn test_build_with_extreme_rings() {
        let extreme = MachineConfig::from_json(
            r#"{ "rings": [-9223372036854775808, 9223372036854775807, 1] }"#,
        )
        .unwrap();
        let reduced = MachineConfig::from_json(r#"{ "rings": [18, 7, 1] }"#).unwrap();
        assert_eq!(
            extreme.build().unwrap().encode("AAAABBBBCCCC").unwrap(),
            reduced.build().unwrap().encode("AAAABBBBCCCC").unwrap()
        );
    }

    #[test]
    fn test_reflector_width_must_match_model() {
        let thin_on_m3 = MachineConfig {
            reflector: Some("B-Thin".into()),
            ..Default::default()
        };
        let err = thin_on_m3.validate().unwrap_err();
        assert!(matches!(err, EnigmaError::Config(ref msg) if msg.contains("B-Thin")));
        assert!(thin_on_m3.build().is_err());

        let full_on_m4 = MachineConfig {
            model: Model::M4,
            reflector: Some("B".into()),
            rotors: vec!["Beta".into(), "I".into(), "II".into(), "III".into()],
            ..Default::default()
        };
        let err = full_on_m4.validate().unwrap_err();
        assert!(matches!(err, EnigmaError::Config(ref msg) if msg.contains("thin")));

        let c_thin_on_m4 = MachineConfig {
            reflector: Some("c-thin".into()),
            ..full_on_m4
        };
        assert!(c_thin_on_m4.validate().is_ok());
    }

    #[test]
    fn test_build_reports_first_failing_check() {
        let config = MachineConfig {
            rotors: vec!["I".into(), "II".into(), "IX".into()],
            key: "AAAA".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.build().unwrap_err(),
            EnigmaError::UnknownComponent("IX".to_string())
        );
        let config = MachineConfig {
            key: "AAAA".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.build().unwrap_err(),
            EnigmaError::SettingCountMismatch { expected: 3, actual: 4 }
        );
    }

    #[test]
    fn test_build_railway() {
        let config = MachineConfig::from_json(
            r#"{
                "model": "railway",
                "rotors": ["KR-III", "KR-I", "KR-II"],
                "rings": [26, 17, 16, 13],
                "key": "JEZA"
            }"#,
        )
        .unwrap();
        let mut machine = config.build().unwrap();
        assert_eq!(
            machine.encode("QSZVIDVMPNEXACMRWWXUIYOTYNGVVXDZ").unwrap(),
            "DEUTSQETRUPPENSINDJETZTINENGLAND"
        );
    }

    #[test]
    fn test_build_m4_defaults_to_thin_b() {
        let config = MachineConfig {
            model: Model::M4,
            rotors: vec!["Beta".into(), "I".into(), "II".into(), "III".into()],
            ..Default::default()
        };
        let mut machine = config.build().unwrap();
        assert_eq!(machine.rotors_position(), "AAAA");
        assert_eq!(machine.encode("HELLOWORLD").unwrap(), "ILBDAAMTAZ");
    }
}
