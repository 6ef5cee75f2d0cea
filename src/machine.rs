//! EnigmaMachine: an assembled scrambler chain plus its operator controls.
//!
//! The presets wire the catalogue wheels into the three historical layouts:
//!
//! ```text
//! M3       plugboard → right → middle → left → reflector
//! M4       plugboard → right → middle → left → thin → thin reflector
//! Railway  entry wheel → right → middle → left → adjustable reflector
//! ```
//!
//! Keys and ring settings are given left to right, one per rotor. On the M4
//! the thin rotor is the leftmost; on the Railway the adjustable reflector is.

use crate::alphabet;
use crate::builder::MachineBuilder;
use crate::catalogue;
use crate::chain::{PassThrough, ScramblerChain};
use crate::error::{EnigmaError, EnigmaResult};
use crate::scrambler::{RingSetting, Rotor, Scrambler};
use crate::stepping::StepPolicy;
use crate::wiring::WiringSpec;

/// A configured Enigma machine.
///
/// # Examples
///
/// Decrypt the example message from the 1930 operating manual:
///
/// ```
/// use enigmasim::{catalogue, EnigmaMachine};
///
/// let mut machine = EnigmaMachine::m3(
///     &catalogue::REFLECTOR_A,
///     &catalogue::ROTOR_II,
///     &catalogue::ROTOR_I,
///     &catalogue::ROTOR_III,
///     "AM FI NV PS TU WZ",
/// )
/// .unwrap();
/// machine.set_inner_ring_offset([24, 13, 22]).unwrap();
/// machine.set_key("ABL").unwrap();
///
/// let plain = machine.encode("GCDSEAHUGWTQGRKVLFGXUCALXVYMIGMMNMFDXT").unwrap();
/// assert!(plain.starts_with("FEINDLIQEINFANTERIEKOLONNE"));
/// ```
#[derive(Debug, Clone)]
pub struct EnigmaMachine {
    chain: ScramblerChain,
    pass_through: PassThrough,
}

/// Adds the three stepping rotors, fastest first, with M3 stepping.
fn add_stepping_rotors(
    builder: &mut MachineBuilder,
    left: &WiringSpec,
    middle: &WiringSpec,
    right: &WiringSpec,
) -> EnigmaResult<()> {
    let right = builder.add_rotor(Rotor::new(right)?, StepPolicy::Always)?;
    let middle = builder.add_rotor(Rotor::new(middle)?, StepPolicy::NotchDoubleStep(right))?;
    builder.add_rotor(Rotor::new(left)?, StepPolicy::Notch(middle))?;
    Ok(())
}

impl EnigmaMachine {
    /// Wraps an assembled chain, with the default pass-through set.
    pub fn new(chain: ScramblerChain) -> Self {
        EnigmaMachine {
            chain,
            pass_through: PassThrough::default(),
        }
    }

    /// Builds a three-rotor army/navy machine.
    ///
    /// # Parameters
    /// - `reflector`: Fixed reflector wiring.
    /// - `left`, `middle`, `right`: Rotor wirings as seen by the operator.
    /// - `plugboard`: Space-separated letter pairs; empty for no plugs.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`] for a non-bijective wiring and
    /// [`EnigmaError::InvalidPlugboard`] for malformed pairs.
    pub fn m3(
        reflector: &WiringSpec,
        left: &WiringSpec,
        middle: &WiringSpec,
        right: &WiringSpec,
        plugboard: &str,
    ) -> EnigmaResult<Self> {
        let mut builder = MachineBuilder::new();
        builder.add(Scrambler::new(&WiringSpec::plugboard(plugboard)?)?);
        add_stepping_rotors(&mut builder, left, middle, right)?;
        builder.add_reflector(Scrambler::reflector(reflector)?)?;
        builder.build()
    }

    /// Builds a four-rotor naval machine.
    ///
    /// The `thin` rotor sits between the left rotor and the thin reflector
    /// and never steps; it is rotor index 0 for keys and ring settings.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`] for a non-bijective wiring and
    /// [`EnigmaError::InvalidPlugboard`] for malformed pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmasim::{catalogue, EnigmaMachine};
    ///
    /// let machine = EnigmaMachine::m4(
    ///     &catalogue::REFLECTOR_B_THIN,
    ///     &catalogue::ROTOR_BETA,
    ///     &catalogue::ROTOR_II,
    ///     &catalogue::ROTOR_IV,
    ///     &catalogue::ROTOR_I,
    ///     "",
    /// )
    /// .unwrap();
    /// assert_eq!(machine.rotor_count(), 4);
    /// assert_eq!(machine.rotors_position(), "AAAA");
    /// ```
    pub fn m4(
        reflector: &WiringSpec,
        thin: &WiringSpec,
        left: &WiringSpec,
        middle: &WiringSpec,
        right: &WiringSpec,
        plugboard: &str,
    ) -> EnigmaResult<Self> {
        let mut builder = MachineBuilder::new();
        builder.add(Scrambler::new(&WiringSpec::plugboard(plugboard)?)?);
        add_stepping_rotors(&mut builder, left, middle, right)?;
        builder.add_rotor(Rotor::new(thin)?, StepPolicy::Never)?;
        builder.add_reflector(Scrambler::reflector(reflector)?)?;
        builder.build()
    }

    /// Builds an Enigma K Railway machine.
    ///
    /// The machine has no plugboard; the QWERTZ entry wheel leads the chain
    /// and the adjustable reflector closes it. The reflector is set like a
    /// rotor (rotor index 0) but never steps.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`] for a non-bijective wiring.
    pub fn railway(
        left: &WiringSpec,
        middle: &WiringSpec,
        right: &WiringSpec,
    ) -> EnigmaResult<Self> {
        let mut builder = MachineBuilder::new();
        builder.add(Scrambler::new(&catalogue::ETW_QWERTZ)?);
        add_stepping_rotors(&mut builder, left, middle, right)?;
        builder.add_rotor(
            Rotor::adjustable_reflector(&catalogue::RAILWAY_REFLECTOR)?,
            StepPolicy::Never,
        )?;
        builder.build()
    }

    /// The underlying scrambler chain.
    pub fn chain(&self) -> &ScramblerChain {
        &self.chain
    }

    /// Number of key-settable rotors.
    pub fn rotor_count(&self) -> usize {
        self.chain.rotor_order().len()
    }

    fn check_count(&self, actual: usize) -> EnigmaResult<()> {
        let expected = self.rotor_count();
        if actual != expected {
            return Err(EnigmaError::SettingCountMismatch { expected, actual });
        }
        Ok(())
    }

    /// Sets the rotor window letters, left to right.
    ///
    /// The key is validated as a whole before any rotor turns.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SettingCountMismatch`] unless `key` holds one
    /// letter per rotor, and [`EnigmaError::OutOfAlphabet`] for a symbol
    /// outside the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmasim::{catalogue, EnigmaMachine};
    ///
    /// let mut machine = EnigmaMachine::m3(
    ///     &catalogue::REFLECTOR_B,
    ///     &catalogue::ROTOR_I,
    ///     &catalogue::ROTOR_II,
    ///     &catalogue::ROTOR_III,
    ///     "",
    /// )
    /// .unwrap();
    /// machine.set_key("QET").unwrap();
    /// assert_eq!(machine.rotors_position(), "QET");
    /// assert!(machine.set_key("QE").is_err());
    /// ```
    pub fn set_key(&mut self, key: &str) -> EnigmaResult<&mut Self> {
        let symbols: Vec<char> = key.chars().collect();
        self.check_count(symbols.len())?;
        for &symbol in &symbols {
            alphabet::index_of(symbol)?;
        }
        for (i, &symbol) in symbols.iter().enumerate() {
            let id = self.chain.rotor_order()[i];
            self.chain.rotor_mut(id).with_key(symbol)?;
        }
        log::debug!("key set to {}", self.rotors_position());
        Ok(self)
    }

    /// Sets the ring settings, left to right.
    ///
    /// Each setting is a 1-based number or a letter; see [`RingSetting`].
    /// The settings are validated as a whole before any ring moves.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SettingCountMismatch`] unless there is one
    /// setting per rotor, and [`EnigmaError::OutOfAlphabet`] for a letter
    /// setting outside the alphabet.
    pub fn set_inner_ring_offset<I>(&mut self, settings: I) -> EnigmaResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<RingSetting>,
    {
        let settings: Vec<RingSetting> = settings.into_iter().map(Into::into).collect();
        self.check_count(settings.len())?;
        for setting in &settings {
            setting.offset()?;
        }
        for (i, &setting) in settings.iter().enumerate() {
            let id = self.chain.rotor_order()[i];
            self.chain.rotor_mut(id).with_inner_ring(setting)?;
        }
        log::debug!("ring settings applied: {settings:?}");
        Ok(self)
    }

    /// Window letters of all rotors, left to right.
    pub fn rotors_position(&self) -> String {
        self.chain.rotors_position()
    }

    /// Encodes (or decodes) `text`, stepping once per symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`] for a symbol that is neither in
    /// the alphabet nor a pass-through symbol; the machine is then unchanged.
    pub fn encode(&mut self, text: &str) -> EnigmaResult<String> {
        self.chain.encode_message(text, &self.pass_through)
    }

    /// Encodes one symbol at the current positions without stepping.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`] for a symbol that is neither in
    /// the alphabet nor a pass-through symbol.
    pub fn encode_char(&self, symbol: char) -> EnigmaResult<char> {
        self.chain.encode_char(symbol, &self.pass_through)
    }

    /// Runs one stepping phase without encoding.
    pub fn step(&mut self) {
        self.chain.step();
    }

    /// Replaces the set of symbols copied through unchanged.
    pub fn set_pass_through(&mut self, pass_through: PassThrough) -> &mut Self {
        self.pass_through = pass_through;
        self
    }

    /// The symbols copied through unchanged.
    pub fn pass_through(&self) -> &PassThrough {
        &self.pass_through
    }
}
