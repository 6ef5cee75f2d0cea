//! MachineBuilder: assembles a scrambler chain from components.
//!
//! The first element (plugboard or entry wheel) is added with
//! [`add`](MachineBuilder::add) and gets no connector. Every rotating or
//! reflecting element after it is preceded by a connector to the element
//! added before it. Rotors are added fastest first, which is also the
//! stepping order; the finished chain addresses them in reverse so that
//! rotor index 0 is the leftmost, slowest rotor.

use crate::chain::{
    ChainElement, Connector, ElementRef, RotorId, ScramblerChain, UnitId,
};
use crate::error::{EnigmaError, EnigmaResult};
use crate::machine::EnigmaMachine;
use crate::scrambler::{Rotor, Scrambler};
use crate::stepping::StepPolicy;

/// Incremental builder for a [`ScramblerChain`].
///
/// # Examples
///
/// ```
/// use enigmasim::{catalogue, MachineBuilder, Rotor, Scrambler, StepPolicy, WiringSpec};
///
/// let mut builder = MachineBuilder::new();
/// builder.add(Scrambler::new(&WiringSpec::identity()).unwrap());
/// let right = builder
///     .add_rotor(Rotor::new(&catalogue::ROTOR_III).unwrap(), StepPolicy::Always)
///     .unwrap();
/// let middle = builder
///     .add_rotor(Rotor::new(&catalogue::ROTOR_II).unwrap(), StepPolicy::NotchDoubleStep(right))
///     .unwrap();
/// builder
///     .add_rotor(Rotor::new(&catalogue::ROTOR_I).unwrap(), StepPolicy::Notch(middle))
///     .unwrap();
/// builder
///     .add_reflector(Scrambler::reflector(&catalogue::REFLECTOR_B).unwrap())
///     .unwrap();
///
/// let mut machine = builder.build().unwrap();
/// assert_eq!(machine.encode("HELLOWORLD").unwrap(), "ILBDAAMTAZ");
/// ```
#[derive(Debug, Default)]
pub struct MachineBuilder {
    units: Vec<Scrambler>,
    rotors: Vec<Rotor>,
    elements: Vec<ChainElement>,
    last: Option<ElementRef>,
}

impl MachineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a non-rotating leading element without a connector.
    pub fn add(&mut self, unit: Scrambler) -> &mut Self {
        let id = self.push_unit(unit);
        self.elements.push(ChainElement::Unit(id));
        self.last = Some(ElementRef::Unit(id));
        self
    }

    /// Appends a rotor wrapped in `policy`, preceded by a connector.
    ///
    /// # Returns
    /// The id of the new rotor, for use as the watched rotor of later
    /// policies.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidChain`] if nothing has been added yet or
    /// `policy` watches a rotor this builder has not issued.
    pub fn add_rotor(&mut self, rotor: Rotor, policy: StepPolicy) -> EnigmaResult<RotorId> {
        if let Some(watched) = policy.watched() {
            if watched.0 >= self.rotors.len() {
                return Err(EnigmaError::InvalidChain(format!(
                    "step policy of {} watches rotor #{} which is not in the chain yet",
                    rotor.name(),
                    watched.0
                )));
            }
        }
        let id = RotorId(self.rotors.len());
        let next = ElementRef::Rotor(id);
        self.push_connector(next, rotor.name())?;
        self.rotors.push(rotor);
        self.elements.push(ChainElement::Rotor { rotor: id, policy });
        self.last = Some(next);
        Ok(id)
    }

    /// Appends a fixed reflector, preceded by a connector.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidChain`] if nothing has been added yet.
    pub fn add_reflector(&mut self, reflector: Scrambler) -> EnigmaResult<&mut Self> {
        let id = UnitId(self.units.len());
        let next = ElementRef::Unit(id);
        self.push_connector(next, reflector.name())?;
        self.push_unit(reflector);
        self.elements.push(ChainElement::Unit(id));
        self.last = Some(next);
        Ok(self)
    }

    fn push_unit(&mut self, unit: Scrambler) -> UnitId {
        let id = UnitId(self.units.len());
        self.units.push(unit);
        id
    }

    fn push_connector(&mut self, next: ElementRef, name: &str) -> EnigmaResult<()> {
        let previous = self.last.ok_or_else(|| {
            EnigmaError::InvalidChain(format!(
                "{name} needs a leading element (plugboard or entry wheel) before it"
            ))
        })?;
        self.elements
            .push(ChainElement::Connector(Connector::new(previous, next)));
        Ok(())
    }

    /// Finishes the chain.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidChain`] if no element was added.
    pub fn build_chain(self) -> EnigmaResult<ScramblerChain> {
        if self.elements.is_empty() {
            return Err(EnigmaError::InvalidChain("chain is empty".to_string()));
        }
        let rotor_order: Vec<RotorId> = (0..self.rotors.len()).rev().map(RotorId).collect();
        log::debug!(
            "assembled scrambler chain: {} elements, {} rotors",
            self.elements.len(),
            self.rotors.len()
        );
        Ok(ScramblerChain::from_parts(
            self.units,
            self.rotors,
            self.elements,
            rotor_order,
        ))
    }

    /// Finishes the chain and wraps it in a machine with default
    /// pass-through symbols.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidChain`] if no element was added.
    pub fn build(self) -> EnigmaResult<EnigmaMachine> {
        Ok(EnigmaMachine::new(self.build_chain()?))
    }
}
