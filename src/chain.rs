//! ScramblerChain: the signal path and stepping order of one machine.
//!
//! The chain owns every [`Scrambler`] and [`Rotor`] in flat arenas and
//! refers to them by [`UnitId`] / [`RotorId`]. Connectors and stepping
//! policies hold ids, never references, so the neighbour relations stay
//! non-owning and the chain is the sole owner of all wheel state.
//!
//! Encoding a keystroke runs the stepping phase over the elements in chain
//! order, then passes the signal forward through every element and back
//! through them in reverse.

use crate::alphabet::{self, SIZE};
use crate::error::{EnigmaError, EnigmaResult};
use crate::scrambler::{Rotor, Scrambler};
use crate::stepping::StepPolicy;

/// Identifier of a non-rotating unit within a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(pub(crate) usize);

/// Identifier of a rotor within a chain.
///
/// Returned by [`MachineBuilder::add_rotor`](crate::MachineBuilder::add_rotor)
/// and used by step policies to name the rotor they watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotorId(pub(crate) usize);

/// A wheel a connector reads its positional frame from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRef {
    /// A unit that never turns, such as the plugboard or an entry wheel.
    Unit(UnitId),
    /// A rotor in the chain's rotor arena.
    Rotor(RotorId),
}

/// Stateless coupling between two adjacent wheels.
///
/// Translates a signal position to compensate for the relative rotation
/// and ring offset of `left` (earlier in the chain) and `right` (later).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connector {
    left: ElementRef,
    right: ElementRef,
}

impl Connector {
    /// Creates a connector between two already-built elements.
    pub fn new(left: ElementRef, right: ElementRef) -> Self {
        Connector { left, right }
    }

    /// The earlier element.
    pub fn left(&self) -> ElementRef {
        self.left
    }

    /// The later element.
    pub fn right(&self) -> ElementRef {
        self.right
    }

    /// Offset applied on the forward leg; the backward leg uses its negation.
    fn offset(&self, chain: &ScramblerChain) -> i64 {
        let (a_rotation, a_ring) = chain.frame(self.left);
        let (b_rotation, b_ring) = chain.frame(self.right);
        (b_rotation - a_rotation) - b_ring + a_ring
    }

    #[inline]
    fn forward(&self, chain: &ScramblerChain, position: usize) -> usize {
        alphabet::shift(position, self.offset(chain))
    }

    #[inline]
    fn backward(&self, chain: &ScramblerChain, position: usize) -> usize {
        alphabet::shift(position, -self.offset(chain))
    }

    /// Re-expresses `symbol` in the frame of `right` (forward leg).
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`] for a symbol outside the alphabet.
    pub fn input(&self, chain: &ScramblerChain, symbol: char) -> EnigmaResult<char> {
        Ok(alphabet::symbol_at(
            self.forward(chain, alphabet::index_of(symbol)?),
        ))
    }

    /// Re-expresses `symbol` in the frame of `left` (backward leg).
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`] for a symbol outside the alphabet.
    pub fn output(&self, chain: &ScramblerChain, symbol: char) -> EnigmaResult<char> {
        Ok(alphabet::symbol_at(
            self.backward(chain, alphabet::index_of(symbol)?),
        ))
    }
}

/// One position in the signal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainElement {
    /// A non-rotating unit: plugboard, entry wheel or fixed reflector.
    Unit(UnitId),
    /// A rotor together with the policy deciding when it steps.
    Rotor { rotor: RotorId, policy: StepPolicy },
    /// Offset compensation between two neighbouring wheels.
    Connector(Connector),
}

/// Symbols copied to the output unchanged instead of being enciphered.
///
/// The default set holds only `'.'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassThrough {
    symbols: Vec<char>,
}

impl Default for PassThrough {
    fn default() -> Self {
        PassThrough { symbols: vec!['.'] }
    }
}

impl PassThrough {
    /// Creates a pass-through set from `symbols`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidPassThrough`] if a symbol belongs to the
    /// alphabet.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> EnigmaResult<Self> {
        let mut set = Vec::new();
        for symbol in symbols {
            if alphabet::contains(symbol) {
                return Err(EnigmaError::InvalidPassThrough(symbol));
            }
            if !set.contains(&symbol) {
                set.push(symbol);
            }
        }
        Ok(PassThrough { symbols: set })
    }

    /// An empty set: every non-alphabet symbol is rejected.
    pub fn none() -> Self {
        PassThrough {
            symbols: Vec::new(),
        }
    }

    /// Whether `symbol` is passed through unchanged.
    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    /// The configured symbols.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

/// Ordered signal path of an assembled machine.
#[derive(Debug, Clone)]
pub struct ScramblerChain {
    units: Vec<Scrambler>,
    rotors: Vec<Rotor>,
    elements: Vec<ChainElement>,
    rotor_order: Vec<RotorId>,
}

impl ScramblerChain {
    /// Assembles a chain from its parts; `rotor_order` lists rotors left
    /// (slowest) to right (fastest).
    pub(crate) fn from_parts(
        units: Vec<Scrambler>,
        rotors: Vec<Rotor>,
        elements: Vec<ChainElement>,
        rotor_order: Vec<RotorId>,
    ) -> Self {
        ScramblerChain {
            units,
            rotors,
            elements,
            rotor_order,
        }
    }

    /// Elements in signal (and stepping) order.
    pub fn elements(&self) -> &[ChainElement] {
        &self.elements
    }

    /// Rotor ids addressed left to right; index 0 is the slowest rotor.
    pub fn rotor_order(&self) -> &[RotorId] {
        &self.rotor_order
    }

    /// Returns the rotor behind `id`.
    ///
    /// # Panics
    /// Panics if `id` was issued for a different chain.
    pub fn rotor(&self, id: RotorId) -> &Rotor {
        &self.rotors[id.0]
    }

    pub(crate) fn rotor_mut(&mut self, id: RotorId) -> &mut Rotor {
        &mut self.rotors[id.0]
    }

    /// Returns the unit behind `id`.
    ///
    /// # Panics
    /// Panics if `id` was issued for a different chain.
    pub fn unit(&self, id: UnitId) -> &Scrambler {
        &self.units[id.0]
    }

    /// Rotation and ring offset of a referenced wheel.
    fn frame(&self, element: ElementRef) -> (i64, i64) {
        let scrambler = match element {
            ElementRef::Unit(id) => &self.units[id.0],
            ElementRef::Rotor(id) => self.rotors[id.0].scrambler(),
        };
        (scrambler.rotation() as i64, scrambler.ring_offset())
    }

    /// Window letters of all rotors, left to right.
    pub fn rotors_position(&self) -> String {
        self.rotor_order
            .iter()
            .map(|id| self.rotors[id.0].key())
            .collect()
    }

    /// Runs one stepping phase: every element in chain order.
    pub fn step(&mut self) {
        for element in &self.elements {
            if let ChainElement::Rotor { rotor, policy } = *element {
                policy.step(rotor, &mut self.rotors);
            }
        }
        log::trace!("stepped to {}", self.rotors_position());
    }

    fn input_at(&self, element: &ChainElement, position: usize) -> usize {
        match element {
            ChainElement::Unit(id) => self.units[id.0].forward(position),
            ChainElement::Rotor { rotor, .. } => self.rotors[rotor.0].scrambler().forward(position),
            ChainElement::Connector(connector) => connector.forward(self, position),
        }
    }

    fn output_at(&self, element: &ChainElement, position: usize) -> usize {
        match element {
            ChainElement::Unit(id) => self.units[id.0].backward(position),
            ChainElement::Rotor { rotor, .. } => {
                self.rotors[rotor.0].scrambler().backward(position)
            }
            ChainElement::Connector(connector) => connector.backward(self, position),
        }
    }

    /// Full forward-then-backward pass of an alphabet position.
    fn encode_position(&self, position: usize) -> usize {
        debug_assert!(position < SIZE);
        let forward = self
            .elements
            .iter()
            .fold(position, |pos, element| self.input_at(element, pos));
        self.elements
            .iter()
            .rev()
            .fold(forward, |pos, element| self.output_at(element, pos))
    }

    /// Encodes one symbol at the current rotor positions, without stepping.
    ///
    /// Pass-through symbols are returned unchanged.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`] for any other symbol outside
    /// the alphabet.
    pub fn encode_char(&self, symbol: char, pass_through: &PassThrough) -> EnigmaResult<char> {
        if pass_through.contains(symbol) {
            return Ok(symbol);
        }
        let position = alphabet::index_of(symbol)?;
        Ok(alphabet::symbol_at(self.encode_position(position)))
    }

    /// Encodes a message: for each symbol, step then encode.
    ///
    /// The message is checked before any rotor moves, so on error the chain
    /// is left exactly as it was and no partial output is produced.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfAlphabet`] for the first symbol that is
    /// neither in the alphabet nor a pass-through symbol.
    pub fn encode_message(
        &mut self,
        text: &str,
        pass_through: &PassThrough,
    ) -> EnigmaResult<String> {
        if let Some(bad) = text
            .chars()
            .find(|&c| !alphabet::contains(c) && !pass_through.contains(c))
        {
            return Err(EnigmaError::OutOfAlphabet(bad));
        }

        let mut output = String::with_capacity(text.len());
        for symbol in text.chars() {
            self.step();
            if pass_through.contains(symbol) {
                output.push(symbol);
            } else {
                let position = alphabet::index_of(symbol)?;
                output.push(alphabet::symbol_at(self.encode_position(position)));
            }
        }
        Ok(output)
    }
}
