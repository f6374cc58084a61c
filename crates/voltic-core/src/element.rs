//! Two-terminal circuit elements.
//!
//! An [`Element`] is a named two-terminal device: the current reference
//! direction runs from `node_pos` to `node_neg` through the element. The
//! kind is a tagged variant, so dispatch during stamping is a single
//! pattern match.

use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::waveform::Waveform;

/// The kind of a two-terminal element, with per-kind parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Resistor with resistance in ohms (must be positive).
    Resistor { resistance: f64 },
    /// Capacitor with capacitance in farads (must be positive).
    Capacitor { capacitance: f64 },
    /// Inductor with inductance in henries (must be positive).
    Inductor { inductance: f64 },
    /// Independent voltage source.
    VoltageSource { waveform: Waveform },
    /// Independent current source.
    CurrentSource { waveform: Waveform },
}

impl ElementKind {
    /// Human-readable kind name, as used in the save format.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ElementKind::Resistor { .. } => "Resistor",
            ElementKind::Capacitor { .. } => "Capacitor",
            ElementKind::Inductor { .. } => "Inductor",
            ElementKind::VoltageSource { .. } => "VoltageSource",
            ElementKind::CurrentSource { .. } => "CurrentSource",
        }
    }

    /// Display unit for the element's primary value.
    pub fn unit(&self) -> &'static str {
        match self {
            ElementKind::Resistor { .. } => "Ohm",
            ElementKind::Capacitor { .. } => "F",
            ElementKind::Inductor { .. } => "H",
            ElementKind::VoltageSource { .. } => "V",
            ElementKind::CurrentSource { .. } => "A",
        }
    }
}

/// A named two-terminal element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    node_pos: NodeId,
    node_neg: NodeId,
    kind: ElementKind,
}

impl Element {
    /// Create a resistor.
    pub fn resistor(
        name: impl Into<String>,
        resistance: f64,
        node_pos: NodeId,
        node_neg: NodeId,
    ) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            kind: ElementKind::Resistor { resistance },
        }
    }

    /// Create a capacitor.
    pub fn capacitor(
        name: impl Into<String>,
        capacitance: f64,
        node_pos: NodeId,
        node_neg: NodeId,
    ) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            kind: ElementKind::Capacitor { capacitance },
        }
    }

    /// Create an inductor.
    pub fn inductor(
        name: impl Into<String>,
        inductance: f64,
        node_pos: NodeId,
        node_neg: NodeId,
    ) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            kind: ElementKind::Inductor { inductance },
        }
    }

    /// Create an independent voltage source.
    pub fn voltage_source(
        name: impl Into<String>,
        waveform: Waveform,
        node_pos: NodeId,
        node_neg: NodeId,
    ) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            kind: ElementKind::VoltageSource { waveform },
        }
    }

    /// Create an independent current source.
    pub fn current_source(
        name: impl Into<String>,
        waveform: Waveform,
        node_pos: NodeId,
        node_neg: NodeId,
    ) -> Self {
        Self {
            name: name.into(),
            node_pos,
            node_neg,
            kind: ElementKind::CurrentSource { waveform },
        }
    }

    /// Element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positive terminal node (current reference direction flows out of it).
    pub fn node_pos(&self) -> NodeId {
        self.node_pos
    }

    /// Negative terminal node.
    pub fn node_neg(&self) -> NodeId {
        self.node_neg
    }

    /// Element kind and parameters.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Whether this element touches the given node.
    pub fn touches(&self, node: NodeId) -> bool {
        self.node_pos == node || self.node_neg == node
    }

    /// Whether this is a voltage source.
    pub fn is_voltage_source(&self) -> bool {
        matches!(self.kind, ElementKind::VoltageSource { .. })
    }

    /// Whether this is a current source.
    pub fn is_current_source(&self) -> bool {
        matches!(self.kind, ElementKind::CurrentSource { .. })
    }

    /// Whether this is an inductor.
    pub fn is_inductor(&self) -> bool {
        matches!(self.kind, ElementKind::Inductor { .. })
    }

    /// The source waveform, if this is a source.
    pub fn waveform(&self) -> Option<&Waveform> {
        match &self.kind {
            ElementKind::VoltageSource { waveform } | ElementKind::CurrentSource { waveform } => {
                Some(waveform)
            }
            _ => None,
        }
    }

    /// Validate the element's parameters.
    ///
    /// Passive element values must be strictly positive.
    pub fn validate(&self) -> Result<()> {
        let bad = |what: &str, v: f64| {
            Err(Error::BadParameters(format!(
                "{} of '{}' must be positive, got {}",
                what, self.name, v
            )))
        };
        match self.kind {
            ElementKind::Resistor { resistance } if resistance <= 0.0 => {
                bad("resistance", resistance)
            }
            ElementKind::Capacitor { capacitance } if capacitance <= 0.0 => {
                bad("capacitance", capacitance)
            }
            ElementKind::Inductor { inductance } if inductance <= 0.0 => {
                bad("inductance", inductance)
            }
            _ => Ok(()),
        }
    }

    /// Move the element to a new pair of terminals.
    pub fn set_nodes(&mut self, node_pos: NodeId, node_neg: NodeId) {
        self.node_pos = node_pos;
        self.node_neg = node_neg;
    }

    /// Set the element's primary value.
    ///
    /// For passive elements this is R, C or L (validated positive); for
    /// sources it is the DC value or sine offset. On error the element is
    /// left untouched.
    pub fn set_value(&mut self, value: f64) -> Result<()> {
        let name = &self.name;
        let set_positive = |what: &str, slot: &mut f64| {
            if value <= 0.0 {
                return Err(Error::BadParameters(format!(
                    "{} of '{}' must be positive, got {}",
                    what, name, value
                )));
            }
            *slot = value;
            Ok(())
        };

        match &mut self.kind {
            ElementKind::Resistor { resistance } => set_positive("resistance", resistance),
            ElementKind::Capacitor { capacitance } => set_positive("capacitance", capacitance),
            ElementKind::Inductor { inductance } => set_positive("inductance", inductance),
            ElementKind::VoltageSource { waveform } | ElementKind::CurrentSource { waveform } => {
                match waveform {
                    Waveform::Dc { value: v } => *v = value,
                    Waveform::Sine { offset, .. } => *offset = value,
                }
                Ok(())
            }
        }
    }

    /// Set the amplitude of a sinusoidal source.
    pub fn set_amplitude(&mut self, amplitude: f64) -> Result<()> {
        match self.sine_mut() {
            Some((amp, _)) => {
                *amp = amplitude;
                Ok(())
            }
            None => Err(Error::BadParameters(format!(
                "'{}' is not a sinusoidal source",
                self.name
            ))),
        }
    }

    /// Set the frequency of a sinusoidal source.
    pub fn set_frequency(&mut self, frequency: f64) -> Result<()> {
        match self.sine_mut() {
            Some((_, freq)) => {
                *freq = frequency;
                Ok(())
            }
            None => Err(Error::BadParameters(format!(
                "'{}' is not a sinusoidal source",
                self.name
            ))),
        }
    }

    fn sine_mut(&mut self) -> Option<(&mut f64, &mut f64)> {
        match &mut self.kind {
            ElementKind::VoltageSource { waveform } | ElementKind::CurrentSource { waveform } => {
                match waveform {
                    Waveform::Sine {
                        amplitude,
                        frequency,
                        ..
                    } => Some((amplitude, frequency)),
                    Waveform::Dc { .. } => None,
                }
            }
            _ => None,
        }
    }
}
