//! Circuit container and editor operations.
//!
//! A [`Circuit`] is an insertion-ordered collection of uniquely-named
//! elements. Insertion order matters: it fixes the ordering of voltage-source
//! and inductor rows in the MNA system and therefore the ordering of current
//! results. The node set is derived from the elements.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::element::Element;
use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::waveform::Waveform;

/// A circuit: named, with an ordered list of uniquely-named elements.
#[derive(Debug, Default, Clone)]
pub struct Circuit {
    /// Circuit name, if any.
    name: Option<String>,
    /// Elements keyed by name, in insertion order.
    elements: IndexMap<String, Element>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit with a name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Get the circuit name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the circuit name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Add an element to the circuit.
    ///
    /// Fails with [`Error::NameExists`] on a duplicate name and
    /// [`Error::BadParameters`] on a non-positive R, C or L value.
    pub fn add_element(&mut self, element: Element) -> Result<()> {
        element.validate()?;
        if self.elements.contains_key(element.name()) {
            return Err(Error::NameExists(element.name().to_string()));
        }
        self.elements.insert(element.name().to_string(), element);
        Ok(())
    }

    /// Remove an element by name, preserving the order of the rest.
    pub fn remove_element(&mut self, name: &str) -> Result<Element> {
        self.elements
            .shift_remove(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Look up an element by name.
    pub fn find_element(&self, name: &str) -> Option<&Element> {
        self.elements.get(name)
    }

    /// Look up an element by name, mutably.
    pub fn find_element_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements.get_mut(name)
    }

    /// Iterate over elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the circuit has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The sorted set of node ids referenced by any element.
    pub fn node_set(&self) -> BTreeSet<NodeId> {
        let mut nodes = BTreeSet::new();
        for e in self.elements.values() {
            nodes.insert(e.node_pos());
            nodes.insert(e.node_neg());
        }
        nodes
    }

    /// Whether any element touches the datum node (0).
    pub fn has_ground(&self) -> bool {
        self.elements.values().any(|e| e.touches(NodeId::GROUND))
    }

    /// Relabel a node throughout the circuit.
    ///
    /// `old` must exist and `new` must not: merging two existing nodes
    /// would change the equation count, so it is refused with
    /// [`Error::NodeConflict`].
    pub fn rename_node(&mut self, old: NodeId, new: NodeId) -> Result<()> {
        let nodes = self.node_set();
        if !nodes.contains(&old) {
            return Err(Error::NodeMissing(old));
        }
        if old != new && nodes.contains(&new) {
            return Err(Error::NodeConflict(new));
        }
        for e in self.elements.values_mut() {
            let n1 = if e.node_pos() == old { new } else { e.node_pos() };
            let n2 = if e.node_neg() == old { new } else { e.node_neg() };
            e.set_nodes(n1, n2);
        }
        Ok(())
    }

    /// Set the DC value of a named DC source.
    ///
    /// Used by the sweep drivers to step a source through a range. Fails
    /// with [`Error::NotFound`] for an unknown name and
    /// [`Error::BadParameters`] if the element is not a DC source.
    pub fn set_source_value(&mut self, name: &str, value: f64) -> Result<()> {
        let element = self
            .elements
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        let is_dc_source = element
            .waveform()
            .map(Waveform::is_dc)
            .unwrap_or(false);
        if !is_dc_source {
            return Err(Error::BadParameters(format!(
                "'{}' is not a DC source",
                name
            )));
        }
        element.set_value(value)
    }

    /// Read the DC value of a named DC source.
    pub fn source_value(&self, name: &str) -> Option<f64> {
        self.elements
            .get(name)
            .and_then(Element::waveform)
            .filter(|w| w.is_dc())
            .map(Waveform::dc_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn divider() -> Circuit {
        let mut c = Circuit::new();
        c.add_element(Element::voltage_source(
            "V1",
            Waveform::dc(10.0),
            NodeId::new(1),
            NodeId::GROUND,
        ))
        .unwrap();
        c.add_element(Element::resistor(
            "R1",
            1000.0,
            NodeId::new(1),
            NodeId::new(2),
        ))
        .unwrap();
        c.add_element(Element::resistor(
            "R2",
            1000.0,
            NodeId::new(2),
            NodeId::GROUND,
        ))
        .unwrap();
        c
    }

    #[test]
    fn test_add_duplicate_name() {
        let mut c = divider();
        let dup = Element::resistor("R1", 50.0, NodeId::new(3), NodeId::GROUND);
        assert!(matches!(c.add_element(dup), Err(Error::NameExists(_))));
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_add_rejects_bad_value() {
        let mut c = Circuit::new();
        let r = Element::resistor("R1", -1.0, NodeId::new(1), NodeId::GROUND);
        assert!(matches!(c.add_element(r), Err(Error::BadParameters(_))));
        assert!(c.is_empty());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut c = divider();
        c.remove_element("R1").unwrap();
        let names: Vec<_> = c.elements().map(|e| e.name().to_string()).collect();
        assert_eq!(names, vec!["V1", "R2"]);
        assert!(matches!(
            c.remove_element("R1"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_node_set_and_ground() {
        let c = divider();
        let nodes: Vec<u32> = c.node_set().iter().map(|n| n.as_u32()).collect();
        assert_eq!(nodes, vec![0, 1, 2]);
        assert!(c.has_ground());

        let mut floating = Circuit::new();
        floating
            .add_element(Element::resistor(
                "R1",
                100.0,
                NodeId::new(1),
                NodeId::new(2),
            ))
            .unwrap();
        assert!(!floating.has_ground());
    }

    #[test]
    fn test_rename_node() {
        let mut c = divider();
        c.rename_node(NodeId::new(2), NodeId::new(7)).unwrap();
        let r2 = c.find_element("R2").unwrap();
        assert_eq!(r2.node_pos(), NodeId::new(7));

        // old must exist
        assert!(matches!(
            c.rename_node(NodeId::new(9), NodeId::new(3)),
            Err(Error::NodeMissing(_))
        ));
        // new must not exist (no merging)
        assert!(matches!(
            c.rename_node(NodeId::new(7), NodeId::new(1)),
            Err(Error::NodeConflict(_))
        ));
    }

    #[test]
    fn test_set_source_value() {
        let mut c = divider();
        c.set_source_value("V1", 3.0).unwrap();
        assert_eq!(c.source_value("V1"), Some(3.0));

        assert!(matches!(
            c.set_source_value("R1", 3.0),
            Err(Error::BadParameters(_))
        ));
        assert!(matches!(
            c.set_source_value("V9", 3.0),
            Err(Error::NotFound(_))
        ));
        // failed setters leave no side effect
        assert_eq!(c.source_value("V1"), Some(3.0));
    }
}
