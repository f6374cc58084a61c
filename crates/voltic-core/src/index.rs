//! Mapping from user node labels to MNA matrix rows.

use std::collections::BTreeMap;

use crate::circuit::Circuit;
use crate::node::NodeId;

/// Assignment of matrix rows to a circuit's unknowns.
///
/// Non-datum nodes occupy rows `0..n` in sorted label order. Voltage-source
/// branch currents occupy rows `n..n+m` and inductor branch currents rows
/// `n+m..n+m+l`, both in element insertion order. The datum node contributes
/// no row.
#[derive(Debug, Clone)]
pub struct NodeIndex {
    rows: BTreeMap<NodeId, usize>,
    active: Vec<NodeId>,
    num_vsources: usize,
    num_inductors: usize,
}

impl NodeIndex {
    /// Build the index for a circuit.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut rows = BTreeMap::new();
        let mut active = Vec::new();
        for node in circuit.node_set() {
            if !node.is_ground() {
                rows.insert(node, active.len());
                active.push(node);
            }
        }

        let num_vsources = circuit.elements().filter(|e| e.is_voltage_source()).count();
        let num_inductors = circuit.elements().filter(|e| e.is_inductor()).count();

        Self {
            rows,
            active,
            num_vsources,
            num_inductors,
        }
    }

    /// Matrix row for a node; `None` for the datum or an unknown label.
    pub fn row(&self, node: NodeId) -> Option<usize> {
        self.rows.get(&node).copied()
    }

    /// The sorted non-datum node ids, in row order.
    pub fn active_nodes(&self) -> &[NodeId] {
        &self.active
    }

    /// Number of non-datum nodes.
    pub fn num_nodes(&self) -> usize {
        self.active.len()
    }

    /// Number of voltage sources.
    pub fn num_vsources(&self) -> usize {
        self.num_vsources
    }

    /// Number of inductors.
    pub fn num_inductors(&self) -> usize {
        self.num_inductors
    }

    /// Row of the j-th voltage source's branch current.
    pub fn vsource_row(&self, j: usize) -> usize {
        self.active.len() + j
    }

    /// Row of the k-th inductor's branch current.
    pub fn inductor_row(&self, k: usize) -> usize {
        self.active.len() + self.num_vsources + k
    }

    /// Total system size: nodes + voltage sources + inductors.
    pub fn size(&self) -> usize {
        self.active.len() + self.num_vsources + self.num_inductors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::waveform::Waveform;

    #[test]
    fn test_rows_sorted_and_datum_skipped() {
        let mut c = Circuit::new();
        // Deliberately non-contiguous labels, inserted out of order.
        c.add_element(Element::resistor(
            "R1",
            100.0,
            NodeId::new(7),
            NodeId::new(2),
        ))
        .unwrap();
        c.add_element(Element::resistor(
            "R2",
            100.0,
            NodeId::new(2),
            NodeId::GROUND,
        ))
        .unwrap();

        let index = NodeIndex::from_circuit(&c);
        assert_eq!(index.num_nodes(), 2);
        assert_eq!(index.row(NodeId::new(2)), Some(0));
        assert_eq!(index.row(NodeId::new(7)), Some(1));
        assert_eq!(index.row(NodeId::GROUND), None);
        assert_eq!(index.row(NodeId::new(99)), None);
    }

    #[test]
    fn test_branch_rows_follow_nodes() {
        let mut c = Circuit::new();
        c.add_element(Element::voltage_source(
            "V1",
            Waveform::dc(5.0),
            NodeId::new(1),
            NodeId::GROUND,
        ))
        .unwrap();
        c.add_element(Element::inductor(
            "L1",
            1e-3,
            NodeId::new(1),
            NodeId::new(2),
        ))
        .unwrap();
        c.add_element(Element::resistor(
            "R1",
            10.0,
            NodeId::new(2),
            NodeId::GROUND,
        ))
        .unwrap();

        let index = NodeIndex::from_circuit(&c);
        assert_eq!(index.num_nodes(), 2);
        assert_eq!(index.num_vsources(), 1);
        assert_eq!(index.num_inductors(), 1);
        assert_eq!(index.vsource_row(0), 2);
        assert_eq!(index.inductor_row(0), 3);
        assert_eq!(index.size(), 4);
    }

    #[test]
    fn test_empty_circuit() {
        let index = NodeIndex::from_circuit(&Circuit::new());
        assert_eq!(index.num_nodes(), 0);
        assert_eq!(index.size(), 0);
    }
}
