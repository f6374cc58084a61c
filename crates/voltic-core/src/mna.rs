//! Modified Nodal Analysis (MNA) matrix structures.

use nalgebra::{DMatrix, DVector};

/// MNA system: Ax = z
/// Where A is the conductance/coefficient matrix,
/// x is the solution vector (node voltages + branch currents),
/// and z is the RHS vector (current injections + source values).
///
/// Row layout: node equations first, then one branch row per voltage source,
/// then one branch row per inductor. Node arguments to the stamp methods are
/// matrix row indices; `None` means the datum node and that contribution is
/// omitted.
#[derive(Debug, Clone)]
pub struct MnaSystem {
    /// The coefficient matrix (G matrix extended with branch blocks).
    pub matrix: DMatrix<f64>,
    /// The right-hand side vector.
    pub rhs: DVector<f64>,
    /// Number of nodes (excluding the datum).
    pub num_nodes: usize,
    /// Number of voltage-source branch rows.
    pub num_vsources: usize,
    /// Number of inductor branch rows.
    pub num_inductors: usize,
}

impl MnaSystem {
    /// Create a new zeroed MNA system with the given dimensions.
    pub fn new(num_nodes: usize, num_vsources: usize, num_inductors: usize) -> Self {
        let size = num_nodes + num_vsources + num_inductors;
        Self {
            matrix: DMatrix::zeros(size, size),
            rhs: DVector::zeros(size),
            num_nodes,
            num_vsources,
            num_inductors,
        }
    }

    /// Total size of the system (nodes + branch currents).
    pub fn size(&self) -> usize {
        self.num_nodes + self.num_vsources + self.num_inductors
    }

    /// Re-zero the matrix and RHS for the next assembly.
    pub fn clear(&mut self) {
        self.matrix.fill(0.0);
        self.rhs.fill(0.0);
    }

    /// Stamp a conductance between two nodes.
    ///
    /// For a conductance G between nodes i and j:
    /// - A[i,i] += G
    /// - A[j,j] += G
    /// - A[i,j] -= G
    /// - A[j,i] -= G
    pub fn stamp_conductance(&mut self, node_i: Option<usize>, node_j: Option<usize>, g: f64) {
        if let Some(i) = node_i {
            self.matrix[(i, i)] += g;
        }
        if let Some(j) = node_j {
            self.matrix[(j, j)] += g;
        }
        if let (Some(i), Some(j)) = (node_i, node_j) {
            self.matrix[(i, j)] -= g;
            self.matrix[(j, i)] -= g;
        }
    }

    /// Stamp a current source driving `current` from node i to node j.
    pub fn stamp_current_source(
        &mut self,
        node_i: Option<usize>,
        node_j: Option<usize>,
        current: f64,
    ) {
        if let Some(i) = node_i {
            self.rhs[i] -= current;
        }
        if let Some(j) = node_j {
            self.rhs[j] += current;
        }
    }

    /// Stamp a voltage source between two nodes.
    ///
    /// The source's branch current is unknown `num_nodes + vsource_idx`;
    /// the incidence column injects it into the node equations and the
    /// branch row pins `v(pos) - v(neg)` to the source value.
    pub fn stamp_voltage_source(
        &mut self,
        node_pos: Option<usize>,
        node_neg: Option<usize>,
        vsource_idx: usize,
        voltage: f64,
    ) {
        let row = self.num_nodes + vsource_idx;

        if let Some(i) = node_pos {
            self.matrix[(i, row)] += 1.0;
            self.matrix[(row, i)] += 1.0;
        }
        if let Some(j) = node_neg {
            self.matrix[(j, row)] -= 1.0;
            self.matrix[(row, j)] -= 1.0;
        }

        self.rhs[row] += voltage;
    }

    /// Stamp an inductor's backward-Euler companion branch.
    ///
    /// The branch current is unknown `num_nodes + num_vsources + branch_idx`.
    /// The branch equation is `v(pos) - v(neg) - r_eq * i = -r_eq * i_prev`
    /// with `r_eq = L/h` (zero at DC, where the branch collapses to a short).
    pub fn stamp_inductor_branch(
        &mut self,
        node_pos: Option<usize>,
        node_neg: Option<usize>,
        branch_idx: usize,
        r_eq: f64,
        i_prev: f64,
    ) {
        let row = self.num_nodes + self.num_vsources + branch_idx;

        if let Some(i) = node_pos {
            self.matrix[(i, row)] += 1.0;
            self.matrix[(row, i)] += 1.0;
        }
        if let Some(j) = node_neg {
            self.matrix[(j, row)] -= 1.0;
            self.matrix[(row, j)] -= 1.0;
        }

        self.matrix[(row, row)] -= r_eq;
        self.rhs[row] -= r_eq * i_prev;
    }

    /// Get a reference to the coefficient matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Get a reference to the RHS vector.
    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    /// Get a mutable reference to the RHS vector.
    pub fn rhs_mut(&mut self) -> &mut DVector<f64> {
        &mut self.rhs
    }
}
