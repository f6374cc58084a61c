//! Interactive analysis flows: transient, multi-variable transient, and DC
//! sweeps, printing each snapshot as the solver pushes it out.

use std::io;

use voltic_core::{Circuit, NodeId};
use voltic_solver::{
    run_dc_sweep_i, run_dc_sweep_v, run_transient, CancelToken, DcSweepParams, Snapshot,
    SnapshotStatus, TransientParams,
};

use crate::editor::ensure_nonempty;
use crate::menu::{read_f64, read_line, read_node};

/// Print one snapshot: its parameter, node voltages, and element currents.
fn print_snapshot(snapshot: &Snapshot, monitor: Option<NodeId>) {
    match snapshot.param {
        voltic_solver::SweepParam::Time(t) => println!("Time: {:.4e} s", t),
        voltic_solver::SweepParam::VSweep(v) => println!("Voltage sweep: {:.4e} V", v),
        voltic_solver::SweepParam::ISweep(i) => println!("Current sweep: {:.4e} A", i),
    }

    match snapshot.status {
        SnapshotStatus::Ok => {}
        SnapshotStatus::Singular => {
            println!("  Analysis failed at this point: singular circuit matrix.");
            return;
        }
        SnapshotStatus::GroundMissing => {
            println!("  Analysis failed: no ground node.");
            return;
        }
        SnapshotStatus::Cancelled => {
            println!("  Analysis cancelled.");
            return;
        }
    }

    match monitor {
        Some(node) => {
            println!("  Node {} voltage: {:.4e} V", node, snapshot.voltage(node));
        }
        None => {
            for (node, voltage) in &snapshot.nodes {
                println!("  Node {} voltage: {:.4e} V", node, voltage);
            }
        }
    }
    for (name, current) in &snapshot.currents {
        println!("  {} current: {:.4e} A", name, current);
    }
    println!("-----------------");
}

/// Transient analysis, printing the voltage at one monitored node.
pub fn transient(circuit: &Circuit) -> io::Result<()> {
    if !ensure_nonempty(circuit) {
        return Ok(());
    }

    let t0 = read_f64("Enter start time (s): ")?;
    let t1 = read_f64("Enter end time (s): ")?;
    let h = read_f64("Enter time step (s): ")?;
    let node = read_node("Enter the node to monitor (0 for ground): ")?;

    if !node.is_ground() && !circuit.node_set().contains(&node) {
        println!("Error: node '{}' not found in the circuit.", node.as_u32());
        return Ok(());
    }

    let params = TransientParams::new(t0, t1, h);
    let mut sink = |s: Snapshot| print_snapshot(&s, Some(node));
    if let Err(e) = run_transient(circuit, &params, &mut sink, &CancelToken::new()) {
        println!("Error: {}", e);
    }
    Ok(())
}

/// Transient analysis printing every node voltage and element current.
pub fn multi_variable_transient(circuit: &Circuit) -> io::Result<()> {
    if !ensure_nonempty(circuit) {
        return Ok(());
    }

    let t0 = read_f64("Enter start time (s): ")?;
    let t1 = read_f64("Enter end time (s): ")?;
    let h = read_f64("Enter time step (s): ")?;

    let params = TransientParams::new(t0, t1, h);
    let mut sink = |s: Snapshot| print_snapshot(&s, None);
    if let Err(e) = run_transient(circuit, &params, &mut sink, &CancelToken::new()) {
        println!("Error: {}", e);
    }
    Ok(())
}

/// DC sweep over a named DC voltage source.
pub fn dc_voltage_sweep(circuit: &mut Circuit) -> io::Result<()> {
    if !ensure_nonempty(circuit) {
        return Ok(());
    }

    let source = read_line("Enter the DC voltage source to sweep: ")?;
    let start = read_f64("Enter start voltage (V): ")?;
    let stop = read_f64("Enter end voltage (V): ")?;
    let step = read_f64("Enter voltage step (V): ")?;

    let params = DcSweepParams::new(source, start, stop, step);
    let mut sink = |s: Snapshot| print_snapshot(&s, None);
    if let Err(e) = run_dc_sweep_v(circuit, &params, &mut sink, &CancelToken::new()) {
        println!("Error: {}", e);
    }
    Ok(())
}

/// DC sweep over a named DC current source.
pub fn dc_current_sweep(circuit: &mut Circuit) -> io::Result<()> {
    if !ensure_nonempty(circuit) {
        return Ok(());
    }

    let source = read_line("Enter the DC current source to sweep: ")?;
    let start = read_f64("Enter start current (A): ")?;
    let stop = read_f64("Enter end current (A): ")?;
    let step = read_f64("Enter current step (A): ")?;

    let params = DcSweepParams::new(source, start, stop, step);
    let mut sink = |s: Snapshot| print_snapshot(&s, None);
    if let Err(e) = run_dc_sweep_i(circuit, &params, &mut sink, &CancelToken::new()) {
        println!("Error: {}", e);
    }
    Ok(())
}
