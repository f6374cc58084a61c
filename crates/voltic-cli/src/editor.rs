//! Interactive circuit editing flows: add, remove, modify, rename, display.

use std::io;

use voltic_core::units::format_value;
use voltic_core::{Circuit, Element, ElementKind, Waveform};

use crate::menu::{read_choice, read_f64, read_line, read_node, read_value};

/// Print every element of the circuit.
pub fn display_circuit(circuit: &Circuit) {
    if circuit.is_empty() {
        println!("Circuit is empty.");
        return;
    }

    println!("-------------------- Circuit Status --------------------");
    if circuit.has_ground() {
        println!("Ground status: connected.");
    } else {
        println!(">> WARNING: no ground node (0) in the circuit! <<");
    }
    println!("--------------------------------------------------------");
    for e in circuit.elements() {
        display_element(e);
    }
    println!("--------------------------------------------------------");
}

fn display_element(e: &Element) {
    let nodes = format!("({}, {})", e.node_pos().as_u32(), e.node_neg().as_u32());
    match e.kind() {
        ElementKind::Resistor { resistance } => println!(
            "  - {} | Resistor | {} {} | Nodes: {}",
            e.name(),
            format_value(*resistance),
            e.kind().unit(),
            nodes
        ),
        ElementKind::Capacitor { capacitance } => println!(
            "  - {} | Capacitor | {} {} | Nodes: {}",
            e.name(),
            format_value(*capacitance),
            e.kind().unit(),
            nodes
        ),
        ElementKind::Inductor { inductance } => println!(
            "  - {} | Inductor | {} {} | Nodes: {}",
            e.name(),
            format_value(*inductance),
            e.kind().unit(),
            nodes
        ),
        ElementKind::VoltageSource { waveform } | ElementKind::CurrentSource { waveform } => {
            let kind = e.kind().kind_name();
            let unit = e.kind().unit();
            match waveform {
                Waveform::Dc { value } => println!(
                    "  - {} | {} (DC) | {} {} | Nodes: {}",
                    e.name(),
                    kind,
                    format_value(*value),
                    unit,
                    nodes
                ),
                Waveform::Sine {
                    offset,
                    amplitude,
                    frequency,
                } => println!(
                    "  - {} | {} (SINE) | offset={} amp={} freq={}Hz | Nodes: {}",
                    e.name(),
                    kind,
                    format_value(*offset),
                    format_value(*amplitude),
                    format_value(*frequency),
                    nodes
                ),
            }
        }
    }
}

/// Print the sorted node set.
pub fn display_nodes(circuit: &Circuit) {
    let nodes = circuit.node_set();
    if nodes.is_empty() {
        println!("Circuit is empty, no nodes to display.");
        return;
    }
    let labels: Vec<String> = nodes.iter().map(|n| n.as_u32().to_string()).collect();
    println!("Existing nodes: {}", labels.join(" "));
}

/// Interactively add one element.
pub fn add_element(circuit: &mut Circuit) -> io::Result<()> {
    println!("Select element type:");
    println!("1. Resistor");
    println!("2. Capacitor");
    println!("3. Inductor");
    println!("4. Voltage source");
    println!("5. Current source");
    println!("0. Back");
    let choice = read_choice("Enter your choice: ")?;
    if choice == 0 {
        return Ok(());
    }
    if !(1..=5).contains(&choice) {
        println!("Invalid element type.");
        return Ok(());
    }

    let name = read_line("Enter name (e.g. R1): ")?;
    if name.is_empty() {
        println!("Error: name cannot be empty.");
        return Ok(());
    }
    let n1 = read_node("Enter node 1: ")?;
    let n2 = read_node("Enter node 2: ")?;

    let element = match choice {
        1 => Element::resistor(&name, read_value("Enter resistance (e.g. 1k): ")?, n1, n2),
        2 => Element::capacitor(&name, read_value("Enter capacitance (e.g. 10u): ")?, n1, n2),
        3 => Element::inductor(&name, read_value("Enter inductance (e.g. 1m): ")?, n1, n2),
        4 | 5 => {
            let waveform = match read_waveform()? {
                Some(w) => w,
                None => {
                    println!("Error: invalid waveform type. Element not added.");
                    return Ok(());
                }
            };
            if choice == 4 {
                Element::voltage_source(&name, waveform, n1, n2)
            } else {
                Element::current_source(&name, waveform, n1, n2)
            }
        }
        _ => unreachable!(),
    };

    match circuit.add_element(element) {
        Ok(()) => println!("Element '{}' added.", name),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn read_waveform() -> io::Result<Option<Waveform>> {
    let shape = read_line("Enter waveform type (DC or SINE): ")?.to_uppercase();
    match shape.as_str() {
        "DC" => {
            let value = read_value("Enter DC value (e.g. 9, 500m): ")?;
            Ok(Some(Waveform::dc(value)))
        }
        "SINE" => {
            let offset = read_f64("Enter DC offset: ")?;
            let amplitude = read_f64("Enter amplitude: ")?;
            let frequency = read_f64("Enter frequency (Hz): ")?;
            Ok(Some(Waveform::sine(offset, amplitude, frequency)))
        }
        _ => Ok(None),
    }
}

/// Interactively remove one element.
pub fn remove_element(circuit: &mut Circuit) -> io::Result<()> {
    display_circuit(circuit);
    let name = read_line("Enter the name of the element to remove (0 to go back): ")?;
    if name == "0" {
        return Ok(());
    }
    match circuit.remove_element(&name) {
        Ok(_) => println!("Element '{}' removed.", name),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

/// Interactively modify one element's value, waveform parameters, or nodes.
pub fn modify_element(circuit: &mut Circuit) -> io::Result<()> {
    display_circuit(circuit);
    let name = read_line("Enter the name of the element to modify (0 to go back): ")?;
    if name == "0" {
        return Ok(());
    }

    let Some(element) = circuit.find_element(&name) else {
        println!("Error: element '{}' not found.", name);
        return Ok(());
    };
    let is_sine = element
        .waveform()
        .map(|w| !w.is_dc())
        .unwrap_or(false);

    if is_sine {
        println!("1. Offset");
        println!("2. Amplitude");
        println!("3. Frequency");
        println!("4. Nodes");
    } else {
        println!("1. Value");
        println!("2. Nodes");
    }
    println!("0. Back");
    let choice = read_choice("Enter your choice: ")?;
    if choice == 0 {
        return Ok(());
    }

    // The lookup above guarantees presence; re-borrow mutably for edits.
    let Some(element) = circuit.find_element_mut(&name) else {
        return Ok(());
    };

    let result = match (is_sine, choice) {
        (false, 1) => {
            let value = read_value("Enter new value: ")?;
            element.set_value(value)
        }
        (false, 2) | (true, 4) => {
            let n1 = read_node("Enter new node 1: ")?;
            let n2 = read_node("Enter new node 2: ")?;
            element.set_nodes(n1, n2);
            Ok(())
        }
        (true, 1) => {
            let value = read_f64("Enter new offset: ")?;
            element.set_value(value)
        }
        (true, 2) => {
            let value = read_f64("Enter new amplitude: ")?;
            element.set_amplitude(value)
        }
        (true, 3) => {
            let value = read_f64("Enter new frequency: ")?;
            element.set_frequency(value)
        }
        _ => {
            println!("Invalid choice.");
            return Ok(());
        }
    };

    match result {
        Ok(()) => println!("Element '{}' updated.", name),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

/// Interactively rename a node throughout the circuit.
pub fn rename_node(circuit: &mut Circuit) -> io::Result<()> {
    display_nodes(circuit);
    let old = read_node("Enter the node to rename: ")?;
    let new = read_node("Enter the new node number: ")?;
    match circuit.rename_node(old, new) {
        Ok(()) => println!("Node {} renamed to {}.", old.as_u32(), new.as_u32()),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

/// Interactively save the circuit to a file.
pub fn save_circuit(circuit: &Circuit) -> io::Result<()> {
    let path = read_line("Enter file name to save to: ")?;
    if path.is_empty() {
        return Ok(());
    }
    let mut file = std::fs::File::create(&path)?;
    voltic_core::netlist::save(circuit, &mut file)?;
    println!("Saved to '{}'.", path);
    Ok(())
}

/// Interactively load a circuit from a file.
pub fn load_circuit() -> io::Result<Option<Circuit>> {
    let path = read_line("Enter file name to load from: ")?;
    if path.is_empty() {
        return Ok(None);
    }
    let file = match std::fs::File::open(&path) {
        Ok(f) => f,
        Err(e) => {
            println!("Error: cannot open '{}': {}", path, e);
            return Ok(None);
        }
    };
    let circuit = voltic_core::netlist::load(std::io::BufReader::new(file))?;
    println!(
        "Loaded '{}' with {} element(s).",
        circuit.name().unwrap_or(&path),
        circuit.len()
    );
    Ok(Some(circuit))
}

/// Helper shared by the analysis flows: warn when the circuit cannot be
/// simulated at all.
pub fn ensure_nonempty(circuit: &Circuit) -> bool {
    if circuit.is_empty() {
        println!("Circuit is empty; nothing to simulate.");
        return false;
    }
    true
}

/// Ground check used by display; analyses report it through the solver.
pub fn ground_hint(circuit: &Circuit) {
    if !circuit.has_ground() {
        println!("Hint: the circuit has no ground node (0); analyses will fail.");
    }
}
