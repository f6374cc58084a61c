//! Plain-text save format for circuits.
//!
//! The format is line-oriented UTF-8. An optional first line
//! `CIRCUIT_NAME <name>` carries the circuit name; every other line is one
//! element:
//!
//! ```text
//! Resistor      <name> <value> <n1> <n2>
//! Capacitor     <name> <value> <n1> <n2>
//! Inductor      <name> <value> <n1> <n2>
//! VoltageSource <name> DC   <dc>      0     0        <n1> <n2>
//! VoltageSource <name> SINE <offset> <amp> <freq_hz> <n1> <n2>
//! CurrentSource <name> DC   <dc>      0     0        <n1> <n2>
//! CurrentSource <name> SINE <offset> <amp> <freq_hz> <n1> <n2>
//! ```
//!
//! Numbers are decimal or scientific. Unknown or malformed lines are skipped
//! with a warning so that a hand-edited file degrades gracefully.

use std::io::{self, BufRead, Write};

use crate::circuit::Circuit;
use crate::element::{Element, ElementKind};
use crate::node::NodeId;
use crate::waveform::Waveform;

/// Write a circuit in the textual save format.
pub fn save<W: Write>(circuit: &Circuit, writer: &mut W) -> io::Result<()> {
    if let Some(name) = circuit.name() {
        writeln!(writer, "CIRCUIT_NAME {}", name)?;
    }
    for e in circuit.elements() {
        let n1 = e.node_pos().as_u32();
        let n2 = e.node_neg().as_u32();
        match e.kind() {
            ElementKind::Resistor { resistance } => {
                writeln!(writer, "Resistor {} {} {} {}", e.name(), resistance, n1, n2)?;
            }
            ElementKind::Capacitor { capacitance } => {
                writeln!(writer, "Capacitor {} {} {} {}", e.name(), capacitance, n1, n2)?;
            }
            ElementKind::Inductor { inductance } => {
                writeln!(writer, "Inductor {} {} {} {}", e.name(), inductance, n1, n2)?;
            }
            ElementKind::VoltageSource { waveform } => {
                write_source(writer, "VoltageSource", e.name(), waveform, n1, n2)?;
            }
            ElementKind::CurrentSource { waveform } => {
                write_source(writer, "CurrentSource", e.name(), waveform, n1, n2)?;
            }
        }
    }
    Ok(())
}

fn write_source<W: Write>(
    writer: &mut W,
    kind: &str,
    name: &str,
    waveform: &Waveform,
    n1: u32,
    n2: u32,
) -> io::Result<()> {
    match waveform {
        Waveform::Dc { value } => {
            writeln!(writer, "{} {} DC {} 0 0 {} {}", kind, name, value, n1, n2)
        }
        Waveform::Sine {
            offset,
            amplitude,
            frequency,
        } => writeln!(
            writer,
            "{} {} SINE {} {} {} {} {}",
            kind, name, offset, amplitude, frequency, n1, n2
        ),
    }
}

/// Read a circuit from the textual save format.
///
/// Lines that do not parse are skipped with a `log::warn!`; I/O failure is
/// the only hard error.
pub fn load<R: BufRead>(reader: R) -> io::Result<Circuit> {
    let mut circuit = Circuit::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if lineno == 0 {
            if let Some(name) = trimmed.strip_prefix("CIRCUIT_NAME ") {
                circuit.set_name(name.trim());
                continue;
            }
        }

        match parse_line(trimmed) {
            Some(element) => {
                if let Err(e) = circuit.add_element(element) {
                    log::warn!("line {}: skipping element: {}", lineno + 1, e);
                }
            }
            None => {
                log::warn!("line {}: skipping malformed line: {}", lineno + 1, trimmed);
            }
        }
    }

    Ok(circuit)
}

fn parse_line(line: &str) -> Option<Element> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&kind, rest) = tokens.split_first()?;

    match kind {
        "Resistor" | "Capacitor" | "Inductor" => {
            let [name, value, n1, n2] = rest else {
                return None;
            };
            let value: f64 = value.parse().ok()?;
            let n1 = NodeId::new(n1.parse().ok()?);
            let n2 = NodeId::new(n2.parse().ok()?);
            Some(match kind {
                "Resistor" => Element::resistor(*name, value, n1, n2),
                "Capacitor" => Element::capacitor(*name, value, n1, n2),
                _ => Element::inductor(*name, value, n1, n2),
            })
        }
        "VoltageSource" | "CurrentSource" => {
            let [name, shape, a, b, c, n1, n2] = rest else {
                return None;
            };
            let a: f64 = a.parse().ok()?;
            let b: f64 = b.parse().ok()?;
            let c: f64 = c.parse().ok()?;
            let n1 = NodeId::new(n1.parse().ok()?);
            let n2 = NodeId::new(n2.parse().ok()?);
            let waveform = match *shape {
                "DC" => Waveform::dc(a),
                "SINE" => Waveform::sine(a, b, c),
                _ => return None,
            };
            Some(if kind == "VoltageSource" {
                Element::voltage_source(*name, waveform, n1, n2)
            } else {
                Element::current_source(*name, waveform, n1, n2)
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn sample() -> Circuit {
        let mut c = Circuit::with_name("rc lowpass");
        c.add_element(Element::voltage_source(
            "V1",
            Waveform::sine(0.0, 1.0, 159.15),
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
        c.add_element(Element::capacitor(
            "C1",
            1e-6,
            NodeId::new(2),
            NodeId::GROUND,
        ))
        .unwrap();
        c.add_element(Element::current_source(
            "I1",
            Waveform::dc(0.002),
            NodeId::new(2),
            NodeId::GROUND,
        ))
        .unwrap();
        c
    }

    #[test]
    fn test_round_trip() {
        let circuit = sample();
        let mut buf = Vec::new();
        save(&circuit, &mut buf).unwrap();

        let loaded = load(BufReader::new(buf.as_slice())).unwrap();
        assert_eq!(loaded.name(), Some("rc lowpass"));
        assert_eq!(loaded.len(), circuit.len());
        for (a, b) in circuit.elements().zip(loaded.elements()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_save_format() {
        let mut c = Circuit::new();
        c.add_element(Element::voltage_source(
            "V1",
            Waveform::dc(9.0),
            NodeId::new(1),
            NodeId::GROUND,
        ))
        .unwrap();
        let mut buf = Vec::new();
        save(&c, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "VoltageSource V1 DC 9 0 0 1 0\n"
        );
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let text = "\
CIRCUIT_NAME test
Resistor R1 100 1 0
Gyrator G1 1.0 1 0
Resistor R2 nonsense 1 0
Capacitor
Inductor L1 1e-3 1 0
";
        let loaded = load(BufReader::new(text.as_bytes())).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.find_element("R1").is_some());
        assert!(loaded.find_element("L1").is_some());
        assert!(loaded.find_element("G1").is_none());
    }

    #[test]
    fn test_load_without_name_line() {
        let text = "Resistor R1 100 1 0\n";
        let loaded = load(BufReader::new(text.as_bytes())).unwrap();
        assert_eq!(loaded.name(), None);
        assert_eq!(loaded.len(), 1);
    }
}
