//! Line-oriented prompt helpers for the interactive menu.

use std::io::{self, Write};

use voltic_core::units::parse_value_or_zero;
use voltic_core::NodeId;

/// Print a prompt and read one trimmed line from stdin.
pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Read an integer menu choice; invalid input reprompts.
pub fn read_choice(prompt: &str) -> io::Result<i64> {
    loop {
        let line = read_line(prompt)?;
        match line.parse() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Invalid input. Please enter a number."),
        }
    }
}

/// Read a plain floating-point value; invalid input reprompts.
pub fn read_f64(prompt: &str) -> io::Result<f64> {
    loop {
        let line = read_line(prompt)?;
        match line.parse() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Invalid input. Please enter a numeric value."),
        }
    }
}

/// Read a node label; invalid input reprompts.
pub fn read_node(prompt: &str) -> io::Result<NodeId> {
    loop {
        let line = read_line(prompt)?;
        match line.parse() {
            Ok(v) => return Ok(NodeId::new(v)),
            Err(_) => println!("Invalid input. Please enter a node number."),
        }
    }
}

/// Read an engineering-suffixed value (e.g. `1k`, `10u`).
///
/// Malformed input parses to 0, matching the editor's value contract.
pub fn read_value(prompt: &str) -> io::Result<f64> {
    let line = read_line(prompt)?;
    Ok(parse_value_or_zero(&line))
}
