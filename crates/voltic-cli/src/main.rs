//! Voltic interactive command-line interface.

mod analysis;
mod editor;
mod menu;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use voltic_core::Circuit;

use menu::{read_choice, read_line};

#[derive(Parser)]
#[command(name = "voltic")]
#[command(about = "An interactive lumped-element circuit simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Circuit file to load at startup
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// The editor session: several named circuits and the active selection.
struct App {
    circuits: Vec<Circuit>,
    active: usize,
}

impl App {
    fn new() -> Self {
        Self {
            circuits: vec![Circuit::with_name("untitled")],
            active: 0,
        }
    }

    fn circuit(&self) -> &Circuit {
        &self.circuits[self.active]
    }

    fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuits[self.active]
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut app = App::new();

    if let Some(ref input) = cli.input {
        let file = File::open(input)
            .with_context(|| format!("failed to open circuit file: {}", input.display()))?;
        let circuit = voltic_core::netlist::load(BufReader::new(file))
            .with_context(|| format!("failed to read circuit file: {}", input.display()))?;
        if cli.verbose {
            println!(
                "Loaded '{}' with {} element(s).",
                circuit.name().unwrap_or("untitled"),
                circuit.len()
            );
        }
        app.circuits[0] = circuit;
    }

    loop {
        print_menu(&app);
        let choice = read_choice("Enter your choice: ")?;
        match choice {
            1 => editor::add_element(app.circuit_mut())?,
            2 => {
                editor::display_circuit(app.circuit());
                editor::ground_hint(app.circuit());
            }
            3 => editor::remove_element(app.circuit_mut())?,
            4 => editor::modify_element(app.circuit_mut())?,
            5 => analysis::transient(app.circuit())?,
            6 => analysis::multi_variable_transient(app.circuit())?,
            7 => analysis::dc_voltage_sweep(app.circuit_mut())?,
            8 => analysis::dc_current_sweep(app.circuit_mut())?,
            9 => editor::display_nodes(app.circuit()),
            10 => editor::rename_node(app.circuit_mut())?,
            11 => new_circuit(&mut app)?,
            12 => select_circuit(&mut app)?,
            13 => editor::save_circuit(app.circuit())?,
            14 => {
                if let Some(circuit) = editor::load_circuit()? {
                    app.circuits.push(circuit);
                    app.active = app.circuits.len() - 1;
                }
            }
            0 => {
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }

    Ok(())
}

fn print_menu(app: &App) {
    println!();
    println!("============ Voltic ============");
    println!(
        "Active circuit: {} ({} of {})",
        app.circuit().name().unwrap_or("untitled"),
        app.active + 1,
        app.circuits.len()
    );
    println!(" 1. Add element");
    println!(" 2. Display circuit");
    println!(" 3. Remove element");
    println!(" 4. Modify element");
    println!(" 5. Transient analysis");
    println!(" 6. Multi-variable transient analysis");
    println!(" 7. DC voltage sweep");
    println!(" 8. DC current sweep");
    println!(" 9. Display nodes");
    println!("10. Rename node");
    println!("11. New circuit");
    println!("12. Select circuit");
    println!("13. Save circuit");
    println!("14. Load circuit");
    println!(" 0. Exit");
    println!("================================");
}

fn new_circuit(app: &mut App) -> Result<()> {
    let name = read_line("Enter a name for the new circuit: ")?;
    let circuit = if name.is_empty() {
        Circuit::new()
    } else {
        Circuit::with_name(name)
    };
    app.circuits.push(circuit);
    app.active = app.circuits.len() - 1;
    println!("Created and selected circuit {}.", app.circuits.len());
    Ok(())
}

fn select_circuit(app: &mut App) -> Result<()> {
    for (i, c) in app.circuits.iter().enumerate() {
        let marker = if i == app.active { "*" } else { " " };
        println!(
            "{} {}. {} ({} element(s))",
            marker,
            i + 1,
            c.name().unwrap_or("untitled"),
            c.len()
        );
    }
    let choice = read_choice("Select a circuit: ")?;
    if choice >= 1 && (choice as usize) <= app.circuits.len() {
        app.active = choice as usize - 1;
        println!("Circuit {} selected.", choice);
    } else {
        println!("Invalid selection.");
    }
    Ok(())
}
