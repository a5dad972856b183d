mod error;
mod report;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use pd_project::NetworkSpec;
use pd_registry::builtin;
use pd_solver::{Solution, SolverConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pd-cli")]
#[command(
    about = "pdrop CLI - single-pass pressure-drop solver for 1D flow networks",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate network file schema and component order
    Validate {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
    },
    /// Solve a network and write the component summary
    Solve {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the full solution as JSON instead of the CSV summary
        #[arg(long)]
        json: bool,
        /// Include the hydrostatic term for pipes flowing up or down
        #[arg(long)]
        gravity: bool,
        /// Include the kinetic energy change across pipes
        #[arg(long)]
        acceleration: bool,
        /// Gravitational acceleration in m/s²
        #[arg(long)]
        gravity_constant: Option<f64>,
    },
    /// List the built-in geometry and loss functions
    Functions,
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { network_path } => cmd_validate(&network_path),
        Commands::Solve {
            network_path,
            output,
            json,
            gravity,
            acceleration,
            gravity_constant,
        } => {
            let mut config = SolverConfig {
                include_gravity: gravity,
                include_acceleration: acceleration,
                ..SolverConfig::default()
            };
            if let Some(g) = gravity_constant {
                config.gravity = g;
            }
            cmd_solve(&network_path, output.as_deref(), json, &config)
        }
        Commands::Functions => {
            cmd_functions();
            Ok(())
        }
    }
}

fn load(path: &Path) -> CliResult<NetworkSpec> {
    let network = pd_project::load(path).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        components = network.components.len(),
        "loaded network"
    );
    Ok(network)
}

fn cmd_validate(network_path: &Path) -> CliResult<()> {
    println!("Validating network: {}", network_path.display());
    let network = load(network_path)?;
    pd_solver::check_topology(&network)?;
    println!(
        "✓ Network '{}' is valid ({} components)",
        network.name,
        network.components.len()
    );
    Ok(())
}

fn cmd_solve(
    network_path: &Path,
    output: Option<&Path>,
    json: bool,
    config: &SolverConfig,
) -> CliResult<()> {
    let network = load(network_path)?;
    let geom = builtin::geometry_registry();
    let loss = builtin::loss_registry();

    let solution = match pd_solver::solve_with_config(&network, &geom, &loss, config) {
        Ok(solution) => solution,
        Err(failure) => {
            eprintln!(
                "✗ Solve stopped after {} component(s)",
                failure.partial_results.len()
            );
            for r in &failure.partial_results {
                eprintln!(
                    "  #{} {}: {:.1} Pa -> {:.1} Pa",
                    r.index, r.name, r.inlet_pressure, r.pressure
                );
            }
            return Err(failure.into());
        }
    };

    let content = if json {
        serde_json::to_string_pretty(&solution)? + "\n"
    } else {
        report::summary_csv(&network, &solution)
    };

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, content).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        print_summary(&solution);
        println!("✓ Wrote {}", path.display());
    } else {
        print!("{}", content);
    }

    for warning in &solution.warnings {
        eprintln!("warning: {warning}");
    }

    Ok(())
}

fn print_summary(solution: &Solution) {
    println!("Network: {}", solution.network);
    println!("  Components solved: {}", solution.component_results.len());
    println!(
        "  Inlet pressure:  {:.3} kPa",
        solution.inlet.pressure.value / 1000.0
    );
    println!(
        "  Outlet pressure: {:.3} kPa",
        solution.final_state.pressure.value / 1000.0
    );
    println!(
        "  Total drop:      {:.3} kPa",
        solution.total_pressure_drop() / 1000.0
    );
}

fn cmd_functions() {
    let geom = builtin::geometry_registry();
    let loss = builtin::loss_registry();

    println!("Geometry functions:");
    for name in geom.names() {
        let params = geom.get(name).map(|f| f.parameters().join(", ")).unwrap_or_default();
        println!("  {}({})", name, params);
    }

    println!("\nLoss functions:");
    for name in loss.names() {
        let params = loss.get(name).map(|f| f.parameters().join(", ")).unwrap_or_default();
        println!("  {}({})", name, params);
    }
}
