mod window;

use clap::{Parser, Subcommand};
use patterns_demo_core::{AppConfig, DemoError, DemoShell};
use tracing_subscriber::EnvFilter;

/// Longest stretch of virtual time `simulate` accepts in one argument (one hour).
const MAX_SIMULATED_MS: u64 = 60 * 60 * 1000;

fn main() -> patterns_demo_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::demo_defaults();

    match cli.command.unwrap_or(Commands::Window) {
        Commands::Window => run_window(config),
        Commands::Simulate {
            product,
            spacing_ms,
            millis,
        } => run_simulate(config, &product, spacing_ms, millis),
    }
}

fn run_window(config: AppConfig) -> patterns_demo_core::Result<()> {
    tracing::info!(title = %config.window.title, "opening window");
    window::run(DemoShell::new(config)).map_err(|err| DemoError::msg(err.to_string()))
}

fn run_simulate(
    config: AppConfig,
    products: &[String],
    spacing_ms: u64,
    millis: u64,
) -> patterns_demo_core::Result<()> {
    tracing::info!(?products, spacing_ms, millis, "running headless simulation");

    let mut shell = DemoShell::new(config);
    for (i, id) in products.iter().enumerate() {
        if i > 0 {
            shell.advance(spacing_ms);
        }
        shell.create_by_id(id)?;
    }
    shell.advance(millis);

    println!("{}", shell.snapshot_json()?);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Factory and observer patterns, animated", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the demo window (the default).
    Window,
    /// Drive the demo without a window and print the resulting scene as JSON.
    Simulate {
        /// Product identifiers to create, in order (A, B or C).
        #[arg(short, long)]
        product: Vec<String>,
        /// Milliseconds to let pass between consecutive products.
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u64).range(..=MAX_SIMULATED_MS))]
        spacing_ms: u64,
        /// Milliseconds to run after the last product was created.
        #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u64).range(..=MAX_SIMULATED_MS))]
        millis: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_accepts_an_hour() {
        let cli = Cli::try_parse_from(["app", "simulate", "-p", "A", "--millis", "3600000"]).unwrap();
        match cli.command {
            Some(Commands::Simulate { product, millis, .. }) => {
                assert_eq!(product, vec!["A"]);
                assert_eq!(millis, MAX_SIMULATED_MS);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn simulate_rejects_unbounded_durations() {
        let huge = u64::MAX.to_string();
        assert!(Cli::try_parse_from(["app", "simulate", "--millis", huge.as_str()]).is_err());
        assert!(Cli::try_parse_from(["app", "simulate", "--spacing-ms", "3600001"]).is_err());
    }

    #[test]
    fn window_is_the_default_command() {
        let cli = Cli::try_parse_from(["app"]).unwrap();
        assert!(cli.command.is_none());
    }
}
