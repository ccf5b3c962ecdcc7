use anyhow::Result;
use std::env;
use tracing_subscriber::EnvFilter;

use toy_bank::{Reporter, Scenario, StdoutSink};

fn main() -> Result<()> {
    // Report lines go to stdout; tracing stays quiet unless RUST_LOG asks
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let scenario = if args.len() > 1 {
        // Scenario file mode
        Scenario::from_file(&args[1])?
    } else {
        // Built-in demo (default)
        Scenario::demo()
    };

    tracing::info!(
        version = toy_bank::VERSION,
        accounts = scenario.accounts.len(),
        loans = scenario.loans.len(),
        steps = scenario.steps.len(),
        "running scenario"
    );

    let mut reporter = Reporter::new(StdoutSink);
    let outcome = scenario.run(&mut reporter)?;

    tracing::info!(
        accepted = outcome.accepted,
        rejected = outcome.rejected,
        "scenario finished"
    );

    Ok(())
}
