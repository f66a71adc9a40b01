use anyhow::{Context, Result};
use clap::Parser;
use deluge_cleanup::cleanup::runner::CleanupRunner;
use deluge_cleanup::cleanup::summary::separator;
use deluge_cleanup::cli::{Cli, OutputFormat};
use deluge_cleanup::console::client::DelugeConsole;
use deluge_cleanup::core::config::Config;
use deluge_cleanup::core::tracing_init::init_tracing;
use deluge_cleanup::policy::classifier::RetentionPolicy;
use tracing::{info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = cli.effective_verbosity();

    init_tracing(verbosity, cli.log_format);

    let loaded = Config::load(&cli.config)
        .context(format!("Failed to load configuration from '{}'", cli.config.display()))?;

    let config = loaded.clone().unwrap_or_default().merge(cli.overrides());

    // Nothing is sent to the console until the connection settings are complete
    let settings = config.validate()?;

    if config.persist_if_changed(loaded.as_ref(), &cli.config)? {
        info!(path = %cli.config.display(), "Configuration saved");
    }

    if cli.test {
        warn!("Running in test mode. No changes will be made.");
    }

    info!(
        host = %settings.host,
        port = settings.port,
        container = ?settings.container,
        ratio_limit = config.ratio_limit,
        allowed_trackers = ?config.allowed_trackers,
        "Starting cleanup pass"
    );

    let policy = RetentionPolicy::new(config.ratio_limit, config.allowed_trackers.iter().cloned());
    let runner = CleanupRunner::new(DelugeConsole::new(settings), policy, cli.test);

    let report = runner.run().context("Cleanup pass failed")?;

    match cli.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if verbosity >= 2 {
                println!("{}", separator());
            }
            if verbosity >= 1 {
                print!("{}", report.summary.render(cli.test));
            }
        }
    }

    Ok(())
}
