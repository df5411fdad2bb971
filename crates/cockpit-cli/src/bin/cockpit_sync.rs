use anyhow::Context;
use clap::Parser;
use cockpit_cli::{output, JobArgs};

#[derive(Parser)]
#[command(
    name = "cockpit-sync",
    about = "Sync the cockpit CSV into matching tracker issues",
    version
)]
struct Cli {
    #[command(flatten)]
    job: JobArgs,
}

fn main() {
    let cli = Cli::parse();
    cockpit_cli::init_tracing(cli.job.default_log_level());

    if let Err(e) = run(&cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.job.resolve()?;
    let report = cockpit_core::sync::run(&config)
        .with_context(|| format!("syncing {} from {}", config.repo, config.csv_path.display()))?;
    if cli.job.json {
        output::print_json(&report)?;
    } else {
        println!(
            "synced {} rows: {} issues matched, {} bodies updated, {} assignees added, {} closed, {} reopened",
            report.rows,
            report.matched_issues,
            report.bodies_updated,
            report.assignees_added,
            report.closed,
            report.reopened
        );
        if config.dry_run {
            println!("dry run: nothing was changed");
        }
    }
    Ok(())
}
