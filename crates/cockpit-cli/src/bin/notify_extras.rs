use anyhow::Context;
use clap::Parser;
use cockpit_cli::{output, JobArgs};

#[derive(Parser)]
#[command(
    name = "notify-extras",
    about = "Post blocker, asset-verification, and QA status comments from the cockpit CSV",
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
    let report = cockpit_core::notify::run(&config)
        .with_context(|| format!("notifying {} from {}", config.repo, config.csv_path.display()))?;
    if cli.job.json {
        output::print_json(&report)?;
    } else {
        println!(
            "notified {} rows: {} issues matched, {} comments posted",
            report.rows, report.matched_issues, report.comments_posted
        );
        if config.dry_run {
            println!("dry run: nothing was posted");
        }
    }
    Ok(())
}
