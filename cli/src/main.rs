use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use helptree_discovery::{CommandProbe, Harvester};
use helptree_fish::{GeneratorConfig, Profile, generate};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

/// Harvest a command's `--help` tree and print fish completions for it.
///
/// Without options this completes `git-branchless`, including its `sl`
/// alias and the subcommands it installs into `git`.
#[derive(Debug, Parser)]
#[command(name = "gen-fish-completions")]
#[command(version, about)]
struct Cli {
    /// YAML file overriding the built-in profile.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Executable to harvest instead of the profile's root.
    #[arg(long, value_name = "CMD")]
    root: Option<String>,
    /// Kill any help command running longer than this.
    #[arg(long, value_name = "N")]
    timeout_ms: Option<u64>,
    /// Print the harvested tree as JSON instead of completions.
    #[arg(long)]
    dump_tree: bool,
    /// Log every probe and rendered command.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli).and_then(|()| run(cli)) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) -> Result<(), String> {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    // stdout carries the script, so logs go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("failed to install logger: {e}"))
}

fn load_profile(cli: &Cli) -> Result<Profile, String> {
    let mut profile = Profile::git_branchless();
    if let Some(path) = &cli.config {
        let config = GeneratorConfig::load(path)
            .map_err(|e| format!("failed to load config {}: {e}", path.display()))?;
        profile = config.apply(profile);
    }
    if let Some(root) = &cli.root {
        profile.root = root.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        profile.timeout = Some(Duration::from_millis(timeout_ms));
    }
    Ok(profile)
}

fn run(cli: Cli) -> Result<(), String> {
    let profile = load_profile(&cli)?;
    debug!(root = %profile.root, "Using profile");

    let mut probe = CommandProbe::new().with_help_flag(&profile.help_flag);
    if let Some(timeout) = profile.timeout {
        probe = probe.with_timeout(timeout);
    }
    debug!(help_flag = probe.help_flag(), timeout = ?profile.timeout, "Probing with");
    let mut harvester = Harvester::new(probe);
    let root = harvester
        .harvest(&[profile.root.clone()])
        .map_err(|e| e.to_string())?;
    info!(probes = harvester.probe_count(), "Harvest finished");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.dump_tree {
        serde_json::to_writer_pretty(&mut out, &root)
            .map_err(|e| format!("JSON serialization failed: {e}"))?;
        writeln!(out).map_err(|e| format!("failed to write output: {e}"))?;
    } else {
        let diagnostics = generate(&root, &profile, &mut out).map_err(|e| e.to_string())?;
        for placeholder in diagnostics.unknown_placeholders() {
            debug!(placeholder = placeholder, "Rendered with the generic fallback");
        }
    }

    out.flush()
        .map_err(|e| format!("failed to write output: {e}"))
}
