mod config;
mod diff;
mod report;
mod source;

use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

use source::PullRequestSource;

/// patchsplit — splits a combined pull request diff into per-file patches,
/// prints the change listing, and serves individual patches by path.
#[derive(Parser, Debug)]
#[command(name = "patchsplit", version, about)]
struct Cli {
    /// Path to a combined unified diff, or "-" to read from stdin
    ///
    /// Not required when --demo is used.
    diff_path: Option<PathBuf>,

    /// Print the patch for a single file instead of the listing
    #[arg(short, long)]
    file: Option<String>,

    /// Optional output file path for a markdown listing
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use the built-in demo pull request (no diff file needed)
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = config::Config::load()?;
    if let Some(enabled) = config.color_override() {
        colored::control::set_override(enabled);
    }

    let (demo_pr, blob) = if cli.demo {
        info!("using built-in demo pull request");
        let (pr, blob) = load_demo().await?;
        (Some(pr), blob)
    } else {
        let path = cli.diff_path.as_deref().ok_or(
            "A diff path is required unless --demo is used. Usage: patchsplit <DIFF> or patchsplit --demo",
        )?;
        (None, read_blob(path)?)
    };

    let _main_span = info_span!("patchsplit", bytes = blob.len()).entered();

    info!("parsing diff");
    let records = diff::parse_diff(&blob)?;
    debug!(files = records.len(), "split diff into sections");

    let index = diff::DiffIndex::build(records)?;
    info!(files = index.len(), "indexed diff");

    if let Some(pr) = &demo_pr {
        print_pull_request_header(pr);
    }

    match cli.file {
        Some(ref path) => match index.lookup(path) {
            Some(patch) => print!("{patch}"),
            None => eprintln!("no diff found for {path}"),
        },
        None => {
            if index.is_empty() {
                println!("No changed files.");
            } else {
                let listing = report::build(&index);
                report::output(&listing, cli.output.as_deref())?;
            }
        }
    }

    Ok(())
}

/// Pull the demo blob through the source abstraction, the same way a
/// hosting-backed source would be consumed.
async fn load_demo() -> Result<(source::PullRequest, String), Box<dyn std::error::Error>> {
    let demo = source::DemoSource::new()?;
    let pull_requests = demo.pull_requests().await?;
    let pr = pull_requests
        .into_iter()
        .next()
        .ok_or("demo source has no pull requests")?;
    info!(id = pr.id, title = %pr.title, owner = %pr.owner, "selected demo pull request");
    let blob = demo.diff_text(pr.id).await?;
    Ok((pr, blob))
}

fn print_pull_request_header(pr: &source::PullRequest) {
    println!("PR #{}: \"{}\"", pr.id, pr.title);
    println!("Author: {} | Created: {}", pr.owner, pr.created_at);
    if !pr.body.trim().is_empty() {
        println!("{}", pr.body.trim());
    }
    println!();
}

fn read_blob(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if path == Path::new("-") {
        debug!("reading diff from stdin");
        let mut blob = String::new();
        std::io::stdin().read_to_string(&mut blob)?;
        Ok(blob)
    } else {
        debug!(path = %path.display(), "reading diff file");
        Ok(std::fs::read_to_string(path)?)
    }
}
