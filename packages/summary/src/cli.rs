//! Command-line interface for the summary generator.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::GitHubClient;
use crate::builder::DocBuilder;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::Result;
use crate::render::{Artifact, Renderer};
use crate::sample;
use crate::timerange::{EndTime, Interval, TimeRange};
use crate::types::{Gist, Repository, UserInfo};

/// GitHub summary generator - Render a GitHub profile's projects into a LaTeX report.
#[derive(Parser, Debug)]
#[command(name = "github-summary")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// GitHub username to summarize
    #[arg(required_unless_present = "example")]
    pub user: Option<String>,

    /// Interval of the summary: YEAR or MONTH
    #[arg(short, long, default_value = "YEAR")]
    pub intervall: String,

    /// End of the summary: TODAY or an epoch timestamp in seconds
    #[arg(short, long, default_value = "TODAY")]
    pub endtime: String,

    /// Config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Write the LaTeX source only, without compiling a PDF
    #[arg(long)]
    pub tex: bool,

    /// Render a report from built-in sample data
    #[arg(long)]
    pub example: bool,
}

/// Records a report is built from.
struct Records {
    login: String,
    user: Option<UserInfo>,
    repos: Vec<Repository>,
    gists: Vec<Gist>,
    range: TimeRange,
}

/// Run the CLI with parsed arguments and a loaded config.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    tracing::info!(user = ?cli.user, intervall = %cli.intervall, endtime = %cli.endtime, "got arguments");
    let now = Local::now();

    let records = match cli.user.as_deref() {
        Some(user) if !cli.example => fetch_records(config, user, cli, now)?,
        _ => sample_records(),
    };

    tracing::info!("generating LaTeX structure");
    let mut builder = DocBuilder::new(
        &records.login,
        records.user,
        &records.repos,
        &records.gists,
        records.range,
        now,
    );
    println!("  Repositories in range: {}", style(builder.repos().len()).green());
    println!("  Gists in range: {}", style(builder.gists().len()).green());
    builder.generate_structure();
    let document = builder.finish();

    tracing::info!("generating output file");
    let renderer = Renderer::new(config, !cli.tex);
    let artifact = renderer.render(&document)?;

    println!();
    match &artifact {
        Artifact::Pdf(path) => println!("{} {}", style("Saved to:").green().bold(), path.display()),
        Artifact::Tex(path) => println!(
            "{} {}",
            style("Saved LaTeX source to:").yellow().bold(),
            path.display()
        ),
    }

    Ok(())
}

fn sample_records() -> Records {
    println!("{} built-in sample data", style("Rendering").bold());
    println!();
    Records {
        login: sample::SAMPLE_LOGIN.to_string(),
        user: Some(sample::sample_user()),
        repos: sample::sample_repositories(),
        gists: Vec::new(),
        range: sample::sample_range(),
    }
}

fn fetch_records(
    config: &Config,
    user: &str,
    cli: &Cli,
    now: DateTime<Local>,
) -> Result<Records> {
    // Validate inputs before making HTTP requests
    let mut client = GitHubClient::new(config, user)?;
    let range = TimeRange::resolve(
        Interval::from_keyword(&cli.intervall),
        EndTime::from_keyword(&cli.endtime),
        now,
    )?;

    println!(
        "{} {} for {}",
        style("Summarizing").bold(),
        style(user).cyan(),
        style(range).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let fetched = fetch_all(&mut client, &pb);
    pb.finish_and_clear();
    let (info, repos, gists) = fetched?;
    tracing::info!(remaining = client.rate_limit(), "got all API data");

    match &info {
        Some(info) => println!("  Name: {}", style(info.display_name()).green()),
        None => println!(
            "  {}",
            style("User info unavailable, using the username").yellow()
        ),
    }
    if client.rate_limit() == 0 {
        println!("  {}", style("API rate limit exhausted, report may be incomplete").yellow().bold());
    }

    Ok(Records {
        login: user.to_string(),
        user: info,
        repos,
        gists,
        range,
    })
}

fn fetch_all(
    client: &mut GitHubClient,
    pb: &ProgressBar,
) -> Result<(Option<UserInfo>, Vec<Repository>, Vec<Gist>)> {
    pb.set_message("Fetching user info...");
    let info = client.fetch_user_info()?;
    pb.set_message("Fetching repositories...");
    let repos = client.fetch_repositories()?;
    pb.set_message("Fetching gists...");
    let gists = client.fetch_gists()?;
    Ok((info, repos, gists))
}
