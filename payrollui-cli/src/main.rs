use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::EnvFilter;

use payrollui::{PayrollUI, SeedDocument, SubmissionPayload, UiOptions};

const DEFAULT_TEMP_FILE: &str = "/tmp/payrollui-submission.json";

#[derive(Debug, Parser)]
#[command(
    name = "payrollui",
    version,
    about = "Interactive payroll-entry form for the terminal"
)]
struct Cli {
    /// Seed spec: a JSON file with employee/benefits, or "-" for stdin
    #[arg(short = 's', long = "seed", value_name = "SPEC")]
    seed: Option<String>,

    /// Title shown at the top of the form
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Override the default temp file location (only used when no other destinations are set)
    #[arg(long = "temp-file", value_name = "PATH")]
    temp_file: Option<PathBuf>,

    /// Disable writing to the default temp file when no destinations are provided
    #[arg(long = "no-temp-file")]
    no_temp_file: bool,

    /// Emit compact JSON rather than pretty formatting
    #[arg(long = "compact")]
    compact: bool,

    /// Skip session draft registration
    #[arg(long = "no-draft")]
    no_draft: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let destinations = resolve_destinations(&cli);
    ensure_destinations_available(&destinations, cli.force)?;

    let mut ui = PayrollUI::new();
    if let Some(title) = &cli.title {
        ui = ui.with_title(title.clone());
    }
    if let Some(spec) = cli.seed.as_deref() {
        ui = ui.seed_document(load_seed(spec)?);
    }
    if cli.no_draft {
        ui = ui.with_options(UiOptions::default().without_draft());
    }

    match ui.run().map_err(|e| eyre!(e))? {
        Some(payload) => write_submission(&payload, &destinations, cli.compact),
        None => {
            eprintln!("exited without submitting");
            Ok(())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    Stdout,
    File(PathBuf),
}

fn resolve_destinations(cli: &Cli) -> Vec<Destination> {
    if !cli.outputs.is_empty() {
        return cli
            .outputs
            .iter()
            .map(|spec| {
                if spec == "-" {
                    Destination::Stdout
                } else {
                    Destination::File(PathBuf::from(spec))
                }
            })
            .collect();
    }
    if cli.no_temp_file {
        return vec![Destination::Stdout];
    }
    let path = cli
        .temp_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMP_FILE));
    vec![Destination::File(path)]
}

fn ensure_destinations_available(destinations: &[Destination], force: bool) -> Result<()> {
    if force {
        return Ok(());
    }
    for destination in destinations {
        if let Destination::File(path) = destination
            && path.exists()
        {
            return Err(eyre!(
                "output file {} already exists (use --force to overwrite)",
                path.display()
            ));
        }
    }
    Ok(())
}

fn load_seed(spec: &str) -> Result<SeedDocument> {
    let body = if spec == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read seed from stdin")?;
        buffer
    } else {
        fs::read_to_string(Path::new(spec))
            .wrap_err_with(|| format!("failed to read seed file {spec}"))?
    };
    serde_json::from_str(&body).wrap_err("seed document is not valid JSON")
}

fn write_submission(
    payload: &SubmissionPayload,
    destinations: &[Destination],
    compact: bool,
) -> Result<()> {
    let body = if compact {
        serde_json::to_string(payload)
    } else {
        serde_json::to_string_pretty(payload)
    }
    .wrap_err("failed to encode submission payload")?;

    for destination in destinations {
        match destination {
            Destination::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(body.as_bytes())
                    .and_then(|()| stdout.write_all(b"\n"))
                    .wrap_err("failed to write submission to stdout")?;
            }
            Destination::File(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    fs::create_dir_all(parent).wrap_err_with(|| {
                        format!("failed to create output directory {}", parent.display())
                    })?;
                }
                fs::write(path, &body)
                    .wrap_err_with(|| format!("failed to write {}", path.display()))?;
                eprintln!("wrote submission to {}", path.display());
            }
        }
    }
    Ok(())
}
