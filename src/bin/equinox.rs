use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use equinox::env_state::EquinoxEnv;
use equinox::{ConversionRequest, Converter, InputKind};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "equinox")]
#[command(about = "Convert a sky position between B1950, J2000, Galactic and arbitrary-equinox frames")]
struct Cli {
    /// Position in J2000 (RA in hours, or degrees with a leading + or a ° marker)
    #[arg(long, num_args = 2, value_names = ["RA", "DEC"], allow_hyphen_values = true)]
    j2000: Option<Vec<String>>,

    /// Position in B1950
    #[arg(long, num_args = 2, value_names = ["RA", "DEC"], allow_hyphen_values = true)]
    b1950: Option<Vec<String>>,

    /// Position in (IAU 1958) Galactic coordinates, both in degrees
    #[arg(long, num_args = 2, value_names = ["L", "B"], allow_hyphen_values = true)]
    galactic: Option<Vec<String>>,

    /// Position in pre-1958 Galactic coordinates, both in degrees
    #[arg(long, num_args = 2, value_names = ["L", "B"], allow_hyphen_values = true)]
    old_galactic: Option<Vec<String>>,

    /// Position at the equinox given by --user-year
    #[arg(long, num_args = 2, value_names = ["RA", "DEC"], allow_hyphen_values = true)]
    user: Option<Vec<String>>,

    /// Position at the equinox given by --current-year
    #[arg(long, num_args = 2, value_names = ["RA", "DEC"], allow_hyphen_values = true)]
    current: Option<Vec<String>>,

    /// Equinox year for --user and for the "Equinox" output row
    #[arg(long)]
    user_year: Option<String>,

    /// "Current" equinox year; defaults to the configured year or today's date
    #[arg(long)]
    current_year: Option<String>,

    /// JSON file holding an EquinoxEnv
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the latest accepted equinox year
    #[arg(long)]
    max_year: Option<f64>,

    /// Print a grid instead of labelled lines
    #[arg(long)]
    table: bool,

    /// Log conversion steps (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn inputs(&self) -> [(InputKind, &Option<Vec<String>>); 6] {
        [
            (InputKind::J2000, &self.j2000),
            (InputKind::B1950, &self.b1950),
            (InputKind::Galactic, &self.galactic),
            (InputKind::OldGalactic, &self.old_galactic),
            (InputKind::UserEquinox, &self.user),
            (InputKind::CurrentEquinox, &self.current),
        ]
    }

    fn env(&self) -> anyhow::Result<EquinoxEnv> {
        let mut env = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => EquinoxEnv::default(),
        };
        if let Some(max_year) = self.max_year {
            env = env.with_max_epoch_year(max_year);
        }
        Ok(env)
    }
}

fn setup_logging(verbose: bool) {
    let base_level = if verbose { "debug" } else { "warn" };
    let filter = if verbose {
        EnvFilter::new(base_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(base_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let env = cli.env()?;
    let mut request = ConversionRequest::new();

    for (kind, values) in cli.inputs() {
        if let Some([lon, lat]) = values.as_deref() {
            request = request.with_input(kind, lon.as_str(), lat.as_str());
        }
    }
    if let Some(year) = &cli.user_year {
        request = request.with_user_year(year.as_str());
    }
    match &cli.current_year {
        Some(year) => request = request.with_current_year(year.as_str()),
        None => match env.current_year() {
            Ok(year) => request = request.with_current_year(year.to_string()),
            Err(err) => warn!(%err, "no current equinox row"),
        },
    }

    let result = Converter::new(env).convert(&request)?;
    if cli.table {
        println!("{}", result.table());
    } else {
        print!("{}", result.show());
    }
    Ok(())
}
