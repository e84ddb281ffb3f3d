//! `sfxgen` renders the retro effect catalog and background loop to WAV files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use retro_sfx::catalog::Catalog;
use retro_sfx::generator::{ItemReport, generate_all};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Output directory (created if absent)
    #[arg(short, long, default_value = "sounds", global = true)]
    out: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize every effect plus the background track (default)
    Generate(GenerateArgs),
    /// Fetch the pre-recorded counterparts of the stock effects
    #[cfg(feature = "download")]
    Download,
}

#[derive(clap::Args, Debug, Default)]
struct GenerateArgs {
    /// Catalog JSON; the stock catalog is used when absent or invalid
    #[arg(long)]
    config: Option<PathBuf>,

    /// Background track length in seconds (overrides config)
    #[arg(long)]
    duration: Option<f64>,

    /// Background track tempo in BPM (overrides config)
    #[arg(long)]
    tempo: Option<f64>,

    /// Noise seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective catalog as JSON and exit
    #[arg(long, default_value_t = false)]
    print_config: bool,
}

fn load_catalog(args: &GenerateArgs) -> Catalog {
    let mut catalog = match &args.config {
        Some(path) => Catalog::load_or_default(path),
        None => Catalog::default(),
    };
    if let Some(duration) = args.duration {
        catalog.track.duration = duration;
    }
    if let Some(tempo) = args.tempo {
        catalog.track.tempo = tempo;
    }
    if let Some(seed) = args.seed {
        catalog.seed = seed;
    }
    catalog
}

fn summarize(reports: &[ItemReport]) -> ExitCode {
    let failed: Vec<&str> = reports
        .iter()
        .filter(|r| !r.is_ok())
        .map(|r| r.name.as_str())
        .collect();
    if failed.is_empty() {
        tracing::info!("generated {} files", reports.len());
        ExitCode::SUCCESS
    } else {
        tracing::error!("{} of {} failed: {}", failed.len(), reports.len(), failed.join(", "));
        ExitCode::FAILURE
    }
}

fn generate(out: &Path, args: &GenerateArgs) -> ExitCode {
    let catalog = load_catalog(args);
    if args.print_config {
        return match serde_json::to_string_pretty(&catalog) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                tracing::error!("failed to serialize catalog: {err}");
                ExitCode::FAILURE
            }
        };
    }
    summarize(&generate_all(&catalog, out))
}

#[cfg(feature = "download")]
fn download(out: &Path) -> ExitCode {
    use retro_sfx::download::{DEFAULT_SOURCES, download_all};

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            tracing::error!("failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };
    match runtime.block_on(download_all(DEFAULT_SOURCES, out)) {
        Ok(reports) => {
            let failed = reports.iter().filter(|r| r.outcome.is_err()).count();
            if failed == 0 {
                ExitCode::SUCCESS
            } else {
                tracing::error!("{failed} of {} downloads failed", reports.len());
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        None => generate(&args.out, &GenerateArgs::default()),
        Some(Command::Generate(ref g)) => generate(&args.out, g),
        #[cfg(feature = "download")]
        Some(Command::Download) => download(&args.out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn overrides_apply_to_track_and_seed() {
        let args = Args::parse_from([
            "sfxgen", "generate", "--duration", "12", "--tempo", "90", "--seed", "3",
        ]);
        let Some(Command::Generate(g)) = args.command else {
            panic!("expected generate subcommand");
        };
        let catalog = load_catalog(&g);
        assert_eq!(catalog.track.duration, 12.0);
        assert_eq!(catalog.track.tempo, 90.0);
        assert_eq!(catalog.seed, 3);
        assert_eq!(catalog.effects.len(), 6);
    }

    #[test]
    fn default_out_dir() {
        let args = Args::parse_from(["sfxgen"]);
        assert_eq!(args.out, PathBuf::from("sounds"));
        assert!(args.command.is_none());
    }
}
