use clap::{ArgAction, Parser};
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{Level, info};
use tri_plot::{Config, loader::CountPolicy, run};
use utilities::format_duration;

/// Plots a point set and the edges between its points to an image.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of points in the points file
    count: usize,
    /// Points file, one "x y" pair per line
    #[arg(long, default_value = "results/points.txt")]
    points: PathBuf,
    /// Edges file, one "a b" point index pair per line
    #[arg(long, default_value = "results/edges.txt")]
    edges: PathBuf,
    /// Output image, format taken from the extension (png, jpg, bmp, svg)
    #[arg(short, long, default_value = "tri.png")]
    output: PathBuf,
    /// RON file overriding the plot style
    #[arg(long)]
    style: Option<PathBuf>,
    /// Fail if the points file has fewer lines than COUNT instead of filling with (0, 0)
    #[arg(long)]
    strict: bool,
    /// More logging, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            count: cli.count,
            points_path: cli.points,
            edges_path: cli.edges,
            output_path: cli.output,
            policy: if cli.strict { CountPolicy::Strict } else { CountPolicy::ZeroFill },
            style: cli.style,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let start = Instant::now();
    let summary = run(&cli.into())?;
    info!(
        "plotted {} points and {} edges to {} in {}",
        summary.points,
        summary.edges,
        summary.output.display(),
        format_duration(start.elapsed())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["tri_plot", "12"]).unwrap();
        let config = Config::from(cli);
        let defaults = Config::new(12);
        assert_eq!(config.count, 12);
        assert_eq!(config.points_path, defaults.points_path);
        assert_eq!(config.edges_path, defaults.edges_path);
        assert_eq!(config.output_path, defaults.output_path);
        assert_eq!(config.policy, CountPolicy::ZeroFill);
        assert!(config.style.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "tri_plot", "3", "--points", "p.txt", "--edges", "e.txt", "-o", "out.svg", "--strict",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let config = Config::from(cli);
        assert_eq!(config.points_path, PathBuf::from("p.txt"));
        assert_eq!(config.output_path, PathBuf::from("out.svg"));
        assert_eq!(config.policy, CountPolicy::Strict);
    }

    #[test]
    fn test_cli_requires_count() {
        assert!(Cli::try_parse_from(["tri_plot"]).is_err());
        assert!(Cli::try_parse_from(["tri_plot", "three"]).is_err());
    }
}
