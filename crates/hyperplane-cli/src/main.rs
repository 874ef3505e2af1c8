//! `hyperplane` command line tool.
//!
//! ```text
//! hyperplane enumerate input.txt output.txt 2 1 0
//! ```
//!
//! reads a landscape from `input.txt`, writes every 2-bit local optimum to
//! `output.txt`, uses hyperplane elimination and turns off reordering.
//!
//! ```text
//! hyperplane generate IsingSpinGlass 49 2 0 ising.txt
//! hyperplane suite benchmarks/
//! ```
//!
//! write one seeded benchmark landscape, or the whole benchmark sweep.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use hyperplane::{
    dependency_report, run_enumeration, EnumerationConfig, EnvironmentMode, HyperplaneError,
    Result,
};
use hyperplane_benchmark::{write_benchmark, BenchmarkSuite, Family, GenerateError};
use owo_colors::OwoColorize;

#[derive(Debug, Parser)]
#[command(name = "hyperplane", version, about = "Exhaustive r-bit local optima enumeration")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write every local optimum of a landscape to a file
    Enumerate(EnumerateArgs),
    /// Print the mean number of interaction partners per variable
    Depends {
        /// Landscape files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Write one seeded benchmark landscape
    Generate(GenerateArgs),
    /// Write every landscape of the benchmark sweep into a folder
    Suite {
        /// Destination folder, created if missing
        folder: PathBuf,
    },
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// DeceptiveTrap, MAXSAT, IsingSpinGlass, AdjacentNKq or RandomNKq
    family: Family,
    /// Number of bits
    length: usize,
    /// Trap size, clause width or NK epistasis (2 for IsingSpinGlass)
    k: usize,
    /// Random seed
    seed: u64,
    /// File receiving the landscape
    output: PathBuf,
}

#[derive(Debug, Args)]
struct EnumerateArgs {
    /// Landscape to read
    input: PathBuf,
    /// File receiving the local optima
    output: PathBuf,
    /// Largest number of bits flipped together
    radius: usize,
    /// 0 turns hyperplane elimination off
    #[arg(allow_negative_numbers = true)]
    use_hyperplanes: Option<i64>,
    /// 0 turns bit reordering off
    #[arg(allow_negative_numbers = true)]
    use_reordering: Option<i64>,
    /// TOML or YAML file with defaults for the switches
    #[arg(long)]
    config: Option<PathBuf>,
    /// Recompute every delta at each local optimum
    #[arg(long)]
    verify: bool,
    /// No banner or progress output
    #[arg(long, short)]
    quiet: bool,
}

impl EnumerateArgs {
    fn to_config(&self) -> Result<EnumerationConfig> {
        let mut config = match &self.config {
            Some(path) => EnumerationConfig::from_file(path)
                .map_err(|err| HyperplaneError::Config(err.to_string()))?,
            None => EnumerationConfig::default(),
        };
        config.radius = self.radius;
        if let Some(flag) = self.use_hyperplanes {
            config.hyperplane_elimination = flag != 0;
        }
        if let Some(flag) = self.use_reordering {
            config.reordering = flag != 0;
        }
        if self.verify {
            config.environment_mode = EnvironmentMode::FullAssert;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Enumerate(args) => {
            if !args.quiet {
                hyperplane::console::init();
            }
            let config = args.to_config()?;
            run_enumeration(&config, &args.input, &args.output)?;
            Ok(())
        }
        Command::Depends { files } => {
            let report = dependency_report(files.as_slice())?;
            for (path, mean) in &report.entries {
                println!("{} {}", path.display(), format_mean(*mean));
            }
            println!("Total {}", format_mean(report.total()));
            Ok(())
        }
        Command::Generate(args) => {
            let landscape =
                write_benchmark(args.family, args.length, args.k, args.seed, &args.output)
                    .map_err(generation_error)?;
            println!(
                "{} {} │ {} bits │ {} subfunctions",
                "wrote".bright_green(),
                args.output.display(),
                landscape.length(),
                landscape.subfunctions().len()
            );
            Ok(())
        }
        Command::Suite { folder } => {
            let written = BenchmarkSuite::new()
                .write_all(&folder)
                .map_err(generation_error)?;
            println!(
                "{} {} landscapes to {}",
                "wrote".bright_green(),
                written.len(),
                folder.display()
            );
            Ok(())
        }
    }
}

fn generation_error(err: GenerateError) -> HyperplaneError {
    match err {
        GenerateError::Io(err) => HyperplaneError::Io(err),
        GenerateError::Landscape(err) => HyperplaneError::Load(err),
        other => HyperplaneError::Config(other.to_string()),
    }
}

fn format_mean(mean: Option<f64>) -> String {
    match mean {
        Some(mean) => mean.to_string(),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    fn enumerate_args(args: &[&str]) -> EnumerateArgs {
        let mut argv = vec!["hyperplane", "enumerate"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Enumerate(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_keep_both_switches_on() {
        let config = enumerate_args(&["in.txt", "out.txt", "2"]).to_config().unwrap();
        assert_eq!(config.radius, 2);
        assert!(config.hyperplane_elimination);
        assert!(config.reordering);
        assert!(!config.verify_deltas());
    }

    #[test]
    fn test_zero_turns_switches_off() {
        let config = enumerate_args(&["in.txt", "out.txt", "2", "1", "0"])
            .to_config()
            .unwrap();
        assert!(config.hyperplane_elimination);
        assert!(!config.reordering);

        let config = enumerate_args(&["in.txt", "out.txt", "1", "0"])
            .to_config()
            .unwrap();
        assert!(!config.hyperplane_elimination);
        assert!(config.reordering);
    }

    #[test]
    fn test_any_nonzero_enables() {
        let config = enumerate_args(&["in.txt", "out.txt", "1", "7", "-1"])
            .to_config()
            .unwrap();
        assert!(config.hyperplane_elimination);
        assert!(config.reordering);
    }

    #[test]
    fn test_radius_is_required() {
        assert!(Cli::try_parse_from(["hyperplane", "enumerate", "in.txt", "out.txt"]).is_err());
        assert!(Cli::try_parse_from(["hyperplane", "enumerate", "in.txt", "out.txt", "x"]).is_err());
    }

    #[test]
    fn test_command_line_overrides_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("run.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "radius = 5\nreordering = false\nhyperplane_elimination = false").unwrap();
        drop(file);

        let config_arg = path.to_str().unwrap();
        let config = enumerate_args(&["in.txt", "out.txt", "3", "1", "--config", config_arg])
            .to_config()
            .unwrap();
        assert_eq!(config.radius, 3);
        assert!(config.hyperplane_elimination);
        assert!(!config.reordering);
    }

    #[test]
    fn test_verify_flag_sets_full_assert() {
        let config = enumerate_args(&["in.txt", "out.txt", "1", "--verify"])
            .to_config()
            .unwrap();
        assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    }

    #[test]
    fn test_depends_requires_files() {
        assert!(Cli::try_parse_from(["hyperplane", "depends"]).is_err());
    }

    #[test]
    fn test_generate_writes_loadable_landscape() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ising.txt");
        let path_arg = path.to_str().unwrap();
        let cli = Cli::try_parse_from([
            "hyperplane",
            "generate",
            "IsingSpinGlass",
            "16",
            "2",
            "3",
            path_arg,
        ])
        .unwrap();
        run(cli).unwrap();

        let loaded = hyperplane::Landscape::from_file(&path).unwrap();
        let expected = hyperplane_benchmark::generate(Family::IsingSpinGlass, 16, 2, 3).unwrap();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_generate_rejects_unknown_family() {
        assert!(
            Cli::try_parse_from(["hyperplane", "generate", "Sudoku", "9", "2", "0", "out.txt"])
                .is_err()
        );
    }

    #[test]
    fn test_generate_bad_length_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ising.txt");
        let cli = Cli::try_parse_from([
            "hyperplane",
            "generate",
            "ising-spin-glass",
            "15",
            "2",
            "0",
            path.to_str().unwrap(),
        ])
        .unwrap();
        assert!(matches!(run(cli), Err(HyperplaneError::Config(_))));
        assert!(!path.exists());
    }
}
