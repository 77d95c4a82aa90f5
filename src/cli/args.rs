use crate::error::ProcGapError;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "procgap")]
#[command(about = "Swiss-cheese model risk analysis for process gaps")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Propagation threshold: a vulnerability seeds a failure path only if
    /// its probability strictly exceeds this value (0-1)
    #[arg(short = 't', long, default_value = "0.3", value_parser = validate_threshold)]
    pub threshold: f64,

    /// Failure-tree JSON file; enables historical probability refinement
    #[arg(short = 'f', long)]
    pub data_file: Option<PathBuf>,

    /// Generate one random live telemetry sample instead of reading stdin
    #[arg(long)]
    pub live: bool,

    /// Output format for the risk report (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Enable verbose diagnostics on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Suppress all diagnostics except errors
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Result<Self, ProcGapError> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ProcGapError::InvalidArguments(format!(
                "Unknown output format: {other} (expected text or json)"
            ))),
        }
    }
}

impl Cli {
    pub fn parse_args() -> Result<Self, ProcGapError> {
        let cli = Self::try_parse().map_err(|e| ProcGapError::InvalidArguments(e.to_string()))?;

        cli.validate()?;

        Ok(cli)
    }

    pub fn validate(&self) -> Result<(), ProcGapError> {
        self.output_format()?;

        if self.verbose && self.quiet {
            return Err(ProcGapError::InvalidArguments(
                "--verbose and --quiet are mutually exclusive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn output_format(&self) -> Result<OutputFormat, ProcGapError> {
        OutputFormat::from_str(&self.format)
    }

    pub fn should_use_color(&self) -> bool {
        // Respect the NO_COLOR convention.
        std::env::var("NO_COLOR").is_err()
    }
}

fn validate_threshold(s: &str) -> Result<f64, String> {
    let threshold: f64 = s.parse().map_err(|_| "Threshold must be a number")?;

    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err("Threshold must be between 0 and 1".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(vec!["procgap"]).unwrap();

        assert_eq!(cli.threshold, 0.3);
        assert!(cli.data_file.is_none());
        assert!(!cli.live);
        assert_eq!(cli.format, "text");
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from(vec![
            "procgap",
            "--threshold",
            "0.5",
            "--data-file",
            "tree.json",
            "--live",
            "--format",
            "json",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.threshold, 0.5);
        assert_eq!(cli.data_file, Some(PathBuf::from("tree.json")));
        assert!(cli.live);
        assert_eq!(cli.output_format().unwrap(), OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_threshold_range_validation() {
        assert!(Cli::try_parse_from(vec!["procgap", "--threshold", "1.5"]).is_err());
        assert!(Cli::try_parse_from(vec!["procgap", "--threshold", "-0.1"]).is_err());
        assert!(Cli::try_parse_from(vec!["procgap", "--threshold", "abc"]).is_err());
        assert!(Cli::try_parse_from(vec!["procgap", "--threshold", "1.0"]).is_ok());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let cli = Cli::try_parse_from(vec!["procgap", "--format", "yaml"]).unwrap();
        assert!(matches!(
            cli.validate(),
            Err(ProcGapError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let cli = Cli::try_parse_from(vec!["procgap", "-v", "-q"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(vec!["procgap", "-t", "0.4", "-f", "tree.json", "-v"]).unwrap();

        assert_eq!(cli.threshold, 0.4);
        assert_eq!(cli.data_file, Some(PathBuf::from("tree.json")));
        assert!(cli.verbose);
    }
}
