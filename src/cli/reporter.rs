use crate::cli::args::Cli;
use crate::models::RiskReport;
use crate::telemetry::RiskBand;

pub struct ReportFormatter {
    use_colors: bool,
    verbose: bool,
}

impl ReportFormatter {
    pub fn new(cli: &Cli) -> Self {
        Self {
            use_colors: cli.should_use_color(),
            verbose: cli.verbose,
        }
    }

    pub fn format_risk_report(&self, report: &RiskReport) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header(report));
        output.push('\n');

        if let Some(score) = report.risk_score {
            output.push_str(&self.format_risk_score(score));
            output.push_str("\n\n");
        }

        if report.is_empty() {
            output.push_str("No active vulnerabilities.\n");
            return output;
        }

        output.push_str("Top vulnerabilities:\n");
        for (i, vulnerability) in report.top_vulnerabilities.iter().enumerate() {
            output.push_str(&format!(
                "  {}. [{}] {} - {} (p={:.3}, s={:.2})\n",
                i + 1,
                vulnerability.factor_type.as_str(),
                vulnerability.id,
                vulnerability.description,
                vulnerability.probability,
                vulnerability.severity,
            ));
            if self.verbose {
                output.push_str(&format!(
                    "     location: ({:.2}, {:.2}), risk weight: {:.4}\n",
                    vulnerability.location.0,
                    vulnerability.location.1,
                    vulnerability.risk_weight(),
                ));
            }
        }

        output.push_str("\nRecommendations:\n");
        for (i, recommendation) in report.recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, recommendation));
        }

        output
    }

    fn format_header(&self, report: &RiskReport) -> String {
        let title = "=== PROCESS GAP RISK REPORT ===";
        let line = format!(
            "Generated: {} | Active vulnerabilities: {}",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            report.active_vulnerability_count,
        );

        if self.use_colors {
            format!("\x1b[1m\x1b[36m{title}\x1b[0m\n{line}")
        } else {
            format!("{title}\n{line}")
        }
    }

    fn format_risk_score(&self, score: f64) -> String {
        let band = RiskBand::from_ratio(score);

        let color_code = if self.use_colors {
            match band {
                RiskBand::High => "\x1b[1m\x1b[31m",     // bold red
                RiskBand::Moderate => "\x1b[1m\x1b[33m", // bold yellow
                RiskBand::Low => "\x1b[1m\x1b[32m",      // bold green
            }
        } else {
            ""
        };
        let reset = if self.use_colors { "\x1b[0m" } else { "" };

        format!(
            "{}Risk score: {:.4} ({}){}",
            color_code,
            score,
            band.as_str(),
            reset
        )
    }

    pub fn format_error(&self, error: &crate::error::ProcGapError) -> String {
        let (color_code, reset) = if self.use_colors {
            ("\x1b[1m\x1b[31m", "\x1b[0m")
        } else {
            ("", "")
        };

        format!("{color_code}ANALYSIS FAILED{reset}\n\n{error}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FactorType, Vulnerability};
    use crate::reporting::ReportGenerator;
    use clap::Parser;

    fn formatter(args: Vec<&str>) -> ReportFormatter {
        let cli = Cli::try_parse_from(args).unwrap();
        ReportFormatter {
            use_colors: false, // independent of the test environment's NO_COLOR
            verbose: cli.verbose,
        }
    }

    fn sample_report() -> RiskReport {
        let vulnerabilities = vec![
            Vulnerability::new("HRA_triage", FactorType::Human, 0.9, 0.6, "triage").unwrap(),
            Vulnerability::new("SYS_pump", FactorType::Machine, 0.5, 0.8, "pump sensor").unwrap(),
        ];
        ReportGenerator::new()
            .generate_report(&vulnerabilities)
            .with_risk_score(0.54)
    }

    #[test]
    fn test_text_report_contains_sections() {
        let formatted = formatter(vec!["procgap"]).format_risk_report(&sample_report());

        assert!(formatted.contains("PROCESS GAP RISK REPORT"));
        assert!(formatted.contains("Risk score: 0.5400 (Moderate)"));
        assert!(formatted.contains("Top vulnerabilities:"));
        assert!(formatted.contains("HRA_triage"));
        assert!(formatted.contains("Increase training on triage"));
        assert!(formatted.contains("Check system reliability for pump sensor"));
    }

    #[test]
    fn test_verbose_includes_location_detail() {
        let formatted = formatter(vec!["procgap", "-v"]).format_risk_report(&sample_report());
        assert!(formatted.contains("risk weight"));
    }

    #[test]
    fn test_empty_report_text() {
        let report = ReportGenerator::new().generate_report(&[]).with_risk_score(0.0);
        let formatted = formatter(vec!["procgap"]).format_risk_report(&report);

        assert!(formatted.contains("No active vulnerabilities."));
        assert!(formatted.contains("(Low)"));
    }

    #[test]
    fn test_error_formatting() {
        let error = crate::error::ProcGapError::AllAnalyzersFailed;
        let formatted = formatter(vec!["procgap"]).format_error(&error);

        assert!(formatted.contains("ANALYSIS FAILED"));
        assert!(formatted.contains("All analyzers failed"));
    }
}
