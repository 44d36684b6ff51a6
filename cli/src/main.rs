use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use esquared_estimator_core::{
    format_currency, get_cost_schema, CostBreakdown, Estimator, EstimatorConfig, ProjectForm,
};

/// Construction cost estimates from the command line.
#[derive(Parser)]
#[command(name = "esquared-estimate", version, about = "Construction cost estimator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a project and print the breakdown
    Estimate {
        #[command(flatten)]
        project: ProjectArgs,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Estimate a project and print a new quote as JSON
    Quote {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Print the cost schema documentation
    CostSchema {
        /// Rate config JSON file (default: built-in rates)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Raw project fields, validated by the core form parser
#[derive(Args)]
struct ProjectArgs {
    /// Floor area of one floor
    #[arg(long, allow_hyphen_values = true)]
    area: String,
    /// Number of floors
    #[arg(long, allow_hyphen_values = true)]
    floors: String,
    /// Building type (residential, commercial)
    #[arg(long = "type", default_value = "")]
    building_type: String,
    /// Finish level (basic, standard, premium)
    #[arg(long, default_value = "")]
    finish: String,
    /// Location class (metro, provincial, remote)
    #[arg(long, default_value = "")]
    location: String,
    /// Rate config JSON file (default: built-in rates)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ProjectArgs {
    fn to_form(&self) -> ProjectForm {
        ProjectForm {
            area: self.area.clone(),
            floors: self.floors.clone(),
            building_type: self.building_type.clone(),
            finish: self.finish.clone(),
            location: self.location.clone(),
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("ESQUARED_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EstimatorConfig> {
    let Some(path) = path else {
        return Ok(EstimatorConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = EstimatorConfig::from_json(&json)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded rate config");
    Ok(config)
}

fn render_breakdown(breakdown: &CostBreakdown) -> String {
    let mut out = format!("Total area: {:.2} sq.m\n\n", breakdown.total_area());
    for (category, cost) in breakdown.lines() {
        out.push_str(&format!(
            "{:<16}{:>20}\n",
            category.display_name(),
            format_currency(cost)
        ));
    }
    out.push_str(&format!(
        "\n{:<16}{:>20}\n",
        "Total estimate",
        format_currency(breakdown.total_estimate())
    ));
    out
}

/// Execute a command and return what it prints
fn run(cli: Cli) -> Result<String> {
    let output = match cli.command {
        Commands::Estimate { project, json } => {
            let estimator = Estimator::new(load_config(project.config.as_deref())?)?;
            let input = project.to_form().parse()?;
            let breakdown = estimator.estimate(&input)?;
            if json {
                serde_json::to_string_pretty(&breakdown)? + "\n"
            } else {
                render_breakdown(&breakdown)
            }
        }
        Commands::Quote { project } => {
            let estimator = Estimator::new(load_config(project.config.as_deref())?)?;
            let input = project.to_form().parse()?;
            let quote = estimator.quote(input)?;
            serde_json::to_string_pretty(&quote)? + "\n"
        }
        Commands::CostSchema { config } => {
            let config = load_config(config.as_deref())?;
            get_cost_schema(&config)? + "\n"
        }
    };
    Ok(output)
}

fn main() -> Result<()> {
    init_tracing();
    print!("{}", run(Cli::parse())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use esquared_estimator_core::{estimate, Quote, QUOTE_ID_PREFIX};
    use std::fs;

    fn run_args(args: &[&str]) -> Result<String> {
        let argv = std::iter::once("esquared-estimate").chain(args.iter().copied());
        run(Cli::try_parse_from(argv)?)
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_area_reaches_form_parser() {
        let cli = Cli::try_parse_from([
            "esquared-estimate",
            "estimate",
            "--area",
            "-5",
            "--floors",
            "1",
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.to_string(), "Area must be a positive number, got '-5'");
    }

    #[test]
    fn test_render_breakdown() {
        let form = ProjectForm {
            area: "100".to_string(),
            floors: "1".to_string(),
            ..ProjectForm::default()
        };
        let breakdown = estimate(&form.parse().unwrap()).unwrap();
        let rendered = render_breakdown(&breakdown);

        assert!(rendered.starts_with("Total area: 100.00 sq.m"));
        assert!(rendered.contains("Structural"));
        assert!(rendered.contains("₱1,200,000.00"));
        assert!(rendered.contains("MEP"));
        assert!(rendered.contains("₱3,480,000.00"));
    }

    #[test]
    fn test_estimate_json_output() {
        let output = run_args(&["estimate", "--area", "100", "--floors", "1", "--json"]).unwrap();
        let breakdown: CostBreakdown = serde_json::from_str(&output).unwrap();
        assert!((breakdown.total_estimate() - 3_480_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_quote_command_prints_quote_json() {
        let output = run_args(&[
            "quote", "--area", "50", "--floors", "2", "--type", "Commercial", "--finish",
            "basic", "--location", "REMOTE",
        ])
        .unwrap();

        let quote: Quote = serde_json::from_str(&output).unwrap();
        assert!(quote.id().starts_with(QUOTE_ID_PREFIX));
        assert_eq!(quote.config_hash(), EstimatorConfig::default().config_hash());
        assert!((quote.total_estimate() - 5_089_500.0).abs() < 1e-6);
    }

    #[test]
    fn test_cost_schema_uses_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.json");
        fs::write(&path, r#"{"base_rates": {"structural": 15000.0}}"#).unwrap();

        let output = run_args(&["cost-schema", "--config", path.to_str().unwrap()]).unwrap();
        let schema: serde_json::Value = serde_json::from_str(&output).unwrap();
        let expected = EstimatorConfig::from_json(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(schema["config_hash"], expected.config_hash());
        assert_ne!(schema["config_hash"], EstimatorConfig::default().config_hash());
        assert!(output.contains("15000"));
    }

    #[test]
    fn test_missing_config_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = run_args(&["cost-schema", "--config", path.to_str().unwrap()]).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("failed to read config"), "{}", message);
        assert!(message.contains("missing.json"));
    }

    #[test]
    fn test_invalid_config_file_reports_cause() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.json");
        fs::write(&path, r#"{"labor_ratio": -0.5}"#).unwrap();

        let err = run_args(&[
            "estimate", "--area", "100", "--floors", "1", "--config", path.to_str().unwrap(),
        ])
        .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("invalid config"), "{}", message);
        assert!(message.contains("labor_ratio"), "{}", message);

        fs::write(&path, "not json").unwrap();
        let err = run_args(&["cost-schema", "--config", path.to_str().unwrap()]).unwrap_err();
        assert!(format!("{:#}", err).starts_with("invalid config"));
    }
}
