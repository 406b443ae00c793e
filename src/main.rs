use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use serde::Serialize;
use std::path::PathBuf;

use reqmap::diagram::{self, GenerateOptions, RequirementsDoc, ValidationResult};
use reqmap::{profile, report};

/// Generate methodology-checked Mermaid diagrams from requirements data
#[derive(Parser, Debug)]
#[command(name = "reqmap")]
#[command(version)]
#[command(about = "Generate Mermaid diagrams from structured product requirements", long_about = None)]
struct Args {
    /// Input requirements file, JSON or YAML (use "-" for stdin)
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<PathBuf>,

    /// Diagram kind to generate (context, use-case, class)
    #[arg(short, long, default_value = "use-case")]
    kind: String,

    /// Output file path (extension determines format: .mmd or .json)
    #[arg(short, long, value_name = "OUTPUT", required_unless_present = "completions")]
    output: Option<PathBuf>,

    /// Path to a render profile file (TOML or YAML)
    #[arg(short, long, value_name = "PROFILE")]
    profile: Option<PathBuf>,

    /// Write the full validation result as JSON to this path
    #[arg(long, value_name = "REPORT")]
    report: Option<PathBuf>,

    /// Exit with an error when validation reports blocking findings
    #[arg(long)]
    strict: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

/// Combined artifact written for `.json` outputs
#[derive(Debug, Serialize)]
struct GeneratedDiagram<'a> {
    markup: &'a str,
    validation: &'a ValidationResult,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "reqmap", &mut std::io::stdout());
        return Ok(());
    }

    let input = args.input.ok_or("No input file given")?;
    let output = args.output.ok_or("No output file given")?;

    let options = if let Some(ref profile_path) = args.profile {
        profile::load_profile(profile_path)?
    } else {
        GenerateOptions::default()
    };

    let doc = if input.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        parse_requirements(&buffer, None)?
    } else {
        let content = std::fs::read_to_string(&input)
            .map_err(|e| format!("Failed to read input file: {}", e))?;
        let ext = input
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        parse_requirements(&content, ext.as_deref())?
    };

    let (markup, validation) = diagram::generate(&args.kind, &doc, &options);

    let output_ext = output
        .extension()
        .and_then(|e| e.to_str())
        .ok_or("Output file has no extension")?
        .to_ascii_lowercase();

    match output_ext.as_str() {
        "mmd" => {
            std::fs::write(&output, &markup)
                .map_err(|e| format!("Failed to write markup: {}", e))?;
            eprintln!("Markup saved to: {}", output.display());
        }
        "json" => {
            let artifact = GeneratedDiagram {
                markup: &markup,
                validation: &validation,
            };
            let json = serde_json::to_string_pretty(&artifact)
                .map_err(|e| format!("Failed to serialize diagram: {}", e))?;
            std::fs::write(&output, json)
                .map_err(|e| format!("Failed to write diagram: {}", e))?;
            eprintln!("Diagram saved to: {}", output.display());
        }
        _ => {
            return Err(format!(
                "Unsupported output format: .{} (use .mmd or .json)",
                output_ext
            ));
        }
    }

    eprint!("{}", report::render_text(&validation));

    if let Some(ref report_path) = args.report {
        let json = serde_json::to_string_pretty(&validation)
            .map_err(|e| format!("Failed to serialize validation result: {}", e))?;
        std::fs::write(report_path, json)
            .map_err(|e| format!("Failed to write report: {}", e))?;
        eprintln!("Report saved to: {}", report_path.display());
    }

    if args.strict && !validation.passed {
        return Err(format!(
            "Validation failed with {} blocking findings",
            validation.errors.len()
        ));
    }

    Ok(())
}

/// Parse a requirements document, using the file extension when known and
/// falling back to a JSON-then-YAML cascade otherwise (stdin has no
/// extension to go by).
fn parse_requirements(content: &str, ext: Option<&str>) -> Result<RequirementsDoc, String> {
    match ext {
        Some("json") => serde_json::from_str(content)
            .map_err(|e| format!("Failed to parse JSON requirements: {}", e)),
        Some("yaml") | Some("yml") => serde_yaml::from_str(content)
            .map_err(|e| format!("Failed to parse YAML requirements: {}", e)),
        _ => {
            if let Ok(doc) = serde_json::from_str(content) {
                Ok(doc)
            } else if let Ok(doc) = serde_yaml::from_str(content) {
                Ok(doc)
            } else {
                Err("Failed to parse requirements as JSON or YAML".to_string())
            }
        }
    }
}
