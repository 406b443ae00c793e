use clap::Parser;
use reqmap::diagram::{clean_sequence_syntax, is_sequence_diagram};
use std::path::PathBuf;

/// Standalone Mermaid sequence-diagram syntax cleaner
#[derive(Parser, Debug)]
#[command(name = "reqmap-clean")]
#[command(version)]
#[command(about = "Strip style-class directives that sequence diagrams do not support", long_about = None)]
struct Args {
    /// Input .mmd file (use "-" for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Report what would change without writing anything
    #[arg(long)]
    check: bool,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let source = if args.input.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        buffer
    } else {
        std::fs::read_to_string(&args.input)
            .map_err(|e| format!("Failed to read input file: {}", e))?
    };

    // Cleaning is a no-op on markup that is not a sequence diagram, so
    // running it unconditionally is always safe.
    let cleaned = clean_sequence_syntax(&source);

    if args.check {
        let kind = if is_sequence_diagram(&source) {
            "sequence diagram"
        } else {
            "not a sequence diagram"
        };
        eprintln!("Input is a {}", kind);
        if cleaned == source {
            eprintln!("No changes needed");
            return Ok(());
        }
        return Err("Markup contains directives that are invalid in sequence diagrams".to_string());
    }

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &cleaned)
                .map_err(|e| format!("Failed to write output: {}", e))?;
            eprintln!("Cleaned markup saved to: {}", path.display());
        }
        None => {
            print!("{}", cleaned);
        }
    }

    Ok(())
}
