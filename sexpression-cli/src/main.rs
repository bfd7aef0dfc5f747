//! `sexpr` entry point.

use std::io::Read;
use std::path::Path;

use clap::{Parser, Subcommand};
use sexpression::{parse, stringify, stringify_pretty, ConvertError, ParseError, PrintError, Tree};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sexpr")]
#[command(about = "Convert between JSON and s-expression files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON document to an s-expression
    ToSexp {
        /// Input JSON file (or - for stdin)
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Lay the output out to fit this many columns
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Convert an s-expression to a JSON document
    ToJson {
        /// Input s-expression file (or - for stdin)
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Write JSON on a single line
        #[arg(long)]
        compact: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid s-expression: {0}")]
    Parse(#[from] ParseError),
    #[error("cannot print s-expression: {0}")]
    Print(#[from] PrintError),
    #[error("cannot represent as JSON: {0}")]
    Convert(#[from] ConvertError),
}

fn json_to_sexp(source: &str, width: Option<usize>) -> Result<String, Error> {
    let json: serde_json::Value = serde_json::from_str(source)?;
    let tree = Tree::from(json);
    let sexp = match width {
        Some(width) => stringify_pretty(&tree, width)?,
        None => stringify(&tree)?,
    };
    Ok(sexp)
}

fn sexp_to_json(source: &str, compact: bool) -> Result<String, Error> {
    let value = parse(source)?;
    let json = serde_json::Value::from(Tree::try_from(&value)?);
    let text = if compact {
        serde_json::to_string(&json)?
    } else {
        serde_json::to_string_pretty(&json)?
    };
    Ok(text)
}

fn read_input(input: &str) -> Result<String, Error> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

fn write_output(output: Option<&str>, text: &str) -> Result<(), Error> {
    match output {
        Some(path) => {
            std::fs::write(Path::new(path), text)?;
            info!("Wrote: {}", path);
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("sexpr=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ToSexp {
            input,
            output,
            width,
        } => {
            let source = read_input(&input)?;
            debug!("Read {} bytes from {}", source.len(), input);
            let sexp = json_to_sexp(&source, width)?;
            write_output(output.as_deref(), &sexp)?;
        }

        Commands::ToJson {
            input,
            output,
            compact,
        } => {
            let source = read_input(&input)?;
            debug!("Read {} bytes from {}", source.len(), input);
            let json = sexp_to_json(&source, compact)?;
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_to_sexp() {
        let sexp = json_to_sexp(r#"{"a": [1, 2], "b": true}"#, None).unwrap();
        assert_eq!(sexp, r#"(("a" . (1 2)) ("b" . true))"#);
    }

    #[test]
    fn test_sexp_to_json() {
        let json = sexp_to_json(r#"(("a" 1 2) ("b" . true))"#, true).unwrap();
        assert_eq!(json, r#"{"a":[1,2],"b":true}"#);
    }

    #[test]
    fn test_errors_are_reported() {
        assert!(matches!(json_to_sexp("{", None), Err(Error::Json(_))));
        assert!(matches!(sexp_to_json("(1 2", false), Err(Error::Parse(_))));
        assert!(matches!(sexp_to_json("(1 . 2)", false), Err(Error::Convert(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let sexp_path = dir.path().join("out.sexp");
        let json_path = dir.path().join("out.json");
        let original = r#"{"name":"x","tags":["a","b"],"nested":{"n":null,"f":1.5}}"#;

        let sexp = json_to_sexp(original, Some(20)).unwrap();
        write_output(sexp_path.to_str(), &sexp).unwrap();

        let source = read_input(sexp_path.to_str().unwrap()).unwrap();
        let json = sexp_to_json(&source, true).unwrap();
        write_output(json_path.to_str(), &json).unwrap();

        assert_eq!(std::fs::read_to_string(&json_path).unwrap(), original);
    }
}
