//! rpn-sheets CLI - evaluate RPN formulas in CSV files

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rpn_sheets::prelude::*;
use rpn_sheets::{default_registry, format_number, EvaluationStats};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rpn-sheets")]
#[command(author, version, about = "Evaluate RPN spreadsheet formulas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every formula cell in a CSV file and output to stdout or file
    Eval {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Text written for formulas that fail
        #[arg(long, default_value = "#N/A")]
        error_text: String,

        /// Quote fields and double quotes instead of escaping with a backslash
        #[arg(long)]
        no_escape: bool,
    },

    /// Parse a single formula and show how it is read
    Inspect {
        /// RPN formula, e.g. "B1 4 * 1 +"
        formula: String,

        /// Bind a variable, e.g. --var B1=2.5
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
        vars: Vec<(String, f64)>,
    },

    /// List the built-in functions
    Functions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            input,
            output,
            delimiter,
            error_text,
            no_escape,
        } => {
            let delimiter = u8::try_from(delimiter)
                .ok()
                .filter(u8::is_ascii)
                .with_context(|| format!("Delimiter must be a single ASCII character: {:?}", delimiter))?;
            let options = CsvEvalOptions::default()
                .with_delimiter(delimiter)
                .with_error_text(error_text)
                .with_escape(if no_escape { None } else { Some(b'\\') });
            eval(&input, output.as_deref(), options)
        }
        Commands::Inspect { formula, vars } => inspect(&formula, vars),
        Commands::Functions => {
            for name in default_registry().names() {
                println!("{}()", name);
            }
            Ok(())
        }
    }
}

fn eval(input: &Path, output: Option<&Path>, options: CsvEvalOptions) -> Result<()> {
    let evaluator = CsvEvaluator::new(options);

    let stats: EvaluationStats = match output {
        Some(output_path) => {
            let file = File::create(output_path)
                .with_context(|| format!("Failed to create '{}'", output_path.display()))?;
            let stats = evaluator
                .evaluate_file(input, BufWriter::new(file))
                .with_context(|| format!("Failed to evaluate '{}'", input.display()))?;
            eprintln!("Wrote {} rows to '{}'", stats.rows, output_path.display());
            stats
        }
        None => evaluator
            .evaluate_file(input, io::stdout().lock())
            .with_context(|| format!("Failed to evaluate '{}'", input.display()))?,
    };

    eprintln!(
        "Evaluated {} formulas ({} errors)",
        stats.formulas, stats.errors
    );

    Ok(())
}

fn inspect(formula: &str, vars: Vec<(String, f64)>) -> Result<()> {
    let vars: MapVarTable = vars.into_iter().collect();
    let expr = parse(formula).with_context(|| format!("Failed to parse '{}'", formula))?;

    let dependencies: Vec<String> = expr.dependencies().into_iter().collect();

    println!("Infix:        {}", expr.infix_string());
    println!("Postfix:      {}", expr.postfix_string());
    println!("Operations:   {}", expr.op_count());
    println!("Dependencies: {}", dependencies.join(", "));
    println!("Optimized:    {}", expr.optimize(&vars));
    match expr.eval(&vars) {
        Ok(value) => println!("Value:        {}", format_number(value)),
        Err(e) => println!("Value:        {}", e),
    }

    Ok(())
}

/// Parse a `NAME=VALUE` binding
fn parse_binding(s: &str) -> Result<(String, f64)> {
    let Some((name, value)) = s.split_once('=') else {
        bail!("expected NAME=VALUE, got '{}'", s);
    };
    if name.is_empty() {
        bail!("missing variable name in '{}'", s);
    }
    let value = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid number '{}'", value))?;
    Ok((name.to_string(), value))
}
