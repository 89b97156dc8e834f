//! rpnsheet - Evaluate a sheet of postfix expressions

mod config;

use anyhow::Context;
use log::warn;
use rpnsheet_core::{EvalOptions, Sheet};
use std::env;
use std::io::Write;
use std::path::PathBuf;

fn print_usage() {
    println!("Usage: rpnsheet [OPTIONS] <FILE>");
    println!();
    println!("Arguments:");
    println!("  <FILE>                    Delimited file of postfix cell expressions");
    println!();
    println!("Options:");
    println!("  -v, --verbose             Include the failure reason in error cells");
    println!("  -o, --output <FILE>       Write results to a file instead of stdout");
    println!("  -d, --delimiter <CHAR>    Field delimiter (default: ,)");
    println!("  -p, --parallel            Evaluate rows in parallel");
    println!("  -c, --config <FILE>       Read settings from this config file");
    println!("  -h, --help                Print help");
}

#[derive(Debug, Default)]
struct Args {
    file_path: Option<PathBuf>,
    output_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    delimiter: Option<char>,
    verbose: bool,
    parallel: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => parsed.help = true,
            "-v" | "--verbose" => parsed.verbose = true,
            "-p" | "--parallel" => parsed.parallel = true,
            "-o" | "--output" => {
                i += 1;
                let value = args.get(i).context("--output requires a file path")?;
                parsed.output_file = Some(PathBuf::from(value));
            }
            "-c" | "--config" => {
                i += 1;
                let value = args.get(i).context("--config requires a file path")?;
                parsed.config_file = Some(PathBuf::from(value));
            }
            "-d" | "--delimiter" => {
                i += 1;
                let value = args.get(i).context("--delimiter requires a value")?;
                let delimiter = config::parse_delimiter(value).map_err(anyhow::Error::msg)?;
                parsed.delimiter = Some(delimiter);
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                anyhow::bail!("Unknown option: {}", arg);
            }
            _ => {
                if parsed.file_path.is_some() {
                    anyhow::bail!("Unexpected argument: {}", args[i]);
                }
                parsed.file_path = Some(PathBuf::from(&args[i]));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

fn run(args: Args) -> anyhow::Result<()> {
    let Some(file_path) = args.file_path else {
        print_usage();
        return Ok(());
    };

    let (config, warnings) = config::load_config(args.config_file.as_ref());
    for warning in warnings {
        warn!("{}", warning);
    }

    let delimiter = args.delimiter.unwrap_or(config.delimiter);
    let options = EvalOptions {
        verbose: args.verbose || config.verbose,
        parallel: args.parallel || config.parallel,
    };

    let sheet = Sheet::load(&file_path, delimiter)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;

    match args.output_file {
        Some(output_path) => sheet
            .save(&output_path, options)
            .with_context(|| format!("Failed to write {}", output_path.display()))?,
        None => {
            let stdout = std::io::stdout();
            let mut out = std::io::BufWriter::new(stdout.lock());
            sheet.write_to(&mut out, options)?;
            out.flush()?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RPNSHEET_LOG", "warn"))
        .init();

    let argv: Vec<String> = env::args().collect();

    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if args.help {
        print_usage();
        return;
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
