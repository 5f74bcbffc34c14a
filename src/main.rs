//! Pixelworks CLI - apply filters and edits to image files.

use anyhow::{anyhow, bail, Context, Result};
use pixelworks::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("pixelworks");

    if args.len() < 2 {
        print_usage(program);
        return ExitCode::FAILURE;
    }

    let result = match args[1].as_str() {
        "list" => list_filters(args.iter().skip(2).any(|a| a == "--json")),
        "info" => match args.get(2) {
            Some(name) => filter_info(name),
            None => Err(anyhow!("Please specify a filter name")),
        },
        "process" => {
            if args.len() < 4 {
                eprintln!("Usage: {} process <input> <output> [options]", program);
                return ExitCode::FAILURE;
            }
            parse_process_args(&args[2..]).and_then(|plan| run(&plan))
        }
        "help" | "--help" | "-h" => {
            print_usage(program);
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(program);
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    println!("🎨 Pixelworks v{}", pixelworks::VERSION);
    println!();
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  list [--json]                 List filters in menu order");
    println!("  info <filter>                 Show details about a filter");
    println!("  process <in> <out> [options]  Edit an image and save the result");
    println!("  help                          Show this help message");
    println!();
    println!("Process options (applied in the order given):");
    println!("  --filter <name>     Apply a filter by name or id (repeatable)");
    println!("  --rotate-left       Rotate 90° counter-clockwise");
    println!("  --rotate-right      Rotate 90° clockwise");
    println!("  --crop <x,y,w,h>    Crop to a rectangle");
    println!("  --config <file>     Load settings from a TOML file");
    println!("  --sequential        Do not process rows in parallel");
}

fn list_filters(json: bool) -> Result<()> {
    let registry = FilterRegistry::with_builtins();

    if json {
        println!("{}", serde_json::to_string_pretty(&registry.descriptors())?);
        return Ok(());
    }

    println!("Available filters ({} total):", registry.len());
    for filter in registry.filters() {
        println!("  • {} ({})", filter.name(), filter.id());
    }
    Ok(())
}

fn filter_info(name: &str) -> Result<()> {
    let registry = FilterRegistry::with_builtins();
    let filter = registry
        .require(name)
        .with_context(|| "Use 'list' to see available filters.")?;

    println!("Filter: {}", filter.name());
    println!("ID: {}", filter.id());
    println!("Kind: {}", filter.kind().tag());
    Ok(())
}

/// One edit requested on the command line.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Filter(String),
    RotateLeft,
    RotateRight,
    Crop(CropRect),
}

/// Everything `process` was asked to do.
#[derive(Debug, Clone, PartialEq)]
struct ProcessPlan {
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    sequential: bool,
    steps: Vec<Step>,
}

fn parse_process_args(args: &[String]) -> Result<ProcessPlan> {
    let (input, output) = match args {
        [input, output, ..] => (PathBuf::from(input), PathBuf::from(output)),
        _ => bail!("Please specify input and output paths"),
    };

    let mut plan = ProcessPlan {
        input,
        output,
        config: None,
        sequential: false,
        steps: Vec::new(),
    };

    let mut i = 2;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--filter", Some(name)) => {
                plan.steps.push(Step::Filter(name.clone()));
                i += 2;
            }
            ("--crop", Some(rect)) => {
                let rect = CropRect::parse(rect)
                    .ok_or_else(|| anyhow!("Invalid crop '{}', expected x,y,w,h", rect))?;
                plan.steps.push(Step::Crop(rect));
                i += 2;
            }
            ("--config", Some(path)) => {
                plan.config = Some(PathBuf::from(path));
                i += 2;
            }
            ("--rotate-left", _) => {
                plan.steps.push(Step::RotateLeft);
                i += 1;
            }
            ("--rotate-right", _) => {
                plan.steps.push(Step::RotateRight);
                i += 1;
            }
            ("--sequential", _) => {
                plan.sequential = true;
                i += 1;
            }
            (option, _) => bail!("Unknown or incomplete option: {}", option),
        }
    }

    Ok(plan)
}

fn run(plan: &ProcessPlan) -> Result<()> {
    let mut config = match &plan.config {
        Some(path) => EditorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    if plan.sequential {
        config = config.with_parallel(false);
    }

    let mut session = EditSession::new(config);
    session
        .open(&plan.input)
        .with_context(|| format!("Failed to open {}", plan.input.display()))?;

    println!(
        "⚙️  Processing {} -> {}",
        plan.input.display(),
        plan.output.display()
    );
    for step in &plan.steps {
        println!("   • {:?}", step);
        match step {
            Step::Filter(name) => session.apply_filter(name)?,
            Step::RotateLeft => session.rotate_left()?,
            Step::RotateRight => session.rotate_right()?,
            Step::Crop(rect) => session.crop(*rect)?,
        }
    }

    session
        .save(&plan.output)
        .with_context(|| format!("Failed to save {}", plan.output.display()))?;
    println!("🎉 Image saved to: {}", plan.output.display());
    Ok(())
}
