use cfglang_core::{compiler, json, ParseOptions, ProjectConfig};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::{fs, io};
use std::path::Path;
use std::process::ExitCode;

const PROJECT_FILE: &str = "cfglang.toml";

#[derive(Parser)]
#[command(name = "cfglang")]
#[command(about = "Configuration language to JSON converter", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Converts a configuration file and prints it as JSON
    Convert {
        /// Path of the configuration file
        file: String,

        /// Fail on references to undeclared constants
        #[arg(long)]
        strict: bool,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Parses a configuration file without printing it
    Check {
        file: String,

        #[arg(long)]
        strict: bool,
    },
}

fn load_config() -> Result<ProjectConfig, String> {
    match fs::read_to_string(PROJECT_FILE) {
        Ok(content) => {
            info!("using {}", PROJECT_FILE);
            ProjectConfig::from_toml_str(&content).map_err(|e| format!("{}: {}", PROJECT_FILE, e))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no {} found, using defaults", PROJECT_FILE);
            Ok(ProjectConfig::default())
        }
        Err(e) => Err(format!("cannot read {}: {}", PROJECT_FILE, e)),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = load_config().and_then(|config| match &cli.command {
        Commands::Convert { file, strict, compact } => {
            let options = ParseOptions { strict: *strict || config.parse.strict };
            let pretty = config.output.pretty && !*compact;
            convert(file, &options, pretty)
        }
        Commands::Check { file, strict } => {
            let options = ParseOptions { strict: *strict || config.parse.strict };
            check(file, &options)
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn read_source(filename: &str) -> Result<String, String> {
    info!("reading {}", filename);
    fs::read_to_string(Path::new(filename)).map_err(|e| format!("cannot read {}: {}", filename, e))
}

fn convert(filename: &str, options: &ParseOptions, pretty: bool) -> Result<(), String> {
    let content = read_source(filename)?;
    let value = compiler::compile(&content, options).map_err(|e| format!("{}: {}", filename, e))?;
    let text = json::to_json_string(&value, pretty)?;
    println!("{}", text);
    Ok(())
}

fn check(filename: &str, options: &ParseOptions) -> Result<(), String> {
    let content = read_source(filename)?;
    compiler::compile(&content, options).map_err(|e| format!("{}: {}", filename, e))?;
    println!("ok");
    Ok(())
}
