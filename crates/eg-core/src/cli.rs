//! Command-line surface for the `envguard` binary.
//!
//! Provides `check`, `presets list|show` and `schema`.

use crate::composer::EnvOptions;
use crate::exit_codes::ExitCode;
use crate::presets::{get_preset, list_presets, PresetInfo, PresetName};
use crate::Env;
use clap::{Args, Parser, Subcommand, ValueEnum};
use eg_common::{EnvError, OutputFormat, Result, SCHEMA_VERSION};
use eg_config::{declaration_json_schema, SchemaDeclaration};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate process environment variables against a declared schema.
#[derive(Parser, Debug)]
#[command(name = "envguard", version, about)]
pub struct Cli {
    /// Output format for command results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Log line format on stderr (filter with RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Log rendering for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the current process environment
    Check(CheckArgs),
    /// Inspect hosting platform presets
    Presets(PresetsArgs),
    /// Print the JSON Schema of the declaration file format
    Schema,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Declaration file (.toml or .json)
    #[arg(long, env = "ENVGUARD_SCHEMA", value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Validate in client context (only client and shared variables)
    #[arg(long)]
    pub client: bool,

    /// Fold a platform preset into the result (repeatable)
    #[arg(long = "extend", value_name = "PRESET")]
    pub extend: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PresetsArgs {
    #[command(subcommand)]
    pub command: PresetsCommands,
}

#[derive(Subcommand, Debug)]
pub enum PresetsCommands {
    /// List every known preset
    List,
    /// Show the variables a preset declares
    Show {
        /// Preset name, e.g. vercel or fly-io
        name: String,
    },
}

/// Declaration files looked up when `--schema` is not given, in order.
pub fn default_schema_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("envguard.toml"), PathBuf::from("envguard.json")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("envguard").join("schema.toml"));
    }
    candidates
}

/// An explicit path is returned as-is, even if missing, so the read error
/// surfaces. Otherwise the first existing default candidate.
pub fn resolve_schema_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    default_schema_candidates()
        .into_iter()
        .find(|candidate| candidate.is_file())
}

pub fn run(cli: &Cli) -> ExitCode {
    match &cli.command {
        Commands::Check(args) => run_check(cli.format, args),
        Commands::Presets(args) => match &args.command {
            PresetsCommands::List => run_presets_list(cli.format),
            PresetsCommands::Show { name } => run_presets_show(cli.format, name),
        },
        Commands::Schema => run_schema(),
    }
}

fn envelope(command: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut map = serde_json::Map::new();
    map.insert("schema_version".into(), SCHEMA_VERSION.into());
    map.insert(
        "generated_at".into(),
        chrono::Utc::now().to_rfc3339().into(),
    );
    map.insert("command".into(), command.into());
    map
}

fn print_json(map: serde_json::Map<String, serde_json::Value>) {
    println!("{:#}", serde_json::Value::Object(map));
}

/// Compose without the default reporter; the CLI renders the report itself.
fn compose(declaration: &SchemaDeclaration, presets: &[PresetName], is_server: bool) -> Result<Env> {
    let extensions = presets
        .iter()
        .map(|preset| preset.build())
        .collect::<Result<Vec<_>>>()?;
    EnvOptions::from_declaration(declaration)?
        .extends(extensions)
        .is_server(is_server)
        .on_validation_error(|report| Err(EnvError::InvalidEnvironment(report.clone())))
        .create()
}

fn run_check(format: OutputFormat, args: &CheckArgs) -> ExitCode {
    let Some(path) = resolve_schema_path(args.schema.as_deref()) else {
        eprintln!(
            "No schema declaration found. Pass --schema, set ENVGUARD_SCHEMA, or create envguard.toml"
        );
        return ExitCode::ConfigError;
    };

    let declaration = match SchemaDeclaration::from_path(&path) {
        Ok(declaration) => declaration,
        Err(e) => {
            eprintln!("Failed to load {}: {}", path.display(), e);
            return ExitCode::for_error(&e);
        }
    };

    let mut presets = Vec::with_capacity(args.extend.len());
    for name in &args.extend {
        match get_preset(name) {
            Ok(preset) => presets.push(preset),
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::ConfigError;
            }
        }
    }

    let is_server = !args.client;
    debug!(path = %path.display(), is_server, presets = presets.len(), "running check");

    match compose(&declaration, &presets, is_server) {
        Ok(env) => {
            let context = env
                .context()
                .map(|c| c.to_string())
                .unwrap_or_default();
            match format {
                OutputFormat::Json => {
                    let mut output = envelope("check");
                    output.insert("schema".into(), path.display().to_string().into());
                    output.insert("context".into(), context.into());
                    output.insert("valid".into(), true.into());
                    output.insert("variables".into(), env.names().collect::<Vec<_>>().into());
                    output.insert("count".into(), env.len().into());
                    print_json(output);
                }
                OutputFormat::Plain => {
                    println!(
                        "✅ Environment valid: {} variables ({} context)",
                        env.len(),
                        context
                    );
                }
            }
            ExitCode::Clean
        }
        Err(EnvError::InvalidEnvironment(report)) => {
            match format {
                OutputFormat::Json => {
                    let mut output = envelope("check");
                    output.insert("schema".into(), path.display().to_string().into());
                    output.insert("valid".into(), false.into());
                    output.insert(
                        "errors".into(),
                        serde_json::to_value(&report).unwrap_or_default(),
                    );
                    print_json(output);
                }
                OutputFormat::Plain => {
                    eprintln!("❌ Invalid environment variables:");
                    eprintln!("{}", report);
                }
            }
            ExitCode::InvalidEnvironment
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::for_error(&e)
        }
    }
}

fn run_presets_list(format: OutputFormat) -> ExitCode {
    let presets = list_presets();
    match format {
        OutputFormat::Json => {
            let mut output = envelope("presets list");
            output.insert("count".into(), presets.len().into());
            output.insert(
                "presets".into(),
                serde_json::to_value(&presets).unwrap_or_default(),
            );
            print_json(output);
        }
        OutputFormat::Plain => {
            println!("# Presets ({} total)", presets.len());
            println!();
            for info in &presets {
                println!(
                    "  {:<16} {:>2} vars  {}",
                    info.name.as_str(),
                    info.variables.len(),
                    info.description
                );
            }
        }
    }
    ExitCode::Clean
}

fn run_presets_show(format: OutputFormat, name: &str) -> ExitCode {
    let info = match get_preset(name) {
        Ok(preset) => PresetInfo::from(preset),
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::ConfigError;
        }
    };
    match format {
        OutputFormat::Json => {
            let mut output = envelope("presets show");
            output.insert(
                "preset".into(),
                serde_json::to_value(&info).unwrap_or_default(),
            );
            print_json(output);
        }
        OutputFormat::Plain => {
            println!("# Preset: {}", info.name);
            println!();
            println!("  {}", info.description);
            println!();
            for variable in info.variables {
                println!("  {}  string, optional", variable);
            }
        }
    }
    ExitCode::Clean
}

fn run_schema() -> ExitCode {
    match declaration_json_schema() {
        Ok(schema) => {
            println!("{:#}", schema);
            ExitCode::Clean
        }
        Err(e) => {
            eprintln!("Failed to generate schema: {}", e);
            ExitCode::for_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_with_repeated_presets() {
        let cli = Cli::try_parse_from([
            "envguard", "--format", "json", "check", "--client", "--extend", "vercel", "--extend",
            "neon-vercel",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Check(args) => {
                assert!(args.client);
                assert_eq!(args.extend, vec!["vercel", "neon-vercel"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn explicit_schema_path_wins_even_if_missing() {
        let path = Path::new("/definitely/not/here.toml");
        assert_eq!(resolve_schema_path(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn default_candidates_start_in_working_directory() {
        let candidates = default_schema_candidates();
        assert_eq!(candidates[0], PathBuf::from("envguard.toml"));
        assert_eq!(candidates[1], PathBuf::from("envguard.json"));
    }
}
