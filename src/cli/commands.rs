use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::media::{MinMax, Outcome};
use crate::stylesheet;

use super::error::CommandError;
use super::output::{
    self, ChangeData, FileData, OutputMode, QueryData, RewriteData, TransformData, VerifyData,
};

#[derive(Parser)]
#[command(name = "media-minmax")]
#[command(about = "Rewrite media query range syntax into min-/max- media features")]
#[command(version)]
pub struct Cli {
    /// Path to config file (overrides MEDIA_MINMAX_CONFIG env var and default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output results as JSON-RPC 2.0
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Suppress all status output on success (errors still go to stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show each rewrite and enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// options that override the config file for one run
#[derive(Args, Debug, Clone, Default)]
pub struct RewriteArgs {
    /// Pattern recognizing custom values, e.g. "/var\(--[a-z-]+\)/i"
    #[arg(long, value_name = "PATTERN")]
    pub custom_value: Option<String>,

    /// Express exclusive custom bounds with calc()
    #[arg(long, conflicts_with = "no_calc")]
    pub use_calc: bool,

    /// Never use calc(), even if the config enables it
    #[arg(long)]
    pub no_calc: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite range syntax in stylesheets (stdin when no files are given)
    Transform {
        /// Stylesheets to rewrite, "-" for stdin
        files: Vec<PathBuf>,

        /// Write the result to this file instead of stdout
        #[arg(short, long, conflicts_with_all = ["in_place", "check"])]
        output: Option<PathBuf>,

        /// Overwrite each input file with its rewritten version
        #[arg(long, conflicts_with = "check")]
        in_place: bool,

        /// Write nothing; fail if any input would be rewritten
        #[arg(long)]
        check: bool,

        #[command(flatten)]
        rewrite: RewriteArgs,
    },

    /// Rewrite a single media query parameter string
    Query {
        /// Media query parameters, e.g. "(500px <= width < 900px)"
        params: String,

        #[command(flatten)]
        rewrite: RewriteArgs,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show configuration file path
    Path,
    /// Show an example configuration
    Default,
    /// Write the example configuration to the config path
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
    /// Verify configuration file for errors
    Verify,
}

/// a stylesheet source
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn from_args(files: &[PathBuf]) -> Vec<Input> {
        if files.is_empty() {
            return vec![Input::Stdin];
        }

        files
            .iter()
            .map(|f| {
                if f.as_os_str() == "-" {
                    Input::Stdin
                } else {
                    Input::File(f.clone())
                }
            })
            .collect()
    }

    fn display(&self) -> String {
        match self {
            Input::Stdin => "-".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String, CommandError> {
        match self {
            Input::Stdin => {
                let mut css = String::new();
                io::stdin()
                    .read_to_string(&mut css)
                    .map_err(|e| CommandError::io(format!("failed to read stdin: {}", e)))?;
                Ok(css)
            }
            Input::File(path) => fs::read_to_string(path).map_err(|e| {
                CommandError::io(format!("failed to read {}: {}", path.display(), e))
            }),
        }
    }
}

pub fn execute(cli: Cli) -> Result<(), CommandError> {
    let config_path = cli.config.as_deref();
    let output_mode = OutputMode::from_flags(cli.json, cli.quiet);

    match cli.command {
        Commands::Transform {
            files,
            output,
            in_place,
            check,
            rewrite,
        } => {
            let engine = build_engine(config_path, &rewrite)?;
            let inputs = Input::from_args(&files);

            if in_place && inputs.iter().any(|i| matches!(i, Input::Stdin)) {
                return Err(CommandError::invalid_args(
                    "--in-place cannot be used with stdin",
                ));
            }
            if output.is_some() && inputs.len() > 1 {
                return Err(CommandError::invalid_args(
                    "--output accepts a single input",
                ));
            }

            let mut reports = Vec::new();

            for input in &inputs {
                let css = input.read()?;
                let processed = stylesheet::process(&css, &engine);
                let name = input.display();

                if cli.verbose {
                    for change in &processed.changes {
                        eprintln!(
                            "{}:{}: @{} {} -> {}",
                            name, change.line, change.name, change.before, change.after
                        );
                    }
                }

                let target = match (input, in_place, &output) {
                    (Input::File(path), true, _) if processed.is_changed() => Some(path.clone()),
                    (_, _, Some(path)) => Some(path.clone()),
                    _ => None,
                };

                let mut report = FileData {
                    path: name,
                    changed: processed.is_changed(),
                    changes: processed.changes.iter().map(ChangeData::from).collect(),
                    written_to: None,
                    css: None,
                };

                if check {
                    // report only
                } else if let Some(path) = target {
                    write_file(&path, &processed.css)?;
                    report.written_to = Some(path.display().to_string());
                } else if !in_place {
                    if output_mode.is_json() {
                        report.css = Some(processed.css);
                    } else {
                        print!("{}", processed.css);
                    }
                }

                reports.push(report);
            }

            let changed_count = reports.iter().filter(|r| r.changed).count();
            let data = TransformData {
                action: "transform",
                check,
                changed: changed_count > 0,
                files: reports,
            };

            if !output_mode.is_json()
                && !output_mode.is_quiet()
                && (check || in_place || output.is_some())
            {
                print_transform_summary(&data.files, check);
            }

            if check && changed_count > 0 {
                let error = CommandError::check_failed(format!(
                    "{} file(s) contain media range syntax",
                    changed_count
                ));
                // one response per call: the report rides along in error.data
                return Err(if output_mode.is_json() {
                    error.with_data(&data)
                } else {
                    error
                });
            }

            if output_mode.is_json() {
                output::print_json(&data);
            }

            Ok(())
        }

        Commands::Query { params, rewrite } => {
            let engine = build_engine(config_path, &rewrite)?;
            let outcome = engine.transform_params(&params);
            let result = outcome.params_or(&params).to_string();

            if cli.verbose {
                for r in outcome.rewrites() {
                    eprintln!("{} -> {}", r.original, r.replacement);
                }
            }

            if output_mode.is_json() {
                output::print_json(&QueryData {
                    action: "query",
                    skipped: matches!(outcome, Outcome::Skipped),
                    rewrites: outcome.rewrites().iter().map(RewriteData::from).collect(),
                    params,
                    result,
                });
            } else if !output_mode.is_quiet() {
                println!("{}", result);
            }

            Ok(())
        }

        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let config = config::load_with_override(config_path)
                    .map_err(|e| CommandError::config(format!("{:#}", e)))?;
                let json =
                    serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
                println!("{}", json);
                Ok(())
            }
            ConfigCommands::Path => {
                let resolved = config::get_config_path_with_override(config_path)?;
                println!("{}", resolved.path.display());
                Ok(())
            }
            ConfigCommands::Default => {
                let json = serde_json::to_string_pretty(&Config::with_examples())
                    .context("Failed to serialize config")?;
                println!("{}", json);
                Ok(())
            }
            ConfigCommands::Init { force } => {
                let resolved = config::get_config_path_with_override(config_path)?;
                if resolved.path.exists() && !force {
                    return Err(CommandError::config(format!(
                        "config file already exists: {} (use --force to overwrite)",
                        resolved.path.display()
                    )));
                }
                config::save(&Config::with_examples(), &resolved.path)?;
                if !output_mode.is_quiet() {
                    println!("Wrote {}", resolved.path.display());
                }
                Ok(())
            }
            ConfigCommands::Verify => {
                let resolved = config::get_config_path_with_override(config_path)?;
                let path = resolved.path;
                let errors = config::verify(&path)
                    .map_err(|e| CommandError::config(format!("{:#}", e)))?;

                if output_mode.is_json() {
                    output::print_json(&VerifyData {
                        action: "verify",
                        path: path.display().to_string(),
                        valid: errors.is_empty(),
                        errors: errors.clone(),
                    });
                } else if errors.is_empty() {
                    if !output_mode.is_quiet() {
                        println!("✓ Configuration is valid: {}", path.display());
                    }
                } else {
                    println!(
                        "✗ Configuration has {} error(s): {}",
                        errors.len(),
                        path.display()
                    );
                    println!();
                    for error in &errors {
                        println!("  - {}", error);
                    }
                }

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(CommandError::config("configuration validation failed"))
                }
            }
        },

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "media-minmax", &mut io::stdout());
            Ok(())
        }
    }
}

/// merge config file and command-line overrides into a compiled rewriter
fn build_engine(config_path: Option<&Path>, args: &RewriteArgs) -> Result<MinMax, CommandError> {
    let mut config = config::load_with_override(config_path)
        .map_err(|e| CommandError::config(format!("{:#}", e)))?;

    apply_overrides(&mut config, args);

    // blame the flag when the pattern came from the command line
    let to_error = |message: String| {
        if args.custom_value.is_some() {
            CommandError::invalid_args(message)
        } else {
            CommandError::config(message)
        }
    };

    let options = config.to_options().map_err(|e| to_error(e.to_string()))?;
    let engine = MinMax::new(options).map_err(|e| to_error(e.to_string()))?;

    log::debug!(
        "custom values: {}, calc: {}",
        engine
            .options()
            .custom_value
            .as_ref()
            .map_or("none", |custom| custom.body()),
        engine.options().use_calc
    );

    Ok(engine)
}

fn apply_overrides(config: &mut Config, args: &RewriteArgs) {
    if let Some(pattern) = &args.custom_value {
        config.custom_value_regexp = Some(pattern.clone());
    }
    if args.use_calc {
        config.use_calc = true;
    }
    if args.no_calc {
        config.use_calc = false;
    }
}

fn write_file(path: &Path, css: &str) -> Result<(), CommandError> {
    fs::write(path, css)
        .map_err(|e| CommandError::io(format!("failed to write {}: {}", path.display(), e)))
}

fn print_transform_summary(reports: &[FileData], check: bool) {
    for report in reports {
        let rules = report.changes.len();
        if !report.changed {
            println!("  {}: no range syntax", report.path);
        } else if check {
            println!("✗ {}: {} rule(s) would be rewritten", report.path, rules);
        } else {
            println!("✓ {}: {} rule(s) rewritten", report.path, rules);
        }
    }
}
