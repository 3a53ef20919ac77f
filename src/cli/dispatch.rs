// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::Read;
use std::path::Path;

use console::style;

use crate::config::LintConfig;
use crate::error::{CkError, Result, ResultExt, ValidationError};
use crate::rules::RuleEngine;

use super::args::{CheckArgs, Cli, Commands, ConfigPreset, InitArgs, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // Dispatch to the appropriate command handler
    match cli.effective_command() {
        Commands::Check(args) => run_check(&cli, &load_config(&cli)?, args),
        Commands::Rules => run_rules(&cli, &load_config(&cli)?),
        Commands::Version => run_version(),
        Commands::Init(args) => run_init(args),
    }
}

/// Load configuration from --config or the default locations.
fn load_config(cli: &Cli) -> Result<LintConfig> {
    let config = if let Some(config_path) = &cli.config {
        LintConfig::load_from(config_path)?
    } else {
        LintConfig::load()?
    };

    if !config.output.color {
        console::set_colors_enabled(false);
    }

    Ok(config)
}

/// Run the check command.
fn run_check(cli: &Cli, config: &LintConfig, args: CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let raw = match (&args.message, &args.file) {
        (Some(message), _) => message.clone(),
        (None, Some(path)) if path.as_path() != Path::new("-") => {
            std::fs::read_to_string(path).context(format!("read {}", path.display()))?
        }
        (None, _) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin")?;
            buf
        }
    };

    let engine = RuleEngine::from_config(config)?;
    let result = engine.validate_str(&raw)?;

    result.print(cli.format);

    let errors = result.errors().count();
    let warnings = result.warnings().count();

    if result.has_errors() || (args.strict && result.has_warnings()) {
        Err(CkError::Validation(ValidationError::Failed { errors, warnings }))
    } else {
        Ok(())
    }
}

/// Run the rules command.
fn run_rules(cli: &Cli, config: &LintConfig) -> Result<()> {
    let engine = RuleEngine::from_config(config)?;

    if cli.format == Some(OutputFormat::Json) {
        let rules: Vec<_> = engine
            .rules()
            .iter()
            .map(|rule| {
                serde_json::json!({
                    "name": rule.name,
                    "severity": rule.severity,
                    "kind": rule.kind.name(),
                    "field": rule.kind.field().map(|f| f.as_str()),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&rules).unwrap_or_default()
        );
        return Ok(());
    }

    for rule in engine.rules() {
        let field = rule.kind.field().map(|f| f.as_str()).unwrap_or("-");
        println!(
            "{:<24} {:<8} {:<18} {}",
            rule.name,
            rule.severity.to_string(),
            rule.kind.name(),
            style(field).dim()
        );
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("cklint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::{example_config, minimal_config};

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new("cklint.toml");

    if config_path.exists() && !args.force {
        return Err(CkError::WithContext {
            context: "init".to_string(),
            message: "Configuration file already exists. Use --force to overwrite.".to_string(),
        });
    }

    let config_content = match args.preset {
        Some(ConfigPreset::Minimal) => minimal_config(),
        Some(ConfigPreset::Conventional) | None => example_config(),
    };

    std::fs::write(config_path, config_content).context("init")?;

    println!("✓ Created cklint.toml");

    Ok(())
}
