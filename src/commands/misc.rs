//! Miscellaneous commands: config, completions

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

use carscout::cli::{Cli, CompletionShell};
use carscout::config::Config;
use carscout::error::Result;

/// Print the config path and effective settings, or write the defaults
pub fn cmd_config(init: bool) -> Result<()> {
    let path = Config::config_path()?;

    if init {
        Config::default().save()?;
        println!("{} Wrote default config to {}", "✓".green(), path.display());
        return Ok(());
    }

    let config = Config::load()?;
    let status = if path.exists() { "" } else { " (not created, using defaults)" };
    println!("\n{} {}{}\n", "Config:".bold(), path.display(), status.dimmed());
    println!("{}", config.to_toml()?);
    Ok(())
}

/// Generate shell completions
pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "carscout", &mut io::stdout());
    Ok(())
}
