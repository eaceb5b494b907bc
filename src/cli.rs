use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::listing::{Condition, Fuel, Gearbox};
use crate::search::{parse_window, ToleranceConfig};

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Parser)]
#[command(name = "carscout")]
#[command(author, version, about = "Extract, search and compare used-car listings", long_about = None)]
#[command(after_help = r#"Examples:
  carscout analyze "https://www.olx.ro/d/oferta/bmw-x5-IDa1b2.html"      Extract a listing
  carscout compare REF_URL CANDIDATE_URL...                              Rank candidates
  carscout inspect saved-listing.html --json                             Run offline on a saved page
  carscout config --init                                                 Write the default config
"#)]
pub struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a listing and print the matching market search URL
    #[command(after_help = r#"Examples:
  carscout analyze "https://www.olx.ro/d/oferta/bmw-x5-IDa1b2.html"
  carscout analyze URL --years 3 --km 50000
  carscout analyze URL --fuel diesel --fuel hybrid --gearbox automatic
  carscout analyze URL --json
"#)]
    Analyze {
        /// Listing URL
        url: String,

        #[command(flatten)]
        tolerances: ToleranceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score candidate listings against a reference listing
    #[command(after_help = r#"Examples:
  carscout compare REF_URL CAND_URL_1 CAND_URL_2
  carscout compare REF_URL CAND_URL --json
"#)]
    Compare {
        /// Reference listing URL
        reference: String,

        /// Candidate listing URLs
        #[arg(required = true)]
        candidates: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run extraction on a saved HTML page (no network)
    #[command(after_help = r#"Examples:
  carscout inspect listing.html
  carscout inspect listing.html --url "https://www.olx.ro/d/oferta/audi-a6-IDx9.html"
"#)]
    Inspect {
        /// Path to the HTML document
        file: String,

        /// URL the page was saved from (used by slug strategies)
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        tolerances: ToleranceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the config path and effective settings
    Config {
        /// Write the default config file, replacing any existing one
        #[arg(long)]
        init: bool,
    },

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  carscout completions bash > ~/.local/share/bash-completion/completions/carscout
  carscout completions zsh > ~/.zfunc/_carscout
  carscout completions fish > ~/.config/fish/completions/carscout.fish
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

/// Window override: a width, or `off` to drop the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowArg(pub Option<u32>);

impl FromStr for WindowArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_window(s).map(WindowArg)
    }
}

/// Per-run overrides of the configured tolerance windows
#[derive(Args, Debug, Clone, Default)]
pub struct ToleranceArgs {
    /// Year window (±), or "off"
    #[arg(long)]
    pub years: Option<WindowArg>,

    /// Mileage window in km (±), or "off"
    #[arg(long)]
    pub km: Option<WindowArg>,

    /// Power window in hp (±), or "off"
    #[arg(long)]
    pub power: Option<WindowArg>,

    /// Engine size band lower bound in cc, or "off"
    #[arg(long)]
    pub engine_min: Option<WindowArg>,

    /// Engine size band upper bound in cc, or "off"
    #[arg(long)]
    pub engine_max: Option<WindowArg>,

    /// Accepted fuel (repeatable): diesel, petrol, lpg, hybrid, electric
    #[arg(long = "fuel")]
    pub fuels: Vec<Fuel>,

    /// Accepted gearbox (repeatable): manual, automatic
    #[arg(long = "gearbox")]
    pub gearboxes: Vec<Gearbox>,

    /// Accepted condition (repeatable): new, used
    #[arg(long = "condition")]
    pub conditions: Vec<Condition>,
}

impl ToleranceArgs {
    /// Layer the flags that were given over `base`
    pub fn apply(&self, base: &ToleranceConfig) -> ToleranceConfig {
        let mut merged = base.clone();
        let windows = [
            (self.years, &mut merged.years),
            (self.km, &mut merged.km),
            (self.power, &mut merged.power),
            (self.engine_min, &mut merged.engine_min),
            (self.engine_max, &mut merged.engine_max),
        ];
        for (arg, slot) in windows {
            if let Some(WindowArg(width)) = arg {
                *slot = width;
            }
        }
        if !self.fuels.is_empty() {
            merged.fuels = self.fuels.clone();
        }
        if !self.gearboxes.is_empty() {
            merged.gearboxes = self.gearboxes.clone();
        }
        if !self.conditions.is_empty() {
            merged.conditions = self.conditions.clone();
        }
        merged
    }
}
