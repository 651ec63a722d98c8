// Copyright (C) 2026  ACAI Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! `acai`: install Let's Encrypt certificates into an Acquia Cloud environment.

mod output;
mod progress;

use acai_config::{ConfigLayer, ConfigLoader};
use acai_installer::{
    install_certificate, session, CertificateBundle, InstallError, InstallOptions, InstallReport,
};
use acai_observability::{init_tracing, LogConfig, LogFormat};
use chrono::Local;
use clap::{Parser, ValueEnum};
use progress::ConsoleObserver;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "acai")]
#[command(version, about = "Acquia Cert Automatic Installer")]
#[command(
    long_about = "Installs the Let's Encrypt certificate for a configured environment into Acquia Cloud.

Profiles are read from /etc/acai.conf and ~/.acai.conf (INI, one [section] per
environment). The new certificate is activated before older ones are deactivated."
)]
#[command(after_help = "EXAMPLES:
    # Install and activate today's certificate for the [prod] profile
    acai prod

    # Upload a legacy certificate only (not activated)
    acai --legacy prod

    # Upload normal and legacy copies
    acai --both prod")]
struct Cli {
    /// The server environment to update, as defined in the config file
    #[arg(value_name = "ENVIRONMENT")]
    environment: String,

    /// Install as a legacy certificate
    #[arg(short, long, conflicts_with = "both")]
    legacy: bool,

    /// Install as both a normal and a legacy certificate
    #[arg(short, long)]
    both: bool,

    /// Additional configuration file, read after the standard ones
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding one sub-directory per certificate name
    #[arg(long, value_name = "DIR")]
    le_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Log format (pretty|compact|json)
    #[arg(long, value_name = "FORMAT", default_value = "compact")]
    log_format: LogFormat,

    /// Colored output
    #[arg(long, value_name = "WHEN", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Apply the choice to console styling; returns whether log events on
    /// stderr should carry ANSI colours.
    fn apply(self) -> bool {
        match self {
            ColorChoice::Auto => {}
            ColorChoice::Always | ColorChoice::Never => {
                let enabled = self == ColorChoice::Always;
                console::set_colors_enabled(enabled);
                console::set_colors_enabled_stderr(enabled);
            }
        }
        console::colors_enabled_stderr()
    }
}

impl Cli {
    fn log_config(&self, use_color: bool) -> LogConfig {
        let config = LogConfig::new()
            .with_format(self.log_format)
            .with_color(use_color)
            .with_targets(self.verbose);
        if self.verbose {
            config.with_level("debug")
        } else {
            config
        }
    }

    fn options(&self) -> InstallOptions {
        InstallOptions {
            legacy: self.legacy,
            both: self.both,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let use_color = cli.color.apply();
    init_tracing(&cli.log_config(use_color)).ok();

    let code = match run(&cli).await.and_then(InstallReport::into_result) {
        Ok(report) => {
            debug!(?report, "Run complete");
            0
        }
        Err(e) => {
            output::error(&format!("ERROR: {}", e));
            e.exit_code()
        }
    };

    std::process::exit(code);
}

async fn run(cli: &Cli) -> Result<InstallReport, InstallError> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.push_layer(ConfigLayer::required(path));
    }

    let mut settings = loader.resolve(&cli.environment).await?;
    if let Some(root) = &cli.le_root {
        settings.le_root = root.clone();
    }

    let bundle = CertificateBundle::load(&settings.cert_dir()).await?;

    let observer = ConsoleObserver::new(cli.quiet);
    observer.connecting();
    let client = session::connect(&settings).await?;

    let today = Local::now().date_naive();
    let report = install_certificate(
        &client,
        &settings.profile,
        &bundle,
        cli.options(),
        today,
        &observer,
    )
    .await?;

    observer.finished(&report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_legacy_conflicts_with_both() {
        let result = Cli::try_parse_from(["acai", "--legacy", "--both", "prod"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_options_from_flags() {
        let cli = Cli::try_parse_from(["acai", "-b", "prod"]).expect("valid arguments");
        assert_eq!(cli.options(), InstallOptions { legacy: false, both: true });
        assert_eq!(cli.environment, "prod");

        let cli = Cli::try_parse_from(["acai", "-l", "stage"]).expect("valid arguments");
        assert_eq!(cli.options(), InstallOptions { legacy: true, both: false });
    }

    #[test]
    fn test_color_choice_values() {
        let cli = Cli::try_parse_from(["acai", "--color", "never", "prod"]).expect("valid arguments");
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(Cli::try_parse_from(["acai", "--color", "sometimes", "prod"]).is_err());
    }

    #[test]
    fn test_log_config_follows_flags() {
        let cli = Cli::try_parse_from(["acai", "-v", "--log-format", "json", "prod"])
            .expect("valid arguments");
        let config = cli.log_config(false);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level.as_deref(), Some("debug"));
        assert!(config.include_targets);
        assert!(!config.use_color);

        let cli = Cli::try_parse_from(["acai", "prod"]).expect("valid arguments");
        let config = cli.log_config(true);
        assert_eq!(config.level, None);
        assert!(!config.include_targets);
        assert!(config.use_color);
    }

    #[test]
    fn test_environment_is_required() {
        assert!(Cli::try_parse_from(["acai"]).is_err());
    }
}
