//! Configuration for the worklog command line
//!
//! Report options, optimizer settings (with environment fallbacks) and
//! logging flags, plus the `serve` subcommand for the HTTP surface.

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use worklog_report::ReportKind;

use crate::optimize::{DEFAULT_API_URL, DEFAULT_MODEL, OptimizerConfig};

/// Worklog - daily and weekly work reports from git history
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "worklog")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to printing a report)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Report type: daily or weekly
    #[arg(short = 't', long = "type", default_value_t = ReportKind::Daily)]
    pub kind: ReportKind,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Path to the git repository, defaults to the current directory
    #[arg(short, long, env = "WORKLOG_REPO")]
    pub repo: Option<PathBuf>,

    /// Only include commits by this author
    ///
    /// Defaults to the repository's configured user.name; if none is set,
    /// every author is included.
    #[arg(short, long, env = "WORKLOG_AUTHOR")]
    pub author: Option<String>,

    /// Write the report to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Template file to render the report with
    #[arg(long, env = "WORKLOG_TEMPLATE", global = true)]
    pub template: Option<PathBuf>,

    /// Rewrite the rendered report with the AI optimization service
    #[arg(long, default_value = "false")]
    pub optimize: bool,

    /// Chat-completions endpoint for the optimization service
    #[arg(long, env = "AI_API_URL", global = true)]
    pub api_url: Option<String>,

    /// API key for the optimization service
    #[arg(long, env = "AI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Model for the optimization service
    #[arg(long, env = "AI_MODEL", global = true)]
    pub model: Option<String>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs go to stderr so the report on stdout stays clean.
    #[arg(short, long, default_value = "false", global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false", global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve reports over HTTP
    ///
    /// Example:
    ///   worklog serve --port 8080
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 8080)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
        bind: IpAddr,
    },
}

impl Config {
    /// Get the repository path, using the current directory as default
    #[must_use]
    pub fn repo_path(&self) -> PathBuf {
        self.repo.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the reference date, using today in local time as default
    #[must_use]
    pub fn report_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// The template to render with, if not the built-in default
    #[must_use]
    pub fn template_path(&self) -> Option<&Path> {
        self.template.as_deref()
    }

    /// Optimizer settings, with defaults for anything not given
    #[must_use]
    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            api_url: self
                .api_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key: self.api_key.clone(),
            model: self
                .model
                .clone()
                .filter(|model| !model.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ..OptimizerConfig::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path is given for a report but doesn't exist or isn't a directory
    /// - The template path is given but isn't a file
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command.is_none() {
            let repo = self.repo_path();
            if !repo.exists() {
                return Err(ConfigError::RepositoryNotFound(repo));
            }
            if !repo.is_dir() {
                return Err(ConfigError::RepositoryNotDirectory(repo));
            }
        }

        if let Some(ref template) = self.template
            && !template.is_file()
        {
            return Err(ConfigError::TemplateNotFound(template.clone()));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepositoryNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepositoryNotDirectory(PathBuf),

    /// Template file not found
    #[error("Template file not found: {0}")]
    TemplateNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.command.is_none());
        assert_eq!(config.kind, ReportKind::Daily);
        assert!(config.date.is_none());
        assert!(config.author.is_none());
        assert!(config.output.is_none());
        assert!(!config.optimize);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_repo_path_default() {
        assert_eq!(Config::default().repo_path(), PathBuf::from("."));
    }

    #[test]
    fn test_report_date_default_is_today() {
        assert_eq!(Config::default().report_date(), Local::now().date_naive());
    }

    #[test]
    fn test_optimizer_config_defaults() {
        let config = Config {
            api_url: Some("  ".to_string()),
            ..Default::default()
        }
        .optimizer_config();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_optimizer_config_overrides() {
        let config = Config {
            api_url: Some("http://localhost:9000/v1/chat/completions".to_string()),
            api_key: Some("key".to_string()),
            model: Some("local-model".to_string()),
            ..Default::default()
        }
        .optimizer_config();
        assert_eq!(config.api_url, "http://localhost:9000/v1/chat/completions");
        assert_eq!(config.model, "local-model");
        assert!(config.is_configured());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(Config::default().log_level(), tracing::Level::INFO);
        let verbose = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(verbose.log_level(), tracing::Level::DEBUG);
        let quiet = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(quiet.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_repo() {
        let config = Config {
            repo: Some(PathBuf::from("/nonexistent/path/12345")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RepositoryNotFound(_))
        ));
    }

    #[test]
    fn test_validate_repo_is_file() {
        let file = std::env::temp_dir().join(format!("worklog-config-file-{}", std::process::id()));
        std::fs::write(&file, "not a directory").expect("write file");
        let config = Config {
            repo: Some(file.clone()),
            ..Default::default()
        };
        let result = config.validate();
        let _ = std::fs::remove_file(&file);
        assert!(matches!(result, Err(ConfigError::RepositoryNotDirectory(_))));
    }

    #[test]
    fn test_validate_serve_ignores_repo() {
        let config = Config {
            command: Some(Command::Serve {
                port: 8080,
                bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            }),
            repo: Some(PathBuf::from("/nonexistent/path/12345")),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_template() {
        let config = Config {
            repo: Some(std::env::temp_dir()),
            template: Some(PathBuf::from("/nonexistent/report.j2")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_validate_valid_repo() {
        let config = Config {
            repo: Some(std::env::temp_dir()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
