use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_file: String,
    pub reports_dir: String,
    pub session_file: String,
    pub viewer: String,
    pub theme: String,
    pub timezone: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: "demos/book.json".to_string(),
            reports_dir: "reports".to_string(),
            session_file: "config/session.json".to_string(),
            viewer: String::new(),
            theme: "dark".to_string(),
            timezone: "Europe/Rome".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "romana_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the expense book JSON file.
    #[arg(long)]
    data_file: Option<String>,
    /// Override the directory CSV reports are written to.
    #[arg(long)]
    reports_dir: Option<String>,
    /// Override the viewer name shown in the info bar.
    #[arg(long)]
    viewer: Option<String>,
    /// Override the color theme (dark or light).
    #[arg(long)]
    theme: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override the log level filter.
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("ROMANA_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_file) = args.data_file {
        settings.data_file = data_file;
    }
    if let Some(reports_dir) = args.reports_dir {
        settings.reports_dir = reports_dir;
    }
    if let Some(viewer) = args.viewer {
        settings.viewer = viewer;
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_values_layer_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tui.toml");
        std::fs::write(&path, "theme = \"light\"\nlog_level = \"debug\"\n").unwrap();

        let settings: AppConfig = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.theme, "light");
        assert_eq!(settings.log_level, "debug");
        // Everything the file does not mention keeps its default.
        assert_eq!(settings.data_file, AppConfig::default().data_file);
        assert_eq!(settings.timezone, "Europe/Rome");
    }
}
