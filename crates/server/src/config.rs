use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{bail, Context};
use storage::parse_delimiter;
use tracing::warn;

pub const SETTINGS_FILE: &str = "dashboard.toml";
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    SingleColumn,
    TwoColumn,
}

impl FromStr for Layout {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "single" | "single_column" | "single-column" => Ok(Layout::SingleColumn),
            "two" | "two_column" | "two-column" => Ok(Layout::TwoColumn),
            other => bail!("unknown layout '{other}'"),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::SingleColumn => f.write_str("single_column"),
            Layout::TwoColumn => f.write_str("two_column"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub data_path: PathBuf,
    pub delimiter: u8,
    pub layout: Layout,
    pub page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8050".into(),
            data_path: PathBuf::from("data/circuits.csv"),
            delimiter: b',',
            layout: Layout::SingleColumn,
            page_size: 10,
        }
    }
}

/// Defaults, then `dashboard.toml` if present, then the environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    match read_settings_file(Path::new(SETTINGS_FILE)) {
        Ok(Some(raw)) => {
            if let Err(error) = apply_file(&mut settings, &raw) {
                warn!(file = SETTINGS_FILE, %error, "ignoring invalid settings file");
            }
        }
        Ok(None) => {}
        Err(error) => {
            warn!(file = SETTINGS_FILE, %error, "ignoring unreadable settings file");
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// A missing file is `Ok(None)`; any other read or decode failure is an error.
pub fn read_settings_file(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

pub fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let table: toml::Table = toml::from_str(raw).context("invalid TOML")?;

    for (key, value) in &table {
        let value = match value {
            toml::Value::String(text) => text.clone(),
            toml::Value::Integer(number) => number.to_string(),
            other => {
                warn!(key = %key, value = %other, "unsupported settings value");
                continue;
            }
        };
        apply_value(settings, key, &value);
    }

    Ok(())
}

pub fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    const VARS: [(&str, &str); 7] = [
        ("DASHBOARD_BIND", "bind_addr"),
        ("APP__BIND_ADDR", "bind_addr"),
        ("DASHBOARD_DATA", "data_path"),
        ("APP__DATA_PATH", "data_path"),
        ("APP__DELIMITER", "delimiter"),
        ("APP__LAYOUT", "layout"),
        ("APP__PAGE_SIZE", "page_size"),
    ];

    for (var, key) in VARS {
        if let Some(value) = lookup(var) {
            apply_value(settings, key, &value);
        }
    }
}

fn apply_value(settings: &mut Settings, key: &str, value: &str) {
    match key {
        "bind_addr" => settings.server_bind = value.trim().to_string(),
        "data_path" => settings.data_path = PathBuf::from(value.trim()),
        "delimiter" => match parse_delimiter(value) {
            Some(delimiter) => settings.delimiter = delimiter,
            None => warn!(%value, "delimiter must be a single ASCII character"),
        },
        "layout" => match value.parse::<Layout>() {
            Ok(layout) => settings.layout = layout,
            Err(error) => warn!(%error, "keeping layout {}", settings.layout),
        },
        "page_size" => match value.trim().parse::<usize>() {
            Ok(size) => settings.page_size = size.clamp(1, MAX_PAGE_SIZE),
            Err(_) => warn!(%value, "page_size must be a positive integer"),
        },
        other => warn!(key = %other, "unknown settings key"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
