use eyre::{Error, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "tracker.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub repl: ReplConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("postgres:///project-tracker"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    pub prompt: String,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: String::from("HBA Database> "),
        }
    }
}

impl Config {
    pub fn load(file_name: &Path) -> Result<Config, Error> {
        let content = fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot load configuration file {}", file_name.display()))?;
        Self::parse(&content)
            .wrap_err_with(|| format!("cannot parse configuration file {}", file_name.display()))
    }

    /// Load the given configuration file, or the default one if it exists.
    pub fn load_or_default(file_name: Option<&Path>) -> Result<Config, Error> {
        match file_name {
            Some(file_name) => Self::load(file_name),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Config::default()),
        }
    }

    fn parse(content: &str) -> Result<Config, Error> {
        Ok(toml::from_str(content)?)
    }
}

#[test]
fn test_parse() {
    let config = Config::parse(
        r#"
[database]
url = "sqlite://grades.db"
"#,
    )
    .unwrap();
    assert_eq!(config.database.url, "sqlite://grades.db");
    assert_eq!(config.repl.prompt, "HBA Database> ");
    let config = Config::parse("[repl]\nprompt = \"> \"\n").unwrap();
    assert_eq!(config.database.url, "postgres:///project-tracker");
    assert_eq!(config.repl.prompt, "> ");
    assert!(Config::parse("[database]\nurl = 3\n").is_err());
}

#[test]
fn test_missing_file() {
    assert!(Config::load(Path::new("/nonexistent/tracker.toml")).is_err());
    assert!(Config::load_or_default(Some(Path::new("/nonexistent/tracker.toml"))).is_err());
}
