use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use h2h_core::season::{DEFAULT_QUARTERS, DEFAULT_SEASON_ROUNDS};
use h2h_core::{RoundRange, SeasonPlan, SeasonPlanError};
use serde::Deserialize;
use tracing::info;

// ─── File Config ──────────────────────────────────────────────────────────────

/// Contents of `config.toml`. Every section is optional and falls back to the
/// bundled defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub season: SeasonConfig,
    pub api: ApiConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeasonConfig {
    pub rounds: usize,
    /// Inclusive `[start, end]` round indices, 0-based
    pub quarters: Vec<[usize; 2]>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub login_url: String,
    pub api_base: String,
    pub app: String,
    pub redirect_uri: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub file_prefix: String,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_SEASON_ROUNDS,
            quarters: DEFAULT_QUARTERS.iter().map(|q| [q.start, q.end]).collect(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            login_url: "https://users.premierleague.com/accounts/login/".into(),
            api_base: "https://fantasy.premierleague.com/api".into(),
            app: "plfpl-web".into(),
            redirect_uri: "https://fantasy.premierleague.com/".into(),
            timeout_secs: 30,
            user_agent: "h2h-standings/0.1".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file_prefix: "q".into(),
        }
    }
}

impl SeasonConfig {
    pub fn plan(&self) -> Result<SeasonPlan, SeasonPlanError> {
        let quarters = self
            .quarters
            .iter()
            .map(|&[start, end]| RoundRange::new(start, end))
            .collect();
        SeasonPlan::new(self.rounds, quarters)
    }
}

impl FileConfig {
    /// Load config from `path`. A missing file means defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).with_context(|| format!("invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No {} found, using default config", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

// ─── Credentials ──────────────────────────────────────────────────────────────

pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        let bundled = FileConfig::parse(include_str!("../config.toml")).unwrap();
        assert_eq!(bundled, FileConfig::default());
        assert_eq!(bundled.season.plan().unwrap(), SeasonPlan::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let cfg = FileConfig::parse(
            r#"
            [output]
            dir = "site/data"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.output.dir, PathBuf::from("site/data"));
        assert_eq!(cfg.output.file_prefix, "q");
        assert_eq!(cfg.season, SeasonConfig::default());
        assert_eq!(cfg.api, ApiConfig::default());
    }

    #[test]
    fn short_season_plan() {
        let cfg = FileConfig::parse(
            r#"
            [season]
            rounds = 8
            quarters = [[0, 1], [2, 3], [4, 5], [6, 7]]
            "#,
        )
        .unwrap();
        let plan = cfg.season.plan().unwrap();
        assert_eq!(plan.rounds(), 8);
        assert_eq!(plan.quarters()[3], RoundRange::new(6, 7));
    }

    #[test]
    fn overlapping_quarters_are_rejected() {
        let cfg = FileConfig::parse(
            r#"
            [season]
            rounds = 38
            quarters = [[0, 9], [9, 18], [19, 28], [29, 37]]
            "#,
        )
        .unwrap();
        assert!(matches!(cfg.season.plan(), Err(SeasonPlanError::NotContiguous { quarter: 2, .. })));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = FileConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[season]\nrounds = \"many\"\n").unwrap();
        assert!(FileConfig::load(&path).is_err());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials { username: "me@example.com".into(), password: "hunter2".into() };
        let shown = format!("{creds:?}");
        assert!(shown.contains("me@example.com"));
        assert!(!shown.contains("hunter2"));
    }
}
