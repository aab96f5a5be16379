use crate::core::ConfigProvider;
use crate::core::round::{MAX_PAR, MIN_PAR};
use crate::domain::model::{TeeBox, DEFAULT_PARS, HOLES_PER_ROUND};
use crate::utils::error::{Result, ScorecardError};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_DATA_DIR: &str = "./rounds";

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is static"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    pub course: Option<CourseConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    pub pars: Option<Vec<u8>>,
    pub tee_box: Option<TeeBox>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScorecardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScorecardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.as_ref().map(|l| l.format).unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn default_pars(&self) -> Vec<u8> {
        self.course
            .as_ref()
            .and_then(|c| c.pars.clone())
            .unwrap_or_else(|| DEFAULT_PARS.to_vec())
    }

    fn default_tee_box(&self) -> TeeBox {
        self.course
            .as_ref()
            .and_then(|c| c.tee_box)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;

        if let Some(pars) = self.course.as_ref().and_then(|c| c.pars.as_ref()) {
            if pars.len() != usize::from(HOLES_PER_ROUND) {
                return Err(ScorecardError::InvalidConfigValueError {
                    field: "course.pars".to_string(),
                    value: format!("{} entries", pars.len()),
                    reason: format!("Expected one par per hole ({})", HOLES_PER_ROUND),
                });
            }
            for (index, par) in pars.iter().enumerate() {
                validate_range(&format!("course.pars[{}]", index), *par, MIN_PAR, MAX_PAR)?;
            }
        }

        if let Some(level) = self.log_level() {
            validate_non_empty_string("logging.level", level)?;
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.to_lowercase().as_str()) {
                return Err(ScorecardError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
data_dir = "./my-rounds"

[course]
pars = [4, 5, 3, 4, 4, 3, 4, 5, 4, 4, 4, 3, 5, 4, 4, 3, 5, 4]
tee_box = "Back"

[logging]
level = "debug"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_dir(), "./my-rounds");
        assert_eq!(config.default_pars()[1], 5);
        assert_eq!(config.default_tee_box(), TeeBox::Back);
        assert_eq!(config.log_level(), Some("debug"));
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.data_dir(), DEFAULT_DATA_DIR);
        assert_eq!(config.default_pars(), DEFAULT_PARS.to_vec());
        assert_eq!(config.default_tee_box(), TeeBox::Middle);
        assert_eq!(config.log_format(), LogFormat::Compact);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GOLF_SCORECARD_TEST_DIR", "/tmp/golf");

        let toml_content = r#"
[storage]
data_dir = "${GOLF_SCORECARD_TEST_DIR}/rounds"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.storage.data_dir, "/tmp/golf/rounds");

        std::env::remove_var("GOLF_SCORECARD_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let bad_pars = r#"
[course]
pars = [4, 4, 3]
"#;
        let config = TomlConfig::from_toml_str(bad_pars).unwrap();
        assert!(config.validate().is_err());

        let bad_level = r#"
[logging]
level = "loud"
"#;
        let config = TomlConfig::from_toml_str(bad_level).unwrap();
        assert!(config.validate().is_err());

        let bad_tee = r#"
[course]
tee_box = "Purple"
"#;
        assert!(TomlConfig::from_toml_str(bad_tee).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_dir = \"./from-file\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data_dir(), "./from-file");
    }
}
