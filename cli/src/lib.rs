use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use wound::{AssessmentRecord, CareRecommendation, EngineConfig, PatientAnswers};

#[derive(Error, Debug)]
pub enum WoundCliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Configuration for the command line tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct WoundCliConfig {
    /// Directory that receives JSON results
    pub output_dir: String,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Engine thresholds and weights
    pub engine: EngineConfig,
}

impl Default for WoundCliConfig {
    fn default() -> Self {
        Self {
            output_dir: "wound_output".to_string(),
            pretty: true,
            engine: EngineConfig::default(),
        }
    }
}

impl WoundCliConfig {
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, WoundCliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, WoundCliError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, WoundCliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, WoundCliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WoundCliError> {
        let path_ref = path.as_ref();
        match extension(path_ref) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(WoundCliError::UnsupportedFileFormat),
        }
    }

    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WoundCliError> {
        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, WoundCliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Path of an output file inside `output_dir`, creating the directory if needed
    pub fn output_path(&self, file_name: &str) -> Result<PathBuf, WoundCliError> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(Path::new(&self.output_dir).join(file_name))
    }

    pub fn to_output_json<T: Serialize>(&self, value: &T) -> Result<String, WoundCliError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

/// Assessment plus the care instructions derived from it
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WoundReport {
    pub assessment: AssessmentRecord,
    pub recommendations: Vec<CareRecommendation>,
}

/// Load any serde value from a `.toml` or `.json` file
pub fn load_document<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, WoundCliError> {
    let path_ref = path.as_ref();
    match extension(path_ref) {
        Some("toml") => Ok(toml::from_str(&fs::read_to_string(path_ref)?)?),
        Some("json") => Ok(serde_json::from_str(&fs::read_to_string(path_ref)?)?),
        _ => Err(WoundCliError::UnsupportedFileFormat),
    }
}

pub fn load_assessment<P: AsRef<Path>>(path: P) -> Result<AssessmentRecord, WoundCliError> {
    load_document(path)
}

/// Load patient answers, or the neutral defaults when no file is given
pub fn load_answers(path: Option<&Path>) -> Result<PatientAnswers, WoundCliError> {
    match path {
        Some(path) => load_document(path),
        None => Ok(PatientAnswers::default()),
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wound::PainLevel;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = WoundCliConfig::from_toml(
            r#"
            output_dir = "scans"

            [engine.comparison]
            trend_threshold = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, "scans");
        assert!(config.pretty);
        assert_eq!(config.engine.comparison.trend_threshold, 5.0);
        assert_eq!(config.engine.comparison.expected_daily_improvement, 3.0);
        assert_eq!(config.engine.confidence.cap, 95);
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let config = WoundCliConfig::default();
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        config.to_toml_file(file.path()).unwrap();

        let loaded = WoundCliConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            WoundCliConfig::from_file(file.path()),
            Err(WoundCliError::UnsupportedFileFormat)
        ));
    }

    #[test]
    fn test_load_answers_from_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "painLevel": "severe", "fever": true }}"#).unwrap();

        let answers = load_answers(Some(file.path())).unwrap();
        assert_eq!(answers.pain_level, PainLevel::Severe);
        assert!(answers.fever);
        assert!(answers.dressing_changed);

        assert_eq!(load_answers(None).unwrap(), PatientAnswers::default());
    }

    #[test]
    fn test_load_assessment_written_as_json() {
        let record = AssessmentRecord::default_analysis();
        let mut file: NamedTempFile = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(serde_json::to_string(&record).unwrap().as_bytes()).unwrap();

        let loaded = load_assessment(file.path()).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_compact_output() {
        let config = WoundCliConfig { pretty: false, ..Default::default() };
        let json = config.to_output_json(&PatientAnswers::default()).unwrap();
        assert!(!json.contains('\n'));
    }
}
