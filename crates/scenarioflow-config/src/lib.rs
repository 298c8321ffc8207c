pub mod engine;
pub mod error;

pub use engine::EngineConfig;
pub use error::*;

use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "scenarioflow";
const GLOBAL_CONFIG_FILE: &str = "config.yaml";
const CONFIG_PATH_ENV: &str = "SCENARIOFLOW_CONFIG_PATH";
const PROJECT_DIR_NAME: &str = ".scenarioflow";
const CANDIDATES: [&str; 4] = [
    "scenarioflow.local.yaml",
    ".scenarioflow.local.yaml",
    "scenarioflow.yaml",
    ".scenarioflow.yaml",
];

/// `<platform config dir>/scenarioflow`, created on first use
pub fn get_config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .map(|base| base.join(CONFIG_DIR_NAME))
        .ok_or(ConfigError::ConfigDirNotFound)?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Find the engine config file
///
/// Search order:
/// 1. `SCENARIOFLOW_CONFIG_PATH` (direct path)
/// 2. Current directory: scenarioflow.local.yaml, .scenarioflow.local.yaml, scenarioflow.yaml, .scenarioflow.yaml
/// 3. `./.scenarioflow/` with the same names
/// 4. `~/.config/scenarioflow/config.yaml`
pub fn find_config_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!("{} points to a missing file: {}", CONFIG_PATH_ENV, path.display());
    }

    let current_dir = std::env::current_dir()?;
    let global = dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(GLOBAL_CONFIG_FILE));

    first_candidate(&current_dir)
        .or_else(|| first_candidate(&current_dir.join(PROJECT_DIR_NAME)))
        .or_else(|| global.filter(|path| path.is_file()))
        .ok_or(ConfigError::ConfigFileNotFound)
}

/// First of the candidate file names that exists in `dir`
fn first_candidate(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load the engine config, falling back to defaults when no file exists
pub fn load_config() -> Result<EngineConfig> {
    match find_config_file() {
        Ok(path) => load_config_from(&path),
        Err(ConfigError::ConfigFileNotFound) => {
            tracing::debug!("No config file found, using defaults");
            Ok(EngineConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// Load the engine config from a specific file
pub fn load_config_from(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(EngineConfig::default());
    }

    let config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn test_get_config_dir() {
        let result = get_config_dir();
        assert!(result.is_ok());

        let config_dir = result.unwrap();
        assert!(config_dir.ends_with("scenarioflow"));
        assert!(config_dir.exists());
    }

    #[test]
    #[serial]
    fn test_find_config_file_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        fs::write(temp_dir.path().join("scenarioflow.yaml"), "verbose: true").unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let result = find_config_file();

        std::env::set_current_dir(original_dir).unwrap();
        assert!(result.unwrap().ends_with("scenarioflow.yaml"));
    }

    #[test]
    #[serial]
    fn test_find_config_file_local_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        fs::write(temp_dir.path().join("scenarioflow.yaml"), "").unwrap();
        fs::write(temp_dir.path().join(".scenarioflow.local.yaml"), "").unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let result = find_config_file();

        std::env::set_current_dir(original_dir).unwrap();
        assert!(result.unwrap().ends_with(".scenarioflow.local.yaml"));
    }

    #[test]
    #[serial]
    fn test_find_config_file_in_project_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        let project_dir = temp_dir.path().join(".scenarioflow");
        fs::create_dir(&project_dir).unwrap();
        fs::write(project_dir.join("scenarioflow.yaml"), "").unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let result = find_config_file();

        std::env::set_current_dir(original_dir).unwrap();
        assert!(result.unwrap().ends_with(".scenarioflow/scenarioflow.yaml"));
    }

    #[test]
    fn test_first_candidate_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(first_candidate(temp_dir.path()).is_none());

        // Directories that happen to carry a candidate name are not config files
        fs::create_dir(temp_dir.path().join("scenarioflow.local.yaml")).unwrap();
        fs::write(temp_dir.path().join(".scenarioflow.yaml"), "").unwrap();
        fs::write(temp_dir.path().join("scenarioflow.yaml"), "").unwrap();

        let found = first_candidate(temp_dir.path()).unwrap();
        assert_eq!(found, temp_dir.path().join("scenarioflow.yaml"));
    }

    #[test]
    #[serial]
    fn test_find_config_file_current_dir_beats_project_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        let project_dir = temp_dir.path().join(".scenarioflow");
        fs::create_dir(&project_dir).unwrap();
        fs::write(project_dir.join("scenarioflow.local.yaml"), "").unwrap();
        fs::write(temp_dir.path().join(".scenarioflow.yaml"), "").unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let result = find_config_file();

        std::env::set_current_dir(original_dir).unwrap();
        let found = result.unwrap();
        assert!(found.ends_with(".scenarioflow.yaml"));
        assert!(!found.parent().unwrap().ends_with(".scenarioflow"));
    }

    #[test]
    #[serial]
    fn test_find_config_file_env_var() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("custom.yaml");
        fs::write(&config_path, "shell: sh").unwrap();

        temp_env::with_var(CONFIG_PATH_ENV, Some(&config_path), || {
            assert_eq!(find_config_file().unwrap(), config_path);

            let config = load_config().unwrap();
            assert_eq!(config.shell, "sh");
        });
    }

    #[test]
    #[serial]
    fn test_load_config_defaults_without_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let result = temp_env::with_vars(
            [
                (CONFIG_PATH_ENV, None::<&str>),
                ("XDG_CONFIG_HOME", Some(temp_dir.path().to_str().unwrap())),
            ],
            load_config,
        );

        std::env::set_current_dir(original_dir).unwrap();
        assert_eq!(result.unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("scenarioflow.yaml");
        fs::write(
            &path,
            r#"
subscription: 00000000-0000-0000-0000-000000000000
environment: azure
capture_environment: false
variables:
  LOCATION: eastus
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(
            config.subscription.as_deref(),
            Some("00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(config.environment, "azure");
        assert!(!config.capture_environment);
        assert_eq!(config.shell, "bash");
        assert_eq!(config.variables.get("LOCATION").unwrap(), "eastus");
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("scenarioflow.yaml");
        fs::write(&path, "verbose: [not, a, bool]").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
