use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_scenario(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// Command isolated from the user's config and environment overrides
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("scenarioflow").unwrap();
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env_remove("SCENARIOFLOW_CONFIG_PATH")
            .env_remove("SCENARIOFLOW_ENVIRONMENT")
            .env_remove("SCENARIOFLOW_SUBSCRIPTION")
            .env_remove("RUST_LOG");
        cmd
    }
}
