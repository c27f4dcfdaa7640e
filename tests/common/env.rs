//! Isolated application roots for viewcache tests.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{Duration, Instant};

use tempfile::TempDir;

use viewcache::domain::path::normalize_event_path;

/// Result of running the viewcache CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for TestResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Application root in a temp directory, plus a separate config home
pub struct TestEnv {
    pub root: TempDir,
    config_home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
            config_home: TempDir::new().unwrap(),
        }
    }

    /// Builder-style `write_view`
    pub fn with_view(self, relative: &str, content: &str) -> Self {
        self.write_view(relative, content);
        self
    }

    /// Write (or overwrite) a view below the root
    pub fn write_view(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn remove_view(&self, relative: &str) {
        fs::remove_file(self.path(relative)).unwrap();
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Cache key the watcher produces for `relative`
    pub fn key(&self, relative: &str) -> String {
        normalize_event_path(&self.path(relative))
    }

    /// Command for the viewcache binary rooted at this environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_viewcache"));
        cmd.current_dir(self.root.path())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env("HOME", self.config_home.path())
            .env_remove("VIEWCACHE_ROOT")
            .env_remove("VIEWCACHE_SUFFIX")
            .env_remove("VIEWCACHE_WATCH")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run the CLI with `args`, waiting for it to exit
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.command().args(args).output().unwrap().into()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll `condition` until it holds or `timeout` passes
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(25));
    }
    condition()
}

/// Timeout for watcher-driven assertions
pub const WATCH_TIMEOUT: Duration = Duration::from_secs(10);

