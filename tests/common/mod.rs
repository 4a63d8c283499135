use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory with landing, bronze and bad_data.
pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();
        for dir in ["landing", "bronze", "bad_data"] {
            fs::create_dir_all(root.join(dir)).expect("create pipeline dir");
        }
        Self { _tmp: tmp, root }
    }

    pub fn dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn land(&self, name: &str, content: &[u8]) {
        fs::write(self.dir("landing").join(name), content).expect("write landing file");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("bronze-ingest");
        cmd.current_dir(&self.root).env_remove("RUST_LOG");
        cmd
    }

    pub fn names(&self, dir: &str) -> Vec<String> {
        names_in(&self.dir(dir))
    }
}

pub fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
