#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use filetime::FileTime;

/// Build pack catalog checked into `tests/fixtures/packs`
pub fn packs_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/packs")
}

/// Writes `content` to `root/rel`, creating parent directories
pub fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("path has a parent")).expect("create parent");
    fs::write(&path, content).expect("write file");
    path
}

pub fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap_or_else(|e| panic!("read {}: {}", rel, e))
}

/// Backdates the mtime of `path` so a later rewrite is visible even on
/// filesystems with coarse timestamps
pub fn backdate(path: &Path) -> FileTime {
    let past = SystemTime::now() - Duration::from_secs(3600);
    let time = FileTime::from_system_time(past);
    filetime::set_file_mtime(path, time).expect("set mtime");
    time
}

pub fn mtime(path: &Path) -> FileTime {
    FileTime::from_last_modification_time(&fs::metadata(path).expect("metadata"))
}

/// Every file under `root` as (relative path, content), sorted
pub fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files: Vec<_> = walkdir::WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).expect("under root").to_path_buf();
            let data = fs::read(e.path()).expect("read file");
            (rel, data)
        })
        .collect();
    files.sort();
    files
}

/// Path to the compiled `jx-project` binary
pub fn jx_project_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_jx-project"))
}
