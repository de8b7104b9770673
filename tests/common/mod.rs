#![allow(dead_code)]

use std::ffi::OsStr;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use mrexo_viewer::data::model::Bounds;
use mrexo_viewer::synthetic::{write_result_dir, SyntheticSpec};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A directory under the system temp dir, removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl Deref for ScratchDir {
    type Target = PathBuf;

    fn deref(&self) -> &PathBuf {
        &self.path
    }
}

impl AsRef<Path> for ScratchDir {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl AsRef<OsStr> for ScratchDir {
    fn as_ref(&self) -> &OsStr {
        self.path.as_os_str()
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// A fresh, empty directory.
pub fn scratch_dir(name: &str) -> ScratchDir {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!("mrexo-viewer-{name}-{}-{n}", std::process::id()));
    let _ = std::fs::remove_dir_all(&path);
    std::fs::create_dir_all(&path).unwrap();
    ScratchDir { path }
}

/// Small synthetic result: X in [0, 1], Y in [0, 2] (log10), degree 12,
/// 50 bootstraps.
pub fn small_spec() -> SyntheticSpec {
    SyntheticSpec {
        n_obs: 20,
        n_grid: 30,
        n_boot: 50,
        degree: 12,
        x_bounds: Bounds { min: 0.0, max: 1.0 },
        y_bounds: Bounds { min: 0.0, max: 2.0 },
        slope: 1.5,
        intercept: 0.2,
        ..SyntheticSpec::default()
    }
}

pub fn synthetic_dir(name: &str) -> ScratchDir {
    let dir = scratch_dir(name);
    write_result_dir(&dir, &small_spec()).unwrap();
    dir
}
