use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway `adb` replacement backed by a shell script
pub struct StubAdb {
    pub dir: TempDir,
    /// Value to use as the adb path
    pub path: String,
}

impl StubAdb {
    /// File next to the script, for stubs that leave traces behind
    #[allow(dead_code)]
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Write `body` as a POSIX shell script and return a stub that runs it.
///
/// The script is run through `sh` rather than exec'd directly, so it never
/// needs the executable bit while another test thread may still hold it open.
pub fn stub_adb(body: &str) -> StubAdb {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("adb");
    let body = body.replace("$DIR", &dir.path().display().to_string());
    std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let path = format!("sh {}", script.display());
    StubAdb { dir, path }
}

/// Stub that prints its own arguments
#[allow(dead_code)]
pub fn echo_adb() -> StubAdb {
    stub_adb(r#"echo "$@""#)
}
