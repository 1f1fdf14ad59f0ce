use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    /// An empty regular file inside `root`.
    pub file: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let file = root.join("attributes");
        fs::write(&file, b"").expect("failed to create test file");
        Self {
            _temp_dir: temp_dir,
            root,
            file,
        }
    }

    /// Whether the temp filesystem accepts `user.` attributes (tmpfs and some
    /// container overlays do not).
    pub fn xattrs_supported(&self) -> bool {
        let probe = "user.attrshadow.probe";
        if xattr::set(&self.file, probe, b"1").is_err() {
            return false;
        }
        xattr::remove(&self.file, probe).is_ok()
    }

    /// Write an attribute directly, bypassing the shadow.
    pub fn set_raw(&self, name: &str, value: &[u8]) {
        xattr::set(&self.file, name, value).expect("failed to set raw xattr");
    }
}
