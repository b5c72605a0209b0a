use std::path::PathBuf;
use std::sync::OnceLock;

/// Workspace root, one level above the calling crate's manifest.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    match manifest_dir.parent() {
        Some(parent) => parent.to_path_buf(),
        None => manifest_dir,
    }
}

pub fn test_output_dir() -> PathBuf {
    static INIT: OnceLock<PathBuf> = OnceLock::new();
    INIT.get_or_init(|| {
        let dir = workspace_root().join("test_output");
        std::fs::create_dir_all(&dir).expect("Failed to create test_output directory");
        dir
    })
    .clone()
}

/// Path of a scratch file under `test_output/`. The directory is created on first use.
pub fn test_output_path(name: &str) -> PathBuf {
    test_output_dir().join(name)
}
