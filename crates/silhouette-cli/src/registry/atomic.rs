use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{RegistryError, RegistryResult};

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let data = serde_json::to_vec_pretty(value)?;
    write_bytes_atomic(path, &data)
}

/// Write through a sibling temp file and rename it into place.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> RegistryResult<()> {
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    std::fs::rename(&tmp_path, path)?;
    if let Some(parent) = parent {
        sync_dir(parent)?;
    }

    Ok(())
}

fn temp_path(path: &Path) -> RegistryResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| RegistryError::InvalidPath(path.display().to_string()))?;
    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn writes_create_parents_and_leave_no_temp_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("silhouettes").join("silhouette_01.svg");

        write_bytes_atomic(&path, b"<svg/>").expect("write");
        write_bytes_atomic(&path, b"<svg></svg>").expect("overwrite");

        assert_eq!(std::fs::read(&path).expect("read"), b"<svg></svg>");
        assert!(!path.with_file_name(".silhouette_01.svg.tmp").exists());
    }

    #[test]
    fn json_is_pretty_printed() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("stats.json");
        write_json_atomic(&path, &serde_json::json!({ "valid": 10 })).expect("write");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "{\n  \"valid\": 10\n}"
        );
    }

    #[test]
    fn bare_root_is_an_invalid_path() {
        assert!(matches!(
            write_bytes_atomic(Path::new("/"), b""),
            Err(RegistryError::InvalidPath(_))
        ));
    }
}
