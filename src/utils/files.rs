use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::Result;

const TMP_SUFFIX: &str = "tmp";

/// Sibling path used to stage a write, e.g. `slot.json` -> `slot.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Creates `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Replaces `path` with `data`: stages it in [`tmp_path`], syncs, then renames over the target.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/a/slot.json")),
            PathBuf::from("/a/slot.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("/a/slot")), PathBuf::from("/a/slot.tmp"));
    }

    #[test]
    fn write_atomic_creates_parents_and_replaces_contents() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("data.json");

        write_atomic(&target, "[]").unwrap();
        write_atomic(&target, "[1]").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "[1]");
        assert!(!tmp_path(&target).exists());
    }
}
