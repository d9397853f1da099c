use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tempfile::NamedTempFile;

/// Error unless the file already exists.
pub(crate) fn require_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("File does not exist: {}", path.display());
    }
    if !path.is_file() {
        bail!("Path exists but is not a file: {}", path.display());
    }
    Ok(())
}

/// Reject "-" as an output path; this tool always writes to a real file.
pub(crate) fn assert_not_stdout(path: &Path) -> Result<()> {
    if path == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    Ok(())
}

/// Write-then-rename wrapper for atomic outputs.
pub(crate) struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

/// Open a temporary file next to `target`, creating parent directories as needed.
pub(crate) fn open_for_write(target: &Path, force: bool) -> Result<PendingWrite> {
    assert_not_stdout(target)?;

    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("create dir {}", parent.display()))?;

    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }

    let tmp = NamedTempFile::new_in(parent).context("create temp file")?;
    Ok(PendingWrite { target: target.to_path_buf(), tmp })
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.tmp.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.tmp.flush() }
}

/// Flush and move the temporary file into place.
pub(crate) fn finalize_write(mut pending: PendingWrite) -> Result<()> {
    pending.tmp.flush().context("flush temp file")?;
    pending.tmp.as_file().sync_all().ok(); // best-effort fsync
    pending.tmp.persist(&pending.target)
        .with_context(|| format!("rename to {}", pending.target.display()))?;

    if let Some(dir) = pending.target.parent() {
        let _ = File::open(dir).and_then(|f| f.sync_all());
    }
    Ok(())
}
