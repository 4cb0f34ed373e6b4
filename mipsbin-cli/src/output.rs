use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use anyhow::anyhow;
use tracing::debug;

/// Picks `explicit` or, failing that, `input` with its extension replaced. Either way the result
/// must not be the input itself.
pub fn output_path(
    input: &Path,
    explicit: Option<PathBuf>,
    extension: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let out = explicit.unwrap_or_else(|| input.with_extension(extension));
    if out == input {
        Err(anyhow!("output path {} would overwrite input", out.display()))?;
    }
    Ok(out)
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn staging_path(path: &Path) -> PathBuf {
    sibling(path, ".partial")
}

fn backup_path(path: &Path) -> PathBuf {
    sibling(path, ".orig")
}

/// An output renamed into place, along with where its previous contents were moved.
struct Moved<'a> {
    path: &'a Path,
    backup: Option<PathBuf>,
}

/// Puts back whatever `moved` replaced and removes every staged file. Errors are ignored, the
/// failure that triggered the rollback is what gets reported.
fn roll_back(moved: Vec<Moved<'_>>, staged: &[PathBuf]) {
    for tmp in staged {
        let _ = fs::remove_file(tmp);
    }
    for Moved { path, backup } in moved.into_iter().rev() {
        let _ = backup.map_or_else(|| fs::remove_file(path), |backup| fs::rename(backup, path));
    }
}

/// Writes every output next to its destination, then renames them all into place. Nothing is
/// renamed unless every write succeeded, and if any rename fails the outputs already moved are
/// rolled back to their previous contents.
pub fn commit(outputs: &[(PathBuf, Vec<u8>)]) -> Result<(), Box<dyn Error>> {
    let mut staged = Vec::with_capacity(outputs.len());

    for (path, bytes) in outputs {
        let tmp = staging_path(path);
        debug!(path = %tmp.display(), len = bytes.len(), "staging output");
        if let Err(e) = fs::write(&tmp, bytes) {
            staged.push(tmp);
            roll_back(Vec::new(), &staged);
            return Err(anyhow!("failed to write {}: {}", path.display(), e).into());
        }
        staged.push(tmp);
    }

    let mut moved = Vec::with_capacity(outputs.len());
    for (i, (path, _)) in outputs.iter().enumerate() {
        let mut backup = None;
        if path.is_file() {
            let aside = backup_path(path);
            if let Err(e) = fs::rename(path, &aside) {
                roll_back(moved, &staged[i..]);
                return Err(anyhow!("failed to move aside {}: {}", path.display(), e).into());
            }
            backup = Some(aside);
        }

        if let Err(e) = fs::rename(&staged[i], path) {
            if let Some(aside) = backup {
                let _ = fs::rename(aside, path);
            }
            roll_back(moved, &staged[i..]);
            return Err(anyhow!("failed to move output into {}: {}", path.display(), e).into());
        }
        debug!(path = %path.display(), "wrote output");
        moved.push(Moved {
            path: path.as_path(),
            backup,
        });
    }

    for Moved { backup, .. } in moved {
        if let Some(backup) = backup {
            fs::remove_file(&backup)
                .map_err(|e| anyhow!("failed to remove {}: {}", backup.display(), e))?;
        }
    }

    Ok(())
}
