//! Static asset copying.

use super::{ensure_dir, io_error, SiteResult};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Copies each asset directory into `output_dir/<dir name>`, replacing any
/// earlier copy.
///
/// Missing source directories are skipped with a warning; the remaining
/// directories are still copied. Returns the number of directories copied.
pub fn copy_static_assets(asset_dirs: &[PathBuf], output_dir: &Path) -> SiteResult<usize> {
    ensure_dir(output_dir)?;

    let mut copied = 0;
    for src in asset_dirs {
        if !src.is_dir() {
            warn!(
                "event=asset_copy module=site status=skipped reason=source_missing src={}",
                src.display()
            );
            continue;
        }
        let Some(name) = src.file_name() else {
            continue;
        };
        let dst = output_dir.join(name);
        if dst.exists() {
            std::fs::remove_dir_all(&dst).map_err(io_error(&dst))?;
        }
        copy_dir_all(src, &dst)?;
        info!(
            "event=asset_copy module=site status=ok src={} dst={}",
            src.display(),
            dst.display()
        );
        copied += 1;
    }
    Ok(copied)
}

fn copy_dir_all(src: &Path, dst: &Path) -> SiteResult<()> {
    std::fs::create_dir_all(dst).map_err(io_error(dst))?;
    for entry in std::fs::read_dir(src).map_err(io_error(src))? {
        let entry = entry.map_err(io_error(src))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry.file_type().map_err(io_error(&from))?;
        if file_type.is_dir() {
            copy_dir_all(&from, &to)?;
        } else if file_type.is_file() {
            std::fs::copy(&from, &to).map_err(io_error(&from))?;
        }
    }
    Ok(())
}
