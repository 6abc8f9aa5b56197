use std::fs;
use std::path::{Path, PathBuf};
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use glob::{glob, Pattern};
use log::{debug, warn};
use crate::errors::BackupError;

const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const STAMP_LEN: usize = 14;

/// Where to keep copies of replaced profile files and for how long
#[derive(Clone, Debug)]
pub struct BackupSettings {
    pub dir: PathBuf,
    pub retention: TimeDelta,
}

/// Writes the contents to a temporary sibling of the target and then renames it over the target,
/// so that the target is either fully replaced or left untouched
///
/// # Arguments
///
/// * 'path' - the file to replace
/// * 'contents' - the new file contents
pub fn replace_file(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    Ok(())
}

/// Copies the current version of a file into the backup directory, stamped with the given time.
/// Returns the path of the copy, or None if there was no file to copy.
///
/// # Arguments
///
/// * 'settings' - backup directory and retention
/// * 'file' - the file about to be replaced
/// * 'now' - the time to stamp the copy with
pub fn backup_file(settings: &BackupSettings, file: &Path, now: DateTime<Utc>) -> Result<Option<PathBuf>, BackupError> {
    if !file.exists() {
        return Ok(None);
    }

    let file_name = file_name(file)?;
    fs::create_dir_all(&settings.dir)?;
    let backup_path = settings.dir.join(format!("{}_{}", now.format(STAMP_FORMAT), file_name));
    fs::copy(file, &backup_path)?;
    debug!("backed up {} to {}", file.display(), backup_path.display());

    Ok(Some(backup_path))
}

/// Removes backup copies of a file that are older than the retention time.
/// Returns the number of removed copies.
///
/// # Arguments
///
/// * 'settings' - backup directory and retention
/// * 'file' - the file whose copies to prune
/// * 'now' - the time to measure the age of copies from
pub fn prune_backups(settings: &BackupSettings, file: &Path, now: DateTime<Utc>) -> Result<usize, BackupError> {
    let file_name = file_name(file)?;
    let dir = settings.dir.to_str().ok_or("illegal character in backup dir")?;
    let pattern = format!("{}/{}_{}", Pattern::escape(dir.trim_end_matches('/')), "?".repeat(STAMP_LEN), Pattern::escape(file_name));

    let mut removed = 0;
    for entry in glob(&pattern)? {
        match entry {
            Ok(path) => {
                let Some(stamp) = path.file_name().and_then(|n| n.to_str()).and_then(|n| n.get(0..STAMP_LEN)) else {
                    continue;
                };
                let Ok(stamp) = NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT) else {
                    debug!("skipping {}, not a backup copy", path.display());
                    continue;
                };
                if now - stamp.and_utc() > settings.retention {
                    fs::remove_file(&path)?;
                    removed += 1;
                }
            }
            Err(e) => warn!("{:?}", e),
        }
    }

    Ok(removed)
}

fn file_name(file: &Path) -> Result<&str, BackupError> {
    Ok(file.file_name()
        .ok_or("profiles file has no file name")?
        .to_str()
        .ok_or("illegal character in profiles file name")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn settings(dir: &Path) -> BackupSettings {
        BackupSettings { dir: dir.join("backup"), retention: TimeDelta::hours(48) }
    }

    #[test]
    fn test_replace_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("vehicles.toml");

        replace_file(&path, "first").unwrap();
        replace_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_dir.path().join("vehicles.toml.tmp").exists());
    }

    #[test]
    fn test_backup_file() {
        let temp_dir = tempdir().unwrap();
        let settings = settings(temp_dir.path());
        let path = temp_dir.path().join("vehicles.toml");
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();

        assert!(backup_file(&settings, &path, now).unwrap().is_none());

        fs::write(&path, "ElectricVehicle = []\n").unwrap();
        let backup_path = backup_file(&settings, &path, now).unwrap().unwrap();

        assert_eq!(backup_path, settings.dir.join("20261019083000_vehicles.toml"));
        assert_eq!(fs::read_to_string(backup_path).unwrap(), "ElectricVehicle = []\n");
    }

    #[test]
    fn test_prune_backups() {
        let temp_dir = tempdir().unwrap();
        let settings = settings(temp_dir.path());
        let path = temp_dir.path().join("vehicles.toml");
        fs::create_dir_all(&settings.dir).unwrap();

        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let old = settings.dir.join("20261016120000_vehicles.toml");
        let recent = settings.dir.join("20261018120000_vehicles.toml");
        let unrelated = settings.dir.join("notes_vehicles.toml");
        let other_file = settings.dir.join("20261001120000_chargers.toml");
        let similar_name = settings.dir.join("20261001120000_old_vehicles.toml");
        for p in [&old, &recent, &unrelated, &other_file, &similar_name] {
            fs::write(p, "").unwrap();
        }

        assert_eq!(prune_backups(&settings, &path, now).unwrap(), 1);
        assert!(!old.exists());
        assert!(recent.exists());
        assert!(unrelated.exists());
        assert!(other_file.exists());
        assert!(similar_name.exists());
    }
}
