use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{
    core::{
        errors::CostError,
        utils::{ensure_dir, PathResolver},
    },
    domain::{garage::CURRENT_SCHEMA_VERSION, Garage},
};

use super::{Result, StorageBackend};

const GARAGE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";
const MAX_BACKUP_SUFFIX: u32 = 999;
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Stores each garage as a pretty-printed JSON file with rotated backups.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    garages_dir: PathBuf,
    backups_dir: PathBuf,
    state_file: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        ensure_dir(&app_root)?;
        let garages_dir = PathResolver::garage_dir_in(&app_root);
        let backups_dir = PathResolver::backup_dir_in(&app_root);
        ensure_dir(&garages_dir)?;
        ensure_dir(&backups_dir)?;
        let state_file = PathResolver::state_file_in(&app_root);
        Ok(Self {
            root: app_root,
            garages_dir,
            backups_dir,
            state_file,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    /// Storage rooted at the resolved data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn garage_path(&self, name: &str) -> PathBuf {
        self.garages_dir
            .join(format!("{}.{}", canonical_name(name), GARAGE_EXTENSION))
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    pub fn backup_path(&self, name: &str, backup_name: &str) -> PathBuf {
        self.backup_dir(name).join(backup_name)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn last_garage(&self) -> Result<Option<String>> {
        Ok(self.read_state()?.last_garage)
    }

    pub fn record_last_garage(&self, name: Option<&str>) -> Result<()> {
        let mut state = self.read_state()?;
        state.last_garage = name.map(canonical_name);
        let data = serde_json::to_string_pretty(&state)?;
        replace_atomic(&self.state_file, &data)
    }

    /// Loads the named garage, or an empty one when it has never been saved.
    pub fn load_or_default(&self, name: &str) -> Result<Garage> {
        if self.exists(name) {
            self.load(name)
        } else {
            Ok(Garage::new(name))
        }
    }

    fn read_state(&self) -> Result<StoreState> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }

    fn write_backup_file(&self, garage: &Garage, name: &str, note: Option<&str>) -> Result<String> {
        let json = serde_json::to_string_pretty(garage)?;
        let (file_name, mut file) = self.create_backup_file(name, note)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        self.prune_backups(name)?;
        Ok(file_name)
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<String> {
        let data = fs::read(path)?;
        let (file_name, mut file) = self.create_backup_file(name, None)?;
        file.write_all(&data)?;
        file.flush()?;
        self.prune_backups(name)?;
        Ok(file_name)
    }

    /// Claims a backup name no earlier backup holds. Names that collide on
    /// the timestamp get a zero-padded counter so they still sort newest first.
    fn create_backup_file(&self, name: &str, note: Option<&str>) -> Result<(String, File)> {
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let stem = format!("{}_{}", canonical_name(name), backup_timestamp());
        let label = sanitize_backup_note(note);
        for attempt in 0..=MAX_BACKUP_SUFFIX {
            let mut file_stem = stem.clone();
            if attempt > 0 {
                file_stem.push_str(&format!("_{attempt:03}"));
            }
            if let Some(label) = &label {
                file_stem.push('_');
                file_stem.push_str(label);
            }
            let file_name = format!("{}.{}", file_stem, GARAGE_EXTENSION);
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(dir.join(&file_name))
            {
                Ok(file) => return Ok((file_name, file)),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(CostError::StorageError(format!(
            "no free backup name left for `{stem}`"
        )))
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let backups = self.list_backups(name)?;
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backup_path(name, entry));
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, garage: &Garage, name: &str) -> Result<()> {
        let path = self.garage_path(name);
        if path.exists() {
            self.backup_existing_file(name, &path)?;
        }
        save_garage_to_path(garage, &path)?;
        tracing::debug!(path = %path.display(), "saved garage");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Garage> {
        let path = self.garage_path(name);
        if !path.exists() {
            return Err(CostError::StorageError(format!(
                "garage `{}` not found",
                name
            )));
        }
        load_garage_from_path(&path)
    }

    fn exists(&self, name: &str) -> bool {
        self.garage_path(name).exists()
    }

    fn list_garages(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.garages_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(GARAGE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(GARAGE_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|file| file.to_str()) {
                entries.push(file_name.to_string());
            }
        }
        entries.sort_by(|a, b| {
            parse_backup_timestamp(b)
                .cmp(&parse_backup_timestamp(a))
                .then_with(|| b.cmp(a))
        });
        Ok(entries)
    }

    fn backup(&self, garage: &Garage, name: &str, note: Option<&str>) -> Result<String> {
        self.write_backup_file(garage, name, note)
    }

    fn restore(&self, name: &str, backup_name: &str) -> Result<Garage> {
        if !is_plain_file_name(backup_name) {
            return Err(CostError::StorageError(format!(
                "`{}` is not a backup file name",
                backup_name
            )));
        }
        let backup_path = self.backup_path(name, backup_name);
        if !backup_path.is_file() {
            return Err(CostError::StorageError(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        let garage = load_garage_from_path(&backup_path)?;
        let path = self.garage_path(name);
        if path.exists() {
            self.backup_existing_file(name, &path)?;
        }
        save_garage_to_path(&garage, &path)?;
        tracing::info!(garage = name, backup = backup_name, "restored garage");
        Ok(garage)
    }
}

pub fn save_garage_to_path(garage: &Garage, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(garage)?;
    replace_atomic(path, &json)
}

pub fn load_garage_from_path(path: &Path) -> Result<Garage> {
    let data = fs::read_to_string(path)?;
    let garage: Garage = serde_json::from_str(&data)?;
    if garage.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(CostError::StorageError(format!(
            "`{}` was written by a newer schema version ({})",
            path.display(),
            garage.schema_version
        )));
    }
    Ok(garage)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    last_garage: Option<String>,
}

fn backup_timestamp() -> String {
    Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string()
}

/// File-system-safe form of a garage name, used for file stems and state.
pub fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "garage".into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.' | '_'))
            && !sanitized.is_empty()
            && !sanitized.ends_with('-')
        {
            sanitized.push('-');
        }
    }
    let trimmed = sanitized.trim_matches('-');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Extracts the `YYYYMMDD_HHMMSS[_micros]` stamp that follows the garage name.
fn parse_backup_timestamp(file_name: &str) -> Option<DateTime<Utc>> {
    let stem = file_name.strip_suffix(&format!(".{}", GARAGE_EXTENSION))?;
    let parts: Vec<&str> = stem.split('_').collect();
    (1..parts.len()).rev().find_map(|idx| {
        let (date, time) = (parts[idx - 1], parts[idx]);
        if !is_digits(date, 8) || !is_digits(time, 6) {
            return None;
        }
        let naive = NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M%S").ok()?;
        let micros = parts
            .get(idx + 1)
            .copied()
            .filter(|part| is_digits(part, 6))
            .and_then(|part| part.parse::<i64>().ok())
            .unwrap_or(0);
        Some(DateTime::from_naive_utc_and_offset(naive, Utc) + Duration::microseconds(micros))
    })
}

fn is_plain_file_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty()
        && path.file_name().and_then(|file| file.to_str()) == Some(name)
        && !name.contains(['/', '\\'])
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` beside `path` and renames it into place.
pub(crate) fn replace_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = tmp_path(path);
    write_file(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
