//! Raw persistence capabilities for the save blob.
//!
//! A backend only moves an opaque string in and out; parsing, defaulting and
//! repair all happen in [`crate::game::storage::StateStore`].

use fs2::FileExt;
use std::cell::RefCell;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::game::errors::GameError;

pub trait SaveBackend {
    /// Fetch the stored blob, `None` when nothing has been saved yet.
    fn read_raw(&self) -> Result<Option<String>, GameError>;
    fn write_raw(&self, raw: &str) -> Result<(), GameError>;
    fn clear(&self) -> Result<(), GameError>;
}

impl<B: SaveBackend + ?Sized> SaveBackend for Box<B> {
    fn read_raw(&self) -> Result<Option<String>, GameError> {
        (**self).read_raw()
    }

    fn write_raw(&self, raw: &str) -> Result<(), GameError> {
        (**self).write_raw(raw)
    }

    fn clear(&self) -> Result<(), GameError> {
        (**self).clear()
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Process-local backend. Clones share the same slot, so a test can keep a
/// handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(raw: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(raw.to_string()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SaveBackend for MemoryBackend {
    fn read_raw(&self) -> Result<Option<String>, GameError> {
        Ok(self.slot.borrow().clone())
    }

    fn write_raw(&self, raw: &str) -> Result<(), GameError> {
        *self.slot.borrow_mut() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), GameError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

// ============================================================================
// JSON file
// ============================================================================

/// Single JSON save file. Writes go to a temp file that is renamed over the
/// target while an exclusive lock on a sidecar `.lock` file is held, so a
/// reader never observes a half-written save.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub const DEFAULT_FILE_NAME: &'static str = "save.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for `<data_dir>/save.json`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(Self::DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    fn lock(&self) -> Result<File, GameError> {
        fs::create_dir_all(self.dir())?;
        let base = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(Self::DEFAULT_FILE_NAME);
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(self.dir().join(format!(".{}.lock", base)))?;
        lock_file.lock_exclusive()?;
        Ok(lock_file)
    }

    fn write_temp(&self, content: &str) -> Result<PathBuf, GameError> {
        let base = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(Self::DEFAULT_FILE_NAME);
        let mut counter = 0u32;
        loop {
            let cand = self
                .dir()
                .join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
            match OpenOptions::new().write(true).create_new(true).open(&cand) {
                Ok(mut tmp) => {
                    tmp.write_all(content.as_bytes())?;
                    tmp.flush()?;
                    tmp.sync_all()?;
                    return Ok(cand);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    counter = counter.saturating_add(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl SaveBackend for JsonFileBackend {
    fn read_raw(&self) -> Result<Option<String>, GameError> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_raw(&self, raw: &str) -> Result<(), GameError> {
        let lock = self.lock()?;
        let tmp = self.write_temp(raw)?;
        let renamed = fs::rename(&tmp, &self.path);
        if renamed.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        let _ = lock.unlock();
        renamed?;
        Ok(())
    }

    fn clear(&self) -> Result<(), GameError> {
        let lock = self.lock()?;
        let removed = match fs::remove_file(&self.path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        };
        let _ = lock.unlock();
        removed?;
        Ok(())
    }
}

// ============================================================================
// Sled
// ============================================================================

const TREE_SAVES: &str = "saves";
const SAVE_KEY: &[u8] = b"player";

/// Sled-backed save slot for hosts that already keep a sled database.
pub struct SledBackend {
    _db: sled::Db,
    saves: sled::Tree,
}

impl SledBackend {
    /// Open (or create) the sled database rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let path_ref = path.as_ref();
        fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let saves = db.open_tree(TREE_SAVES)?;
        Ok(Self { _db: db, saves })
    }
}

impl SaveBackend for SledBackend {
    fn read_raw(&self) -> Result<Option<String>, GameError> {
        let Some(bytes) = self.saves.get(SAVE_KEY)? else {
            return Ok(None);
        };
        Ok(Some(std::str::from_utf8(&bytes)?.to_string()))
    }

    fn write_raw(&self, raw: &str) -> Result<(), GameError> {
        self.saves.insert(SAVE_KEY, raw.as_bytes())?;
        self.saves.flush()?;
        Ok(())
    }

    fn clear(&self) -> Result<(), GameError> {
        self.saves.remove(SAVE_KEY)?;
        self.saves.flush()?;
        Ok(())
    }
}
