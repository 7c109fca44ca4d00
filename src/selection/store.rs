//! Per-user watchlist persistence
//!
//! Each user's watchlist is a JSON array of catalog ids stored under the key
//! `watchlist_<username>`. The file store maps that key onto one file in the
//! platform data directory:
//! - macOS: ~/Library/Application Support/cosmicwatch/watchlists/
//! - Linux: ~/.local/share/cosmicwatch/watchlists/
//! - Windows: %APPDATA%\cosmicwatch\data\watchlists\

use anyhow::Context;
use bevy::prelude::*;
use directories::ProjectDirs;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Storage seam for watchlists. Writes are whole-set replacements.
pub trait WatchlistRepository {
    /// Returns an empty set when nothing has been stored for `user`.
    fn load(&self, user: &str) -> anyhow::Result<BTreeSet<String>>;
    fn save(&self, user: &str, ids: &BTreeSet<String>) -> anyhow::Result<()>;
}

pub fn storage_key(user: &str) -> String {
    format!("watchlist_{}", user)
}

/// JSON files on disk, one per user.
pub struct FileWatchlistStore {
    data_dir: PathBuf,
}

impl FileWatchlistStore {
    pub fn new() -> anyhow::Result<Self> {
        let proj_dirs = ProjectDirs::from("", "", "cosmicwatch")
            .ok_or_else(|| anyhow::anyhow!("Failed to resolve data directory"))?;
        Self::new_in_dir(proj_dirs.data_dir().join("watchlists"))
    }

    /// Store rooted at a specific directory (tests, portable setups).
    pub fn new_in_dir(data_dir: PathBuf) -> anyhow::Result<Self> {
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("creating {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    fn path_for(&self, user: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.json", file_stem(&storage_key(user))))
    }
}

/// Keeps ASCII alphanumerics, `-` and `_`; everything else becomes `%XX` per
/// UTF-8 byte so distinct usernames never share a file.
fn file_stem(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

impl WatchlistRepository for FileWatchlistStore {
    fn load(&self, user: &str) -> anyhow::Result<BTreeSet<String>> {
        let path = self.path_for(user);
        if !path.exists() {
            return Ok(BTreeSet::new());
        }
        let contents = fs::read_to_string(&path)?;
        let ids: BTreeSet<String> = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(ids)
    }

    fn save(&self, user: &str, ids: &BTreeSet<String>) -> anyhow::Result<()> {
        let path = self.path_for(user);
        let contents = serde_json::to_string(ids)?;
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

/// Process-local store, used when no data directory is available and in tests.
#[derive(Default)]
pub struct MemoryWatchlistStore {
    entries: Mutex<HashMap<String, String>>,
}

impl WatchlistRepository for MemoryWatchlistStore {
    fn load(&self, user: &str) -> anyhow::Result<BTreeSet<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("watchlist store poisoned"))?;
        match entries.get(&storage_key(user)) {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(BTreeSet::new()),
        }
    }

    fn save(&self, user: &str, ids: &BTreeSet<String>) -> anyhow::Result<()> {
        let raw = serde_json::to_string(ids)?;
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("watchlist store poisoned"))?
            .insert(storage_key(user), raw);
        Ok(())
    }
}

/// The repository the app talks to.
#[derive(Resource)]
pub struct WatchlistStore(pub Box<dyn WatchlistRepository + Send + Sync>);

impl WatchlistStore {
    /// File store in the platform data dir, or memory if that can't be set up.
    pub fn open_default() -> Self {
        match FileWatchlistStore::new() {
            Ok(store) => Self(Box::new(store)),
            Err(err) => {
                warn!(
                    "[WATCHLIST] {:#}; watchlists will not outlive this session",
                    err
                );
                Self(Box::new(MemoryWatchlistStore::default()))
            }
        }
    }
}
