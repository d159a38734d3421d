use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use models::Entity;
use tokio::{fs, sync::RwLock};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Directory-backed store holding one JSON file per entity.
///
/// Files are named `<Id>.json`. An optional in-memory list caches the last
/// scan of the directory: `None` until the first load, replaced on every
/// load, appended to on save, pruned on delete and dropped by
/// [`JsonDirStore::invalidate`]. Nothing watches the directory, so files
/// written by other processes only show up on the next load.
pub struct JsonDirStore<T> {
    dir: PathBuf,
    cache: RwLock<Option<Vec<T>>>,
}

impl<T: Entity> JsonDirStore<T> {
    /// Open the store at `dir`, creating the directory if it is missing.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Self, ServiceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ServiceError::io(&dir, e))?;
        Ok(Self { dir, cache: RwLock::new(None) })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entity_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Re-read the whole directory and replace the in-memory list.
    ///
    /// Files that cannot be read or parsed are skipped. Entries are ordered
    /// by file name so repeated loads are stable.
    #[instrument(skip(self), fields(kind = T::KIND, dir = %self.dir.display()))]
    pub async fn load(&self) -> Result<(), ServiceError> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| ServiceError::io(&self.dir, e))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ServiceError::io(&self.dir, e))?
        {
            match entry.file_type().await {
                Ok(ft) if ft.is_file() => paths.push(entry.path()),
                _ => {}
            }
        }
        paths.sort();

        let mut items = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = match fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skip unreadable file");
                    continue;
                }
            };
            match serde_json::from_slice::<Option<T>>(&bytes) {
                Ok(Some(item)) => items.push(item),
                Ok(None) => debug!(path = %path.display(), "skip null document"),
                Err(e) => debug!(path = %path.display(), error = %e, "skip malformed file"),
            }
        }

        debug!(count = items.len(), "loaded");
        *self.cache.write().await = Some(items);
        Ok(())
    }

    /// Create or fully replace `<Id>.json`, assigning a fresh UUID when the
    /// entity has no id yet.
    ///
    /// The cache is only touched after the write succeeded. An entity equal to
    /// one already cached is not appended again; two different values with the
    /// same id both stay cached until the next load.
    #[instrument(skip(self, item), fields(kind = T::KIND))]
    pub async fn save(&self, mut item: T) -> Result<T, ServiceError> {
        if !item.has_id() {
            item.set_id(Uuid::new_v4().to_string());
        }
        let id = item.id().unwrap_or_default().to_owned();
        validate_id(&id)?;

        let path = self.entity_path(&id);
        let data = serde_json::to_vec(&item)?;
        fs::write(&path, data)
            .await
            .map_err(|e| ServiceError::io(&path, e))?;
        debug!(%id, path = %path.display(), "saved");

        if let Some(list) = self.cache.write().await.as_mut() {
            if !list.contains(&item) {
                list.push(item.clone());
            }
        }
        Ok(item)
    }

    /// Best-effort removal of `<id>.json`. Failures are logged, never returned.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn delete(&self, id: &str) {
        if validate_id(id).is_err() {
            warn!(%id, "refusing to delete with unsafe id");
        } else {
            let path = self.entity_path(id);
            match fs::remove_file(&path).await {
                Ok(()) => debug!(%id, "deleted"),
                Err(e) if e.kind() == ErrorKind::NotFound => debug!(%id, "nothing to delete"),
                Err(e) => warn!(%id, path = %path.display(), error = %e, "delete failed"),
            }
        }

        if let Some(list) = self.cache.write().await.as_mut() {
            if let Some(pos) = list.iter().position(|item| item.id() == Some(id)) {
                list.remove(pos);
            }
        }
    }

    /// Reload, then look the id up.
    pub async fn get(&self, id: &str) -> Result<Option<T>, ServiceError> {
        self.load().await?;
        let cache = self.cache.read().await;
        let list = cache
            .as_ref()
            .ok_or_else(|| ServiceError::InvariantViolated(format!("{} list missing after load", T::KIND)))?;
        Ok(list.iter().find(|item| item.id() == Some(id)).cloned())
    }

    /// Reload, then count.
    pub async fn count(&self) -> Result<usize, ServiceError> {
        self.load().await?;
        Ok(self.cache.read().await.as_ref().map_or(0, Vec::len))
    }

    /// Reload, then return everything.
    pub async fn all(&self) -> Result<Vec<T>, ServiceError> {
        self.load().await?;
        Ok(self.cache.read().await.clone().unwrap_or_default())
    }

    /// Forget the in-memory list; the next read goes back to disk.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    pub async fn is_loaded(&self) -> bool {
        self.cache.read().await.is_some()
    }

    /// Snapshot of the in-memory list without touching disk.
    pub async fn cached(&self) -> Option<Vec<T>> {
        self.cache.read().await.clone()
    }
}

/// Ids become file names, so they must stay inside the store directory.
fn validate_id(id: &str) -> Result<(), ServiceError> {
    let bad = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '\0']);
    if bad {
        return Err(ServiceError::Validation(format!("invalid id: {id:?}")));
    }
    Ok(())
}
