//! Flat-file storage: the whole collection is one JSON array in one file.

use super::{SequentialId, Storage, StorageError};
use crate::entity::ActorEntity;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, trace};

/// A collection persisted as a single compact JSON array.
///
/// Every read parses the whole file and every mutation rewrites it. Writes go to
/// `<path>.tmp` first and are renamed over the target, so a crash mid-write leaves the
/// previous version intact. A missing or blank file reads as an empty collection; anything
/// else that does not parse is reported as [`StorageError::Malformed`], never as a partial
/// result.
pub struct FileStorage<T> {
    path: PathBuf,
    tmp_path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FileStorage<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        Self {
            path,
            tmp_path: PathBuf::from(tmp),
            _marker: PhantomData,
        }
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl<T: Serialize + DeserializeOwned> FileStorage<T> {
    async fn read(&self) -> Result<Vec<T>, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "No data file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    async fn write(&self, items: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_vec(items)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.tmp_path, &json)
            .await
            .map_err(|e| self.io_error(e))?;
        fs::rename(&self.tmp_path, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), records = items.len(), "Collection written");
        Ok(())
    }
}

#[async_trait]
impl<T> Storage<T> for FileStorage<T>
where
    T: ActorEntity + Serialize + DeserializeOwned,
    T::Id: SequentialId,
{
    async fn load_all(&mut self) -> Result<Vec<T>, StorageError> {
        self.read().await
    }

    async fn next_id(&mut self) -> Result<T::Id, StorageError> {
        let items = self.read().await?;
        match items.iter().map(|item| item.id()).max() {
            None => Ok(<T::Id as SequentialId>::first()),
            Some(largest) => largest
                .successor()
                .ok_or_else(|| StorageError::IdsExhausted(largest.to_string())),
        }
    }

    async fn insert(&mut self, item: T) -> Result<(), StorageError> {
        let mut items = self.read().await?;
        items.push(item);
        self.write(&items).await
    }

    async fn replace(&mut self, item: T) -> Result<bool, StorageError> {
        let mut items = self.read().await?;
        let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) else {
            return Ok(false);
        };
        *slot = item;
        self.write(&items).await?;
        Ok(true)
    }

    async fn remove(&mut self, id: &T::Id) -> Result<bool, StorageError> {
        let mut items = self.read().await?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Ok(false);
        }
        self.write(&items).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::Deserialize;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    struct NoteId(u32);

    impl std::fmt::Display for NoteId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "note_{}", self.0)
        }
    }

    impl SequentialId for NoteId {
        fn first() -> Self {
            NoteId(1)
        }
        fn successor(&self) -> Option<Self> {
            self.0.checked_add(1).map(NoteId)
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: NoteId,
        text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Note error")]
    struct NoteError;

    #[async_trait]
    impl ActorEntity for Note {
        type Id = NoteId;
        type Create = String;
        type Update = String;
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = NoteError;

        fn id(&self) -> &NoteId {
            &self.id
        }
        fn from_create_params(id: NoteId, text: String) -> Result<Self, Self::Error> {
            Ok(Self { id, text })
        }
        async fn on_update(&mut self, text: String, _: &()) -> Result<(), Self::Error> {
            self.text = text;
            Ok(())
        }
        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn note(id: u32, text: &str) -> Note {
        Note {
            id: NoteId(id),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty_and_first_id_is_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::<Note>::new(dir.path().join("notes.json"));

        assert!(storage.load_all().await.unwrap().is_empty());
        assert_eq!(storage.next_id().await.unwrap(), NoteId(1));
    }

    #[tokio::test]
    async fn next_id_is_one_past_the_largest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, r#"[{"id":4,"text":"a"},{"id":9,"text":"b"},{"id":2,"text":"c"}]"#)
            .unwrap();

        let mut storage = FileStorage::<Note>::new(&path);
        assert_eq!(storage.next_id().await.unwrap(), NoteId(10));
    }

    #[tokio::test]
    async fn exhausted_id_space_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let seeded = format!(r#"[{{"id":{},"text":"last"}}]"#, u32::MAX);
        std::fs::write(&path, &seeded).unwrap();

        let mut storage = FileStorage::<Note>::new(&path);
        let err = storage.next_id().await.unwrap_err();
        assert!(matches!(err, StorageError::IdsExhausted(ref id) if id == "note_4294967295"));

        assert_eq!(storage.load_all().await.unwrap(), vec![note(u32::MAX, "last")]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), seeded);
    }

    #[tokio::test]
    async fn writes_compact_array_in_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("notes.json");
        let mut storage = FileStorage::<Note>::new(&path);

        storage.insert(note(1, "first")).await.unwrap();
        storage.insert(note(2, "second")).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"[{"id":1,"text":"first"},{"id":2,"text":"second"}]"#);
        assert!(!dir.path().join("nested").join("notes.json.tmp").exists());

        let reloaded = FileStorage::<Note>::new(&path).load_all().await.unwrap();
        assert_eq!(reloaded, vec![note(1, "first"), note(2, "second")]);
    }

    #[tokio::test]
    async fn replace_and_remove_leave_other_records_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::<Note>::new(dir.path().join("notes.json"));
        for (id, text) in [(1, "a"), (2, "b"), (3, "c")] {
            storage.insert(note(id, text)).await.unwrap();
        }

        assert!(storage.replace(note(2, "B")).await.unwrap());
        assert!(!storage.replace(note(7, "x")).await.unwrap());
        assert!(storage.remove(&NoteId(1)).await.unwrap());
        assert!(!storage.remove(&NoteId(1)).await.unwrap());

        assert_eq!(
            storage.load_all().await.unwrap(),
            vec![note(2, "B"), note(3, "c")]
        );
    }

    #[tokio::test]
    async fn malformed_file_is_an_error_not_an_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "[{\"id\":1,").unwrap();

        let mut storage = FileStorage::<Note>::new(&path);
        let err = storage.load_all().await.unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));

        // A failed read must not clobber the file.
        assert!(storage.insert(note(1, "a")).await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"id\":1,");
    }

    #[tokio::test]
    async fn blank_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "  \n").unwrap();

        let mut storage = FileStorage::<Note>::new(&path);
        assert!(storage.load_all().await.unwrap().is_empty());
    }
}
