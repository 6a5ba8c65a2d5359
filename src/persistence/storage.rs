//! Key-value storage backends
//!
//! The growth record only needs `get`/`set`/`delete` on byte values. Native
//! builds write one file per key; web builds use LocalStorage.

use std::collections::HashMap;

use super::StorageError;

/// Byte-oriented key-value storage
pub trait Storage {
    /// Read the value stored under `key`, `None` if the key is absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;

    /// Push pending writes to durable storage
    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        (**self).flush()
    }
}

/// In-memory storage (tests, headless runs without a state directory)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs::{self, File};
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};

    use super::{Storage, StorageError};

    /// One JSON file per key inside a directory.
    ///
    /// Writes go to `{key}.json.tmp`, are synced, then renamed over the
    /// final file, so a crash mid-write leaves the previous value intact.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        dir: PathBuf,
    }

    impl FileStorage {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        /// File path for `key`; anything outside `[A-Za-z0-9_.-]` becomes `_`
        pub fn path_for(&self, key: &str) -> PathBuf {
            let name: String = key
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            self.dir.join(format!("{}.json", name))
        }
    }

    impl Storage for FileStorage {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            match fs::read(self.path_for(key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
            fs::create_dir_all(&self.dir)?;

            let final_path = self.path_for(key);
            let mut tmp_path = final_path.clone().into_os_string();
            tmp_path.push(".tmp");

            let mut file = File::create(&tmp_path)?;
            file.write_all(value)?;
            file.sync_all()?;
            fs::rename(&tmp_path, &final_path)?;
            Ok(())
        }

        fn delete(&mut self, key: &str) -> Result<(), StorageError> {
            match fs::remove_file(self.path_for(key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{Storage, StorageError};

    /// Browser LocalStorage. Values are stored as UTF-8 strings.
    pub struct LocalStorage {
        inner: web_sys::Storage,
    }

    impl LocalStorage {
        /// Open the window's LocalStorage
        pub fn open() -> Result<Self, StorageError> {
            let inner = web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or_else(|| StorageError::Unavailable("LocalStorage".to_string()))?;
            Ok(Self { inner })
        }
    }

    fn js_err(e: wasm_bindgen::JsValue) -> StorageError {
        StorageError::Unavailable(format!("{:?}", e))
    }

    impl Storage for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            let value = self.inner.get_item(key).map_err(js_err)?;
            Ok(value.map(String::into_bytes))
        }

        fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
            let text = std::str::from_utf8(value).map_err(|_| StorageError::NotUtf8)?;
            self.inner.set_item(key, text).map_err(js_err)
        }

        fn delete(&mut self, key: &str) -> Result<(), StorageError> {
            self.inner.remove_item(key).map_err(js_err)
        }
    }
}
