use super::attribute_store::AttributeStore;
use super::mem_backend::MemBackend;
use crate::error::Result;
use std::path::PathBuf;

pub type InMemoryAttributeStore = AttributeStore<MemBackend>;

impl InMemoryAttributeStore {
    /// A store over a single in-memory file seeded with `attrs`.
    pub fn seeded<I, K, V>(path: impl Into<PathBuf>, attrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let path = path.into();
        let backend = MemBackend::new().with_path(path.clone(), attrs);
        AttributeStore::open(path, backend)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::config::ShadowConfig;
    use std::path::Path;

    pub const FIXTURE_PATH: &str = "/fixtures/attributes";

    pub struct StoreFixture {
        backend: MemBackend,
        config: ShadowConfig,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                backend: MemBackend::new().with_path(FIXTURE_PATH, Vec::<(String, String)>::new()),
                config: ShadowConfig::default(),
            }
        }

        pub fn with_attr(self, name: &str, value: &str) -> Self {
            let mut attrs = self
                .backend
                .attributes_of(Path::new(FIXTURE_PATH))
                .unwrap_or_default();
            attrs.insert(name.to_string(), value.to_string());
            self.backend.insert_path(FIXTURE_PATH, attrs);
            self
        }

        pub fn with_attrs(self, count: usize) -> Self {
            (0..count).fold(self, |fixture, i| {
                fixture.with_attr(&format!("user.attr{}", i + 1), &format!("value {}", i + 1))
            })
        }

        pub fn with_max_value_len(mut self, max: usize) -> Self {
            self.config = self.config.with_max_value_len(max);
            self
        }

        pub fn failing_on(self, name: &str) -> Self {
            self.backend.fail_writes_for(name);
            self
        }

        pub fn open(self) -> InMemoryAttributeStore {
            AttributeStore::open_with_config(FIXTURE_PATH, self.backend, &self.config)
                .expect("fixture path always exists")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{StoreFixture, FIXTURE_PATH};
    use super::*;
    use std::path::Path;

    #[test]
    fn test_seeded_store() {
        let store = InMemoryAttributeStore::seeded("/f", [("user.attr1", "foo"), ("user.attr2", "bar")])
            .unwrap();
        assert_eq!(store.get("user.attr1"), Some("foo"));
        assert_eq!(store.get("user.attr2"), Some("bar"));
        assert_eq!(store.attributes().len(), 2);
    }

    #[test]
    fn test_fixture_with_attrs() {
        let store = StoreFixture::new().with_attrs(3).open();
        assert_eq!(store.attributes().len(), 3);
        assert_eq!(store.get("user.attr2"), Some("value 2"));
        assert_eq!(store.path(), Path::new(FIXTURE_PATH));
    }

    #[test]
    fn test_fixture_limit_and_failure() {
        let mut store = StoreFixture::new()
            .with_attr("a", "1")
            .with_max_value_len(3)
            .failing_on("b")
            .open();

        assert!(store.set("a", "long").unwrap_err().is_value_too_long());
        store.set("b", "ok").unwrap();
        assert!(store.commit().unwrap_err().is_access());
    }

    #[test]
    fn test_many_edits_then_commit() {
        let mut store = StoreFixture::new().with_attrs(5).open();
        for i in 1..=5 {
            if i % 2 == 0 {
                store.delete(format!("user.attr{}", i)).unwrap();
            } else {
                store.set(format!("user.attr{}", i), i * 10).unwrap();
            }
        }
        let diff = store.diff();
        assert_eq!(diff.changed.len(), 3);
        assert_eq!(diff.removed.len(), 2);
        assert!(diff.added.is_empty());

        store.commit().unwrap();
        let on_disk = store.backend().attributes_of(Path::new(FIXTURE_PATH)).unwrap();
        assert_eq!(on_disk.len(), 3);
        assert_eq!(on_disk.get("user.attr5").map(String::as_str), Some("50"));
    }
}
