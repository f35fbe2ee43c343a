//! Process-lifetime session storage for templates and completed madlibs.
//!
//! Records are keyed by freshly generated v4 UUIDs and are never evicted.

use crate::error::RecordKind;
use crate::models::{CompletedMadLib, Template};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub templates: usize,
    pub madlibs: usize,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put_template(&self, template: Template);
    async fn get_template(&self, id: &Uuid) -> Result<Template>;
    async fn delete_template(&self, id: &Uuid) -> Option<Template>;

    async fn put_madlib(&self, madlib: CompletedMadLib);
    async fn get_madlib(&self, id: &Uuid) -> Result<CompletedMadLib>;
    async fn delete_madlib(&self, id: &Uuid) -> Option<CompletedMadLib>;

    async fn counts(&self) -> StoreCounts;
}

/// Records that can live in a [`RecordMap`].
pub trait Record: Clone + Send + Sync {
    const KIND: RecordKind;
    fn id(&self) -> Uuid;
}

impl Record for Template {
    const KIND: RecordKind = RecordKind::Template;
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for CompletedMadLib {
    const KIND: RecordKind = RecordKind::MadLib;
    fn id(&self) -> Uuid {
        self.id
    }
}

struct RecordMap<T> {
    records: RwLock<HashMap<Uuid, T>>,
}

impl<T: Record> RecordMap<T> {
    fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    async fn put(&self, record: T) {
        let id = record.id();
        if self.records.write().await.insert(id, record).is_some() {
            tracing::warn!("Replaced existing {} record {}", T::KIND, id);
        }
    }

    async fn get(&self, id: &Uuid) -> Result<T> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(T::KIND, id.to_string()))
    }

    async fn delete(&self, id: &Uuid) -> Option<T> {
        self.records.write().await.remove(id)
    }

    async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

pub struct InMemorySessionStore {
    templates: RecordMap<Template>,
    madlibs: RecordMap<CompletedMadLib>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            templates: RecordMap::new(),
            madlibs: RecordMap::new(),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put_template(&self, template: Template) {
        self.templates.put(template).await;
    }

    async fn get_template(&self, id: &Uuid) -> Result<Template> {
        self.templates.get(id).await
    }

    async fn delete_template(&self, id: &Uuid) -> Option<Template> {
        self.templates.delete(id).await
    }

    async fn put_madlib(&self, madlib: CompletedMadLib) {
        self.madlibs.put(madlib).await;
    }

    async fn get_madlib(&self, id: &Uuid) -> Result<CompletedMadLib> {
        self.madlibs.get(id).await
    }

    async fn delete_madlib(&self, id: &Uuid) -> Option<CompletedMadLib> {
        self.madlibs.delete(id).await
    }

    async fn counts(&self) -> StoreCounts {
        StoreCounts {
            templates: self.templates.len().await,
            madlibs: self.madlibs.len().await,
        }
    }
}
