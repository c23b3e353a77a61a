//! In-memory implementation of short link repository.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    last_id: i64,
    links: BTreeMap<i64, ShortLink>,
    ids_by_code: HashMap<String, i64>,
}

/// Short link repository kept in process memory.
#[derive(Default)]
pub struct InMemoryShortLinkRepository {
    store: RwLock<Store>,
}

impl InMemoryShortLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut store = self.store.write().await;

        if store.ids_by_code.contains_key(&new_link.short_code) {
            return Err(AppError::CodeTaken {
                code: new_link.short_code,
            });
        }

        store.last_id += 1;
        let link = ShortLink {
            id: store.last_id,
            original_url: new_link.original_url,
            short_code: new_link.short_code,
            created_by: new_link.created_by,
            created_date: new_link.created_date,
            redirect_count: 0,
            version: 1,
        };

        store.ids_by_code.insert(link.short_code.clone(), link.id);
        store.links.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError> {
        Ok(self.store.read().await.links.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let store = self.store.read().await;

        Ok(store
            .ids_by_code
            .get(code)
            .and_then(|id| store.links.get(id))
            .cloned())
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.store.read().await.ids_by_code.contains_key(code))
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<ShortLink>, AppError> {
        let store = self.store.read().await;
        let offset = ((page - 1) * page_size).max(0) as usize;

        let mut links: Vec<ShortLink> = store.links.values().cloned().collect();
        links.sort_by(|a, b| {
            b.created_date
                .cmp(&a.created_date)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(links
            .into_iter()
            .skip(offset)
            .take(page_size.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.store.read().await.links.len() as i64)
    }

    async fn update_original_url(
        &self,
        id: i64,
        original_url: &str,
        expected_version: i64,
    ) -> Result<Option<ShortLink>, AppError> {
        let mut store = self.store.write().await;

        match store.links.get_mut(&id) {
            Some(link) if link.version == expected_version => {
                link.original_url = original_url.to_string();
                link.version += 1;
                Ok(Some(link.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn record_redirect(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let mut store = self.store.write().await;

        let Some(id) = store.ids_by_code.get(code).copied() else {
            return Ok(None);
        };

        Ok(store.links.get_mut(&id).map(|link| {
            link.redirect_count += 1;
            link.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut store = self.store.write().await;

        match store.links.remove(&id) {
            Some(link) => {
                store.ids_by_code.remove(&link.short_code);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
