//! Entity Service - data access for one catalog kind.
//!
//! Combines the catalog API, the codec, the favorites collection, and an
//! in-memory cache behind the operations the presentation layer calls:
//! list, by-id, search, and favorite toggling.
//!
//! Fallback policy: list and by-id loads serve favorites when the network is
//! absent or the API yields nothing; search has no offline corpus and fails
//! fast instead. Cache entries are last-write-wins and live until process
//! exit; concurrent loads for the same id are not coalesced.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use lorebook_domain::{codec, Entity, EntityKind};

use crate::application::error::ServiceError;
use crate::application::favorites::FavoritesStore;
use crate::ports::outbound::{ApiError, CatalogApiPort, ConnectivityProvider};

/// Per-kind data-access facade.
///
/// Cheap to clone; clones share the cache. One instance exists per kind,
/// all sharing the process-wide [`FavoritesStore`].
#[derive(Clone)]
pub struct EntityService {
    kind: EntityKind,
    api: Arc<dyn CatalogApiPort>,
    favorites: FavoritesStore,
    connectivity: Arc<dyn ConnectivityProvider>,
    cache: Arc<RwLock<HashMap<String, Entity>>>,
}

impl EntityService {
    pub fn new(
        kind: EntityKind,
        api: Arc<dyn CatalogApiPort>,
        favorites: FavoritesStore,
        connectivity: Arc<dyn ConnectivityProvider>,
    ) -> Self {
        Self {
            kind,
            api,
            favorites,
            connectivity,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Load one page (1-based) of entities.
    ///
    /// Falls back to the favorites collection when offline, when the API
    /// call fails, or when it yields no decodable records. Returned entities
    /// carry a current `is_favorite` flag and overwrite the cache by id.
    pub async fn load_list(&self, page: u32) -> Result<Vec<Entity>, ServiceError> {
        let mut items = Vec::new();
        if self.connectivity.is_online() {
            match self.fetch_list(page).await {
                Ok(fetched) => items = fetched,
                Err(e) => {
                    tracing::warn!(kind = %self.kind, "list fetch failed, falling back to favorites: {e}");
                }
            }
        } else {
            tracing::debug!(kind = %self.kind, "offline, serving favorites");
        }
        if items.is_empty() {
            items = self.favorites.get_by_kind(self.kind);
        }
        self.annotate_favorites(&mut items);
        self.cache_entities(&items);
        Ok(items)
    }

    /// Load a single entity: cache, then API, then favorites.
    ///
    /// Fails with [`ServiceError::NotFound`] only when no source has it.
    pub async fn load_by_id(&self, id: &str) -> Result<Entity, ServiceError> {
        if let Some(cached) = self.cached(id) {
            return Ok(cached);
        }

        if self.connectivity.is_online() {
            match self.fetch_one(id).await {
                Ok(Some(mut entity)) => {
                    let favored = self.favorites.has(self.kind, entity.id());
                    entity.set_favorite(favored);
                    self.cache_entity(&entity);
                    return Ok(entity);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(kind = %self.kind, id, "fetch by id failed, trying favorites: {e}");
                }
            }
        }

        if let Some(mut favorite) = self.favorites.get_by_id(self.kind, id) {
            favorite.set_favorite(true);
            self.cache_entity(&favorite);
            return Ok(favorite);
        }

        Err(ServiceError::NotFound {
            kind: self.kind,
            id: id.to_string(),
        })
    }

    /// Search the live corpus by substring on the kind's display field.
    ///
    /// Fails with [`ServiceError::Offline`] before any request when no
    /// network is available. An API failure yields an empty result instead
    /// of an error, so callers must read an empty result as "no matches or
    /// transient failure".
    pub async fn search(&self, query: &str, page: u32) -> Result<Vec<Entity>, ServiceError> {
        if !self.connectivity.is_online() {
            tracing::warn!(kind = %self.kind, "cannot search while offline");
            return Err(ServiceError::Offline);
        }

        let mut items = match self
            .api
            .fetch_filtered(self.kind, self.kind.search_field(), query, page)
            .await
        {
            Ok(body) => self.decode_records(&body),
            Err(e) => {
                tracing::warn!(kind = %self.kind, query, "search failed: {e}");
                Vec::new()
            }
        };
        self.annotate_favorites(&mut items);
        self.cache_entities(&items);
        Ok(items)
    }

    /// Flip favorite membership for a cached entity and persist immediately,
    /// bypassing the debounce. Ids never loaded into the cache are a silent
    /// no-op. Returns the membership after the call.
    pub fn toggle_favorite(&self, id: &str) -> Result<bool, ServiceError> {
        let Some(mut entity) = self.cached(id) else {
            return Ok(false);
        };

        let now_favorite = if self.favorites.has_entity(&entity) {
            self.favorites.remove_entity(&entity);
            false
        } else {
            self.favorites.add(entity.clone())?;
            true
        };

        entity.set_favorite(now_favorite);
        self.cache_entity(&entity);
        self.favorites.flush();
        Ok(now_favorite)
    }

    pub fn characters(
        api: Arc<dyn CatalogApiPort>,
        favorites: FavoritesStore,
        connectivity: Arc<dyn ConnectivityProvider>,
    ) -> Self {
        Self::new(EntityKind::Character, api, favorites, connectivity)
    }

    pub fn spells(
        api: Arc<dyn CatalogApiPort>,
        favorites: FavoritesStore,
        connectivity: Arc<dyn ConnectivityProvider>,
    ) -> Self {
        Self::new(EntityKind::Spell, api, favorites, connectivity)
    }

    pub fn potions(
        api: Arc<dyn CatalogApiPort>,
        favorites: FavoritesStore,
        connectivity: Arc<dyn ConnectivityProvider>,
    ) -> Self {
        Self::new(EntityKind::Potion, api, favorites, connectivity)
    }

    pub fn books(
        api: Arc<dyn CatalogApiPort>,
        favorites: FavoritesStore,
        connectivity: Arc<dyn ConnectivityProvider>,
    ) -> Self {
        Self::new(EntityKind::Book, api, favorites, connectivity)
    }

    pub fn movies(
        api: Arc<dyn CatalogApiPort>,
        favorites: FavoritesStore,
        connectivity: Arc<dyn ConnectivityProvider>,
    ) -> Self {
        Self::new(EntityKind::Movie, api, favorites, connectivity)
    }

    async fn fetch_list(&self, page: u32) -> Result<Vec<Entity>, ApiError> {
        let body = self.api.fetch_page(self.kind, page).await?;
        Ok(self.decode_records(&body))
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<Entity>, ApiError> {
        let body = self.api.fetch_by_id(self.kind, id).await?;
        let Some(record) = body.get("data") else {
            return Ok(None);
        };
        match codec::decode(self.kind, record) {
            Ok(entity) => Ok(Some(entity)),
            Err(e) => {
                tracing::warn!(kind = %self.kind, id, "undecodable record, treating as miss: {e}");
                Ok(None)
            }
        }
    }

    fn decode_records(&self, body: &Value) -> Vec<Entity> {
        let Some(records) = body.get("data").and_then(Value::as_array) else {
            tracing::warn!(kind = %self.kind, "response body has no data array");
            return Vec::new();
        };
        let mut entities = Vec::with_capacity(records.len());
        for record in records {
            match codec::decode(self.kind, record) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    tracing::warn!(kind = %self.kind, "skipping undecodable record: {e}");
                }
            }
        }
        entities
    }

    fn annotate_favorites(&self, items: &mut [Entity]) {
        for item in items.iter_mut() {
            let favored = self.favorites.has(self.kind, item.id());
            item.set_favorite(favored);
        }
    }

    fn cached(&self, id: &str) -> Option<Entity> {
        match self.cache.read() {
            Ok(cache) => cache.get(id).cloned(),
            Err(e) => {
                tracing::error!(kind = %self.kind, "entity cache lock poisoned: {e}");
                None
            }
        }
    }

    fn cache_entity(&self, entity: &Entity) {
        self.cache_entities(std::slice::from_ref(entity));
    }

    fn cache_entities(&self, items: &[Entity]) {
        match self.cache.write() {
            Ok(mut cache) => {
                for item in items {
                    if !item.id().is_empty() {
                        cache.insert(item.id().to_string(), item.clone());
                    }
                }
            }
            Err(e) => {
                tracing::error!(kind = %self.kind, "entity cache lock poisoned: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;

    use crate::infrastructure::platform::{MemoryStorageProvider, SharedConnectivity};
    use crate::infrastructure::testing::{page_of, raw_record};
    use crate::ports::outbound::api_port::MockCatalogApiPort;
    use lorebook_domain::Character;

    struct Harness {
        favorites: FavoritesStore,
        storage: Arc<MemoryStorageProvider>,
        connectivity: SharedConnectivity,
    }

    impl Harness {
        fn new() -> Self {
            let storage = Arc::new(MemoryStorageProvider::new());
            let favorites =
                FavoritesStore::with_debounce(storage.clone(), Duration::from_millis(10));
            Self {
                favorites,
                storage,
                connectivity: SharedConnectivity::new(true),
            }
        }

        fn service(&self, kind: EntityKind, api: MockCatalogApiPort) -> EntityService {
            EntityService::new(
                kind,
                Arc::new(api),
                self.favorites.clone(),
                Arc::new(self.connectivity.clone()),
            )
        }
    }

    fn favorite_character(id: &str, name: &str) -> Entity {
        Entity::Character(Character {
            id: id.to_string(),
            name: name.to_string(),
            ..Character::default()
        })
    }

    #[tokio::test]
    async fn load_list_decodes_and_annotates_favorites() {
        let harness = Harness::new();
        harness
            .favorites
            .add(favorite_character("c-2", "Hermione Granger"))
            .expect("seed favorite");

        let mut api = MockCatalogApiPort::new();
        api.expect_fetch_page().times(1).returning(|_, _| {
            Ok(page_of(vec![
                raw_record(EntityKind::Character, "c-1", "Harry Potter"),
                raw_record(EntityKind::Character, "c-2", "Hermione Granger"),
            ]))
        });

        let service = harness.service(EntityKind::Character, api);
        let items = service.load_list(1).await.expect("load list");

        assert_eq!(items.len(), 2);
        assert!(!items[0].is_favorite());
        assert!(items[1].is_favorite());
    }

    #[tokio::test]
    async fn load_list_falls_back_to_favorites_on_api_failure() {
        let harness = Harness::new();
        harness
            .favorites
            .add(favorite_character("c-1", "Harry Potter"))
            .expect("seed favorite");

        let mut api = MockCatalogApiPort::new();
        api.expect_fetch_page()
            .times(1)
            .returning(|_, _| Err(ApiError::Network("connection refused".to_string())));

        let service = harness.service(EntityKind::Character, api);
        let items = service.load_list(1).await.expect("load list");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), "c-1");
        assert!(items[0].is_favorite());
    }

    #[tokio::test]
    async fn load_list_serves_favorites_when_page_is_empty() {
        let harness = Harness::new();
        harness
            .favorites
            .add(favorite_character("c-1", "Harry Potter"))
            .expect("seed favorite");

        let mut api = MockCatalogApiPort::new();
        api.expect_fetch_page()
            .times(1)
            .returning(|_, _| Ok(json!({ "data": [] })));

        let service = harness.service(EntityKind::Character, api);
        let items = service.load_list(1).await.expect("load list");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].display_name(), "Harry Potter");
        assert!(items[0].is_favorite());
    }

    #[tokio::test]
    async fn load_list_skips_the_api_when_offline() {
        let harness = Harness::new();
        harness.connectivity.set_online(false);
        harness
            .favorites
            .add(favorite_character("c-1", "Harry Potter"))
            .expect("seed favorite");

        // No expectations: any API call would panic the mock.
        let api = MockCatalogApiPort::new();
        let service = harness.service(EntityKind::Character, api);
        let items = service.load_list(1).await.expect("load list");

        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn load_by_id_serves_the_cache_without_refetching() {
        let harness = Harness::new();
        let mut api = MockCatalogApiPort::new();
        api.expect_fetch_by_id().times(1).returning(|_, _| {
            Ok(json!({ "data": raw_record(EntityKind::Spell, "s-1", "Lumos") }))
        });

        let service = harness.service(EntityKind::Spell, api);
        let first = service.load_by_id("s-1").await.expect("first load");
        let second = service.load_by_id("s-1").await.expect("second load");

        assert_eq!(first, second);
        assert_eq!(second.display_name(), "Lumos");
    }

    #[tokio::test]
    async fn load_by_id_falls_back_to_favorites_on_api_failure() {
        let harness = Harness::new();
        harness
            .favorites
            .add(favorite_character("c-1", "Harry Potter"))
            .expect("seed favorite");

        let mut api = MockCatalogApiPort::new();
        api.expect_fetch_by_id()
            .times(1)
            .returning(|_, _| Err(ApiError::Http { status: 503 }));

        let service = harness.service(EntityKind::Character, api);
        let entity = service.load_by_id("c-1").await.expect("load by id");

        assert_eq!(entity.id(), "c-1");
        assert!(entity.is_favorite());
    }

    #[tokio::test]
    async fn load_by_id_reports_not_found_when_no_source_has_it() {
        let harness = Harness::new();
        let mut api = MockCatalogApiPort::new();
        api.expect_fetch_by_id()
            .times(1)
            .returning(|_, _| Err(ApiError::Http { status: 404 }));

        let service = harness.service(EntityKind::Potion, api);
        let result = service.load_by_id("p-404").await;

        assert_eq!(
            result,
            Err(ServiceError::NotFound {
                kind: EntityKind::Potion,
                id: "p-404".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn search_fails_fast_when_offline() {
        let harness = Harness::new();
        harness.connectivity.set_online(false);

        // No expectations: search must not touch the API while offline.
        let api = MockCatalogApiPort::new();
        let service = harness.service(EntityKind::Spell, api);

        let result = service.search("stun", 1).await;
        assert_eq!(result, Err(ServiceError::Offline));
    }

    #[tokio::test]
    async fn search_returns_empty_on_api_failure() {
        let harness = Harness::new();
        let mut api = MockCatalogApiPort::new();
        api.expect_fetch_filtered()
            .times(1)
            .returning(|_, _, _, _| Err(ApiError::Network("reset by peer".to_string())));

        let service = harness.service(EntityKind::Spell, api);
        let items = service.search("stun", 1).await.expect("search");

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn search_filters_on_the_kind_display_field() {
        let harness = Harness::new();
        let mut api = MockCatalogApiPort::new();
        api.expect_fetch_filtered()
            .times(1)
            .withf(|_, field, value, _| field == "title_cont" && value == "phoenix")
            .returning(|_, _, _, _| {
                Ok(page_of(vec![raw_record(
                    EntityKind::Book,
                    "b-1",
                    "Harry Potter and the Order of the Phoenix",
                )]))
            });

        let service = harness.service(EntityKind::Book, api);
        let items = service.search("phoenix", 1).await.expect("search");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), "b-1");
    }

    #[tokio::test]
    async fn toggle_favorite_flips_membership_and_persists_immediately() {
        let harness = Harness::new();
        let mut api = MockCatalogApiPort::new();
        api.expect_fetch_by_id().times(1).returning(|_, _| {
            Ok(json!({ "data": raw_record(EntityKind::Character, "c-1", "Harry Potter") }))
        });

        let service = harness.service(EntityKind::Character, api);
        service.load_by_id("c-1").await.expect("prime cache");

        let added = service.toggle_favorite("c-1").expect("toggle on");
        assert!(added);
        assert!(harness.favorites.has(EntityKind::Character, "c-1"));
        assert_eq!(harness.storage.write_count(), 1);

        let removed = service.toggle_favorite("c-1").expect("toggle off");
        assert!(!removed);
        assert!(!harness.favorites.has(EntityKind::Character, "c-1"));
        assert_eq!(harness.storage.write_count(), 2);
    }

    #[tokio::test]
    async fn toggle_favorite_updates_the_cached_flag() {
        let harness = Harness::new();
        let mut api = MockCatalogApiPort::new();
        api.expect_fetch_by_id().times(1).returning(|_, _| {
            Ok(json!({ "data": raw_record(EntityKind::Character, "c-1", "Harry Potter") }))
        });

        let service = harness.service(EntityKind::Character, api);
        service.load_by_id("c-1").await.expect("prime cache");
        service.toggle_favorite("c-1").expect("toggle on");

        let cached = service.load_by_id("c-1").await.expect("cache hit");
        assert!(cached.is_favorite());
    }

    #[tokio::test]
    async fn toggle_favorite_ignores_ids_never_loaded() {
        let harness = Harness::new();
        let api = MockCatalogApiPort::new();
        let service = harness.service(EntityKind::Character, api);

        let toggled = service.toggle_favorite("never-loaded").expect("toggle");
        assert!(!toggled);
        assert_eq!(harness.favorites.count(), 0);
        assert_eq!(harness.storage.write_count(), 0);
    }

    #[tokio::test]
    async fn bad_records_in_a_page_are_skipped_not_fatal() {
        let harness = Harness::new();
        let mut api = MockCatalogApiPort::new();
        api.expect_fetch_page().times(1).returning(|_, _| {
            Ok(json!({
                "data": [
                    raw_record(EntityKind::Spell, "s-1", "Lumos"),
                    { "type": "spell", "attributes": { "name": "No Id" } },
                ],
            }))
        });

        let service = harness.service(EntityKind::Spell, api);
        let items = service.load_list(1).await.expect("load list");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), "s-1");
    }
}
