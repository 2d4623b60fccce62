//! Composition root - wires one favorites store into the per-kind services.
//!
//! The favorites store is the only state shared across entity services.
//! It is constructed exactly once here and handed to each service; nothing
//! else in the crate reaches for a hidden global.

use std::sync::Arc;

use lorebook_domain::EntityKind;

use crate::application::favorites::FavoritesStore;
use crate::application::services::EntityService;
use crate::config::ClientConfig;
use crate::infrastructure::http_client::HttpCatalogApi;
use crate::infrastructure::platform::{DesktopStorageProvider, SharedConnectivity};
use crate::ports::outbound::{CatalogApiPort, ConnectivityProvider, StorageProvider};

/// The application's data-access services, one per entity kind.
#[derive(Clone)]
pub struct AppServices {
    favorites: FavoritesStore,
    characters: EntityService,
    spells: EntityService,
    potions: EntityService,
    books: EntityService,
    movies: EntityService,
}

impl AppServices {
    /// Wire services from explicit adapters. The favorites store restores
    /// from storage before any service can observe it.
    pub fn new(
        config: &ClientConfig,
        api: Arc<dyn CatalogApiPort>,
        storage: Arc<dyn StorageProvider>,
        connectivity: Arc<dyn ConnectivityProvider>,
    ) -> Self {
        let favorites = FavoritesStore::with_debounce(storage, config.favorites_debounce);
        let characters = EntityService::characters(
            Arc::clone(&api),
            favorites.clone(),
            Arc::clone(&connectivity),
        );
        let spells = EntityService::spells(
            Arc::clone(&api),
            favorites.clone(),
            Arc::clone(&connectivity),
        );
        let potions = EntityService::potions(
            Arc::clone(&api),
            favorites.clone(),
            Arc::clone(&connectivity),
        );
        let books = EntityService::books(
            Arc::clone(&api),
            favorites.clone(),
            Arc::clone(&connectivity),
        );
        let movies = EntityService::movies(api, favorites.clone(), connectivity);
        Self {
            favorites,
            characters,
            spells,
            potions,
            books,
            movies,
        }
    }

    /// Default desktop wiring: HTTP API, file-backed storage, and a shared
    /// connectivity flag (assumed online until the shell reports otherwise).
    /// The flag is returned so the shell can toggle it from its network
    /// monitor.
    pub fn desktop(config: &ClientConfig) -> (Self, SharedConnectivity) {
        let connectivity = SharedConnectivity::new(true);
        let services = Self::new(
            config,
            Arc::new(HttpCatalogApi::new(config)),
            Arc::new(DesktopStorageProvider::new()),
            Arc::new(connectivity.clone()),
        );
        (services, connectivity)
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn characters(&self) -> &EntityService {
        &self.characters
    }

    pub fn spells(&self) -> &EntityService {
        &self.spells
    }

    pub fn potions(&self) -> &EntityService {
        &self.potions
    }

    pub fn books(&self) -> &EntityService {
        &self.books
    }

    pub fn movies(&self) -> &EntityService {
        &self.movies
    }

    pub fn for_kind(&self, kind: EntityKind) -> &EntityService {
        match kind {
            EntityKind::Character => &self.characters,
            EntityKind::Spell => &self.spells,
            EntityKind::Potion => &self.potions,
            EntityKind::Book => &self.books,
            EntityKind::Movie => &self.movies,
        }
    }

    /// Force a favorites write now. The shell calls this on process suspend
    /// and visibility loss, where waiting out the debounce would lose data.
    pub fn flush_favorites(&self) {
        self.favorites.flush();
    }
}

/// Install the default tracing subscriber, env-filtered.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lorebook_client=debug".into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
