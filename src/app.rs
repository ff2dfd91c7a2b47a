use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use partscout_config::Config;
use partscout_fetch::FetcherHandle;
use partscout_fetch::backend::HttpFetcher;
use partscout_inventory::{Database, Repository};
use partscout_resolve::{DatasheetResolver, SubstitutionResolver};
use std::sync::Arc;

/// Everything a request handler or CLI command needs.
///
/// Cheap to clone: the resolvers are shared and the repository wraps a pool.
#[derive(Clone)]
pub struct AppState {
    pub datasheets: Arc<DatasheetResolver>,
    pub substitutes: Arc<SubstitutionResolver>,
    pub inventory: Repository,
}

impl AppState {
    /// Builds the resolvers around an existing fetcher and inventory.
    ///
    /// Fails if a configured site layout has an invalid URL or selector.
    pub fn new(config: &Config, fetcher: FetcherHandle, inventory: Repository) -> Result<Self> {
        let datasheets = DatasheetResolver::new(fetcher.clone(), config.datasheet.clone())
            .or_raise(|| ErrorKind::Startup("datasheet resolver"))?;
        let substitutes = SubstitutionResolver::new(fetcher, config.substitution.clone())
            .or_raise(|| ErrorKind::Startup("substitution resolver"))?;
        Ok(Self {
            datasheets: Arc::new(datasheets),
            substitutes: Arc::new(substitutes),
            inventory,
        })
    }

    /// Builds the live state: an HTTP fetcher and the on-disk database.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http.user_agent, config.http.timeout())
            .or_raise(|| ErrorKind::Startup("HTTP client"))?;
        let path = config.database_path().or_raise(|| ErrorKind::Config)?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.or_raise(|| ErrorKind::Io)?;
        }
        tracing::debug!(path = %path.display(), "opening inventory database");
        let db = Database::connect(&path).await.or_raise(|| ErrorKind::Startup("inventory database"))?;
        Self::new(config, Arc::new(fetcher), Repository::from(&db))
    }
}
