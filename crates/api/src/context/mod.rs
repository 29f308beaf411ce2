//! Application context - dependency injection container

use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use prashiskshan_core::{
    ApplicationQueueStore, Clock, OfflineSubmissionService, SmsApplicationService,
    SubmissionForwarder, Subscription, SyncEngine,
};
use prashiskshan_domain::{Config, PrashiskshanError, Result};
use prashiskshan_infra::api::{ApplicationsApiClient, ApplicationsApiConfig};
use prashiskshan_infra::{
    config, ConnectivitySignal, DbManager, SqliteApplicationQueueRepository, SystemClock,
    TokioRemovalScheduler,
};
use tracing::{debug, info, warn};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub queue: Arc<dyn ApplicationQueueStore>,
    pub connectivity: Arc<ConnectivitySignal>,
    pub removal_scheduler: Arc<TokioRemovalScheduler>,
    pub sync_engine: Arc<SyncEngine>,
    pub submissions: Arc<OfflineSubmissionService>,
    pub sms: Arc<SmsApplicationService>,

    // Keeps reconnect-triggered syncing alive for the lifetime of the app
    auto_sync: Mutex<Subscription>,
}

impl AppContext {
    /// Create a context from the environment or a config file, falling back
    /// to defaults when neither is present.
    pub async fn new() -> Result<Self> {
        let config = match config::load() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "no configuration found, using defaults");
                Config::default()
            }
        };
        Self::new_with_config(config).await
    }

    /// Create a new application context with custom configuration
    ///
    /// Opens (and migrates) the queue database, wires every service, moves
    /// records stranded in `syncing` by a previous run to `failed` and
    /// purges synced records whose grace period elapsed while the app was
    /// closed. Must run inside a Tokio runtime.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        ensure_parent_dir(Path::new(&config.database.path))?;

        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let queue: Arc<dyn ApplicationQueueStore> =
            Arc::new(SqliteApplicationQueueRepository::new(Arc::clone(&db), Arc::clone(&clock)));

        let api = ApplicationsApiClient::new(ApplicationsApiConfig::from(&config.api))
            .map_err(|e| PrashiskshanError::Config(format!("applications API client: {e}")))?;
        let forwarder: Arc<dyn SubmissionForwarder> = Arc::new(api);

        // Offline until the host reports the platform state.
        let connectivity = Arc::new(ConnectivitySignal::new(false));
        let removal_scheduler = Arc::new(TokioRemovalScheduler::new(Arc::clone(&queue))?);

        let sync_engine = Arc::new(SyncEngine::new(
            Arc::clone(&queue),
            Arc::clone(&forwarder),
            removal_scheduler.clone(),
            config.sync.clone(),
        ));
        let submissions = Arc::new(OfflineSubmissionService::new(
            Arc::clone(&queue),
            connectivity.clone(),
            Arc::clone(&sync_engine),
            Arc::clone(&clock),
        ));
        let sms = Arc::new(SmsApplicationService::new(forwarder, clock));

        let recovered = sync_engine.recover_interrupted().await?;
        let purged = submissions.purge_expired().await?;

        let auto_sync = submissions.on_connectivity_change(Arc::new(|online| {
            debug!(online, "connectivity observed by app context");
        }));

        info!(
            db_path = %db.path().display(),
            api = %config.api.base_url,
            recovered,
            purged,
            "application context initialised"
        );

        Ok(Self {
            config,
            db,
            queue,
            connectivity,
            removal_scheduler,
            sync_engine,
            submissions,
            sms,
            auto_sync: Mutex::new(auto_sync),
        })
    }

    /// Stop reacting to connectivity and cancel pending removals.
    ///
    /// Safe to call more than once. Records whose removal was cancelled are
    /// purged on the next start.
    pub async fn shutdown(&self) -> Result<()> {
        info!("shutdown called on AppContext");

        self.auto_sync.lock().unsubscribe();
        self.removal_scheduler.shutdown().await;

        if self.sync_engine.is_syncing() {
            warn!("sync pass still running at shutdown; in-flight records recover on next start");
        }
        Ok(())
    }

    /// Whether reconnect-triggered syncing is still wired up.
    pub fn auto_sync_active(&self) -> bool {
        self.auto_sync.lock().is_active()
    }
}

fn ensure_parent_dir(db_path: &Path) -> Result<()> {
    match db_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir).map_err(|err| {
            PrashiskshanError::StorageUnavailable(format!(
                "failed to create database directory {}: {}",
                dir.display(),
                err
            ))
        }),
        _ => Ok(()),
    }
}
