use anyhow::Context;
use asp_client::{ApiClient, AuthResponse};
use asp_config::{AspirantConfig, StorageBackend, StorageConfig};
use asp_core::PageRequest;
use asp_feed::{LocalState, Optimistic};
use asp_session::{FileStore, KeyValueStore, KeyringStore, MemoryStore, Session};

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;

/// Shared application resources initialized once per invocation.
pub struct AppContext {
    pub config: AspirantConfig,
    pub session: Session<Box<dyn KeyValueStore>>,
    pub client: ApiClient,
    pub feed: Optimistic,
}

impl AppContext {
    /// Open the configured store, hydrate the session and build a client
    /// carrying the session's token.
    pub fn init(config: AspirantConfig) -> anyhow::Result<Self> {
        let store = open_store(&config.storage)?;
        let mut session = Session::new(store);
        if let Err(error) = session.hydrate() {
            tracing::warn!(%error, "session storage unreadable; continuing signed out");
        }

        let mut client = ApiClient::new(&config.api).context("invalid API configuration")?;
        client.set_token(session.token().map(str::to_owned));

        let feed = Optimistic::new(LocalState::default(), config.general.optimistic.into());
        tracing::debug!(
            backend = session.store().backend_name(),
            state = %session.state(),
            strategy = ?feed.strategy(),
            "context ready"
        );

        Ok(Self {
            config,
            session,
            client,
            feed,
        })
    }

    /// Adopt a fresh login: persist the session and point the client at its token.
    pub fn sign_in(&mut self, auth: AuthResponse) -> anyhow::Result<()> {
        self.client.set_token(Some(auth.token.clone()));
        self.session
            .login(auth.user, auth.token)
            .context("logged in, but the session could not be saved")
    }

    pub fn sign_out(&mut self) -> anyhow::Result<()> {
        self.client.set_token(None);
        self.session.logout().context("failed to clear stored session")
    }

    /// Page request honoring `--limit`, then `general.default_limit`.
    pub fn page(&self, page: u32, flags: &GlobalFlags) -> PageRequest {
        PageRequest::new(
            page,
            effective_limit(flags.limit, self.config.general.default_limit),
        )
    }
}

/// Build the store selected by `[storage] backend`.
pub fn open_store(config: &StorageConfig) -> anyhow::Result<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match config.backend {
        StorageBackend::File => {
            let dir = config
                .resolved_dir()
                .context("home directory not found: set storage.dir")?;
            Box::new(FileStore::new(dir))
        }
        StorageBackend::Keyring => Box::new(KeyringStore::new(config.resolved_keyring_service())),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    };
    Ok(store)
}
