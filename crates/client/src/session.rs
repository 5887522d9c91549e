//! # Session
//!
//! The signed-in state of the client: one bearer token, kept in a [`TokenStore`]
//! so it survives between runs. A session is restored at start-up, signed in
//! after a successful login and signed out on logout.
//!
//! The role exposed here is decoded from the token without verifying it and is
//! only used to decide which pages to offer.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use courtside_core::{
    errors::{BookingError, BookingResult},
    models::user::Role,
    token::{self, Claims},
};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Somewhere to keep the bearer token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> BookingResult<Option<String>>;
    fn save(&self, token: &str) -> BookingResult<()>;
    fn clear(&self) -> BookingResult<()>;
}

/// Keeps the token in a single file, readable only by the current user on Unix.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> BookingResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, token: &str) -> BookingResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // `mode` only applies on creation; tighten a file left by older runs
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(token.as_bytes())?;

        debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }

    fn clear(&self) -> BookingResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> BookingResult<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|_| BookingError::Internal(eyre::eyre!("token store lock poisoned")))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> BookingResult<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, token: &str) -> BookingResult<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> BookingResult<()> {
        *self.slot()? = None;
        Ok(())
    }
}

pub struct Session {
    store: Box<dyn TokenStore>,
    token: Option<String>,
}

/// The session as shared between the HTTP client and the views.
pub type SharedSession = Arc<RwLock<Session>>;

impl Session {
    /// Picks up whatever token the store already holds.
    pub fn restore(store: impl TokenStore + 'static) -> BookingResult<Self> {
        let token = store.load()?;
        debug!(authenticated = token.is_some(), "Session restored");
        Ok(Self {
            store: Box::new(store),
            token,
        })
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn claims(&self) -> Option<Claims> {
        token::decode_claims(self.token.as_deref()?)
    }

    pub fn role_at(&self, now: DateTime<Utc>) -> Option<Role> {
        token::role_from_token(self.token.as_deref(), now)
    }

    /// Role hint for routing. `None` when signed out or the token is unusable.
    pub fn role(&self) -> Option<Role> {
        self.role_at(Utc::now())
    }

    /// Persists `token` and makes it the current credential.
    pub fn sign_in(&mut self, token: String) -> BookingResult<()> {
        self.store.save(&token)?;
        self.token = Some(token);
        info!(role = ?self.role(), "Signed in");
        Ok(())
    }

    /// Forgets the token in memory first, then in the store.
    pub fn sign_out(&mut self) -> BookingResult<()> {
        self.token = None;
        self.store.clear()?;
        info!("Signed out");
        Ok(())
    }
}
