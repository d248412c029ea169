use std::fmt;
use std::sync::Arc;

use crate::auth::AuthCrypto;
use crate::infra::config::Config;
use crate::store::{IdentityStore, PetStore};

#[derive(Clone)]
pub struct AppState {
    pub pets: Arc<dyn PetStore>,
    pub identity: Arc<dyn IdentityStore>,
    pub crypto: Arc<AuthCrypto>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        pets: Arc<dyn PetStore>,
        identity: Arc<dyn IdentityStore>,
        crypto: AuthCrypto,
        config: Config,
    ) -> Self {
        Self {
            pets,
            identity,
            crypto: Arc::new(crypto),
            config: Arc::new(config),
        }
    }
}
