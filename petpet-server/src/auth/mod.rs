pub mod crypto;
pub mod handlers;
pub mod middleware;

pub use crypto::{AuthCrypto, AuthCryptoError};
pub use middleware::{CurrentUser, MaybeUser};
