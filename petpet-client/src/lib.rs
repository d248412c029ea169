//! Typed client for the Pet Your Pet REST API.
//!
//! Wraps the directory service (pet CRUD) and the identity service
//! (sign-up/sign-in/sign-out/verify) behind typed methods, decoding the
//! server's `{success, data, error}` envelope into `Result`s.

pub mod error;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use petpet_model::{
    ApiResponse, AuthToken, Pet, PetAttributes, PetId, PetUpdate,
    SignInRequest, SignUpRequest, UserProfile,
};

pub use error::ClientError;

/// HTTP client for one Pet Your Pet server, optionally authenticated.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (e.g.
    /// `http://localhost:3000`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token to subsequent requests.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    // Identity service -----------------------------------------------------

    pub async fn sign_up(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<AuthToken, ClientError> {
        let request = SignUpRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token: AuthToken = self
            .request(Method::POST, "api/v1/auth/signup", Some(&request))
            .await?;
        self.token = Some(token.token.clone());
        Ok(token)
    }

    pub async fn sign_in(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<AuthToken, ClientError> {
        let request = SignInRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token: AuthToken = self
            .request(Method::POST, "api/v1/auth/signin", Some(&request))
            .await?;
        self.token = Some(token.token.clone());
        Ok(token)
    }

    pub async fn sign_out(&mut self) -> Result<(), ClientError> {
        let _: Option<()> = self
            .request_optional(Method::POST, "api/v1/auth/signout", None::<&()>)
            .await?;
        self.token = None;
        Ok(())
    }

    /// Verify the current token and fetch the identity behind it.
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.request(Method::GET, "api/v1/auth/me", None::<&()>)
            .await
    }

    // Pet directory service ------------------------------------------------

    pub async fn list_pets(&self) -> Result<Vec<Pet>, ClientError> {
        self.request(Method::GET, "api/v1/pets", None::<&()>).await
    }

    pub async fn create_pet(
        &self,
        attributes: &PetAttributes,
    ) -> Result<Pet, ClientError> {
        self.request(Method::POST, "api/v1/pets", Some(attributes))
            .await
    }

    pub async fn update_pet(
        &self,
        id: PetId,
        update: &PetUpdate,
    ) -> Result<Pet, ClientError> {
        self.request(Method::PUT, &format!("api/v1/pets/{id}"), Some(update))
            .await
    }

    pub async fn delete_pet(&self, id: PetId) -> Result<Pet, ClientError> {
        self.request(Method::DELETE, &format!("api/v1/pets/{id}"), None::<&()>)
            .await
    }

    // Plumbing ---------------------------------------------------------------

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_optional(method, path, body)
            .await?
            .ok_or(ClientError::MissingData)
    }

    async fn request_optional<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<T>, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;

        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        decode_envelope(status, &bytes)
    }
}

/// Decode the server envelope, turning `success: false` into a typed error.
fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    bytes: &[u8],
) -> Result<Option<T>, ClientError> {
    let envelope: ApiResponse<T> = serde_json::from_slice(bytes)
        .map_err(|e| ClientError::Decode(e.to_string()))?;

    if !envelope.success || !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: envelope
                .error
                .unwrap_or_else(|| "request rejected".to_string()),
        });
    }
    Ok(envelope.data)
}
