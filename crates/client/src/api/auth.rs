use reqwest::Method;
use serde::{Deserialize, Serialize};

use foodnova_auth::UserProfile;

use super::ApiClient;
use crate::error::ClientResult;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl ApiClient {
    pub async fn login(&self, body: &LoginRequest) -> ClientResult<TokenResponse> {
        tracing::debug!(email = %body.email, "POST /auth/login");
        let req = self.request(Method::POST, "/auth/login").json(body);
        self.send(req, "Login failed. Please check your credentials.").await
    }

    pub async fn register(&self, body: &RegisterRequest) -> ClientResult<UserProfile> {
        tracing::debug!(email = %body.email, "POST /auth/register");
        let req = self.request(Method::POST, "/auth/register").json(body);
        self.send(req, "Registration failed. Please try again.").await
    }

    pub async fn me(&self) -> ClientResult<UserProfile> {
        let req = self.request(Method::GET, "/auth/me");
        self.send(req, "Failed to load your profile").await
    }
}
