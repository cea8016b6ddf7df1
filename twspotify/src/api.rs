//! Couche d'accès à l'API REST Spotify
//!
//! Ce module fournit une interface bas-niveau pour communiquer avec l'API Web
//! Spotify : construction des requêtes, authentification Bearer, décodage des
//! réponses et traduction des corps d'erreur en variantes typées.

use crate::error::{Result, SpotifyError};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// URL de base de l'API Web Spotify
const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Timeout par défaut des requêtes
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client API bas-niveau pour communiquer avec Spotify
pub struct SpotifyApi {
    /// Client HTTP
    client: Client,
    /// URL de base (surchargée en test/proxy via la configuration)
    base_url: String,
    /// Jeton d'accès OAuth fourni par la couche session
    access_token: String,
}

impl SpotifyApi {
    /// Crée une nouvelle instance de l'API avec les paramètres par défaut
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(API_BASE_URL, access_token, DEFAULT_TIMEOUT)
    }

    /// Crée une instance avec une URL de base et un timeout personnalisés
    pub fn with_base_url(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    /// Remplace le jeton d'accès (après un rafraîchissement côté session)
    pub fn set_access_token(&mut self, token: String) {
        self.access_token = token;
    }

    /// Retourne l'URL de base configurée
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Effectue une requête GET et décode la réponse JSON
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.request(Method::GET, endpoint, params, None).await?;
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse response: {}", e);
            SpotifyError::JsonParse(e)
        })
    }

    /// GET dont l'API peut répondre 204 No Content (ex: rien en cours de lecture)
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let response = self.request(Method::GET, endpoint, params, None).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        if text.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(SpotifyError::JsonParse)
    }

    /// Commande de lecture (PUT/POST) : Spotify répond 204 en cas de succès
    pub(crate) async fn send_command(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<()> {
        let response = self.request(method, endpoint, params, body).await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Effectue une requête à l'API (générique)
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("{} {} with {} params", method, url, params.len());

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.access_token);

        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        Ok(request.send().await?)
    }

    /// Vérifie le statut HTTP et traduit les corps d'erreur Spotify
    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();

        debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!("API error ({}): {}", code, body);
        Err(error_from_body(code, &body))
    }
}

/// Construit l'erreur depuis un corps `{"error": {"status", "message", "reason"}}`
///
/// La raison `NO_ACTIVE_DEVICE` a sa propre variante : la couche appelante
/// doit la distinguer pour déclencher le transfert d'appareil.
fn error_from_body(code: u16, body: &str) -> SpotifyError {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let error = json.get("error");
        let reason = error
            .and_then(|e| e.get("reason"))
            .and_then(|r| r.as_str());
        if reason == Some("NO_ACTIVE_DEVICE") {
            return SpotifyError::NoActiveDevice;
        }
        if let Some(message) = error
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return SpotifyError::from_status_code(code, message);
        }
    }

    SpotifyError::from_status_code(code, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_creation() {
        let api = SpotifyApi::new("test_token").unwrap();
        assert_eq!(api.base_url(), "https://api.spotify.com/v1");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api =
            SpotifyApi::with_base_url("http://localhost:9000/v1/", "t", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(api.base_url(), "http://localhost:9000/v1");
    }

    #[test]
    fn test_error_from_body_no_active_device() {
        let body = r#"{"error": {"status": 404, "message": "Player command failed: No active device found", "reason": "NO_ACTIVE_DEVICE"}}"#;
        assert!(matches!(
            error_from_body(404, body),
            SpotifyError::NoActiveDevice
        ));
    }

    #[test]
    fn test_error_from_body_expired_token() {
        let body = r#"{"error": {"status": 401, "message": "The access token expired"}}"#;
        let err = error_from_body(401, body);
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_error_from_body_unparseable() {
        let err = error_from_body(500, "<html>oops</html>");
        assert!(matches!(err, SpotifyError::ApiError { code: 500, .. }));
    }
}
