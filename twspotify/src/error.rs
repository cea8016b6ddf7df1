//! Gestion des erreurs pour le client Spotify

use thiserror::Error;

/// Type Result personnalisé pour twspotify
pub type Result<T> = std::result::Result<T, SpotifyError>;

/// Erreurs possibles lors de l'utilisation du client Spotify
///
/// Les trois premières variantes sont les issues que la couche appelante doit
/// distinguer : chacune appelle une réaction différente de l'interface.
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Jeton absent, expiré ou refusé par l'API
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// Aucun appareil de lecture actif (et aucun disponible pour transfert)
    #[error("No active playback device")]
    NoActiveDevice,

    /// Morceau introuvable dans le catalogue
    #[error("Track not found in catalog: {0}")]
    TrackNotFound(String),

    /// Ressource non trouvée (appareil, contexte de lecture, etc.)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Erreur HTTP
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Erreur de parsing JSON
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Erreur de configuration (anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Erreur de l'API Spotify
    #[error("Spotify API error (code {code}): {message}")]
    ApiError { code: u16, message: String },

    /// Quota dépassé (rate limiting)
    #[error("Rate limit exceeded, please try again later")]
    RateLimitExceeded,
}

impl SpotifyError {
    /// Crée une erreur API depuis un code de statut HTTP et un message
    pub fn from_status_code(code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            401 | 403 => Self::NotAuthenticated(message),
            404 if message.contains("NO_ACTIVE_DEVICE") => Self::NoActiveDevice,
            404 => Self::NotFound(message),
            429 => Self::RateLimitExceeded,
            _ => Self::ApiError { code, message },
        }
    }

    /// Vérifie si l'erreur est une erreur de jeton (401/403)
    pub fn is_auth_error(&self) -> bool {
        matches!(self, SpotifyError::NotAuthenticated(_))
    }

    /// Vérifie si l'erreur signale l'absence d'appareil actif
    pub fn is_no_active_device(&self) -> bool {
        matches!(self, SpotifyError::NoActiveDevice)
    }
}
