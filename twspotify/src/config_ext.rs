//! Extension pour intégrer la configuration Spotify dans twconfig
//!
//! Ce module fournit le trait `SpotifyConfigExt` qui permet d'ajouter
//! des méthodes de gestion du compte Spotify à twconfig::Config.

use anyhow::{anyhow, Result};
use serde_yaml::Value;
use twconfig::Config;

/// Trait d'extension pour gérer la configuration Spotify dans twconfig
///
/// Ce trait étend `twconfig::Config` avec des méthodes spécifiques au
/// compte Spotify. Le jeton d'accès est fourni par la couche session ;
/// ces méthodes ne font que le stocker et vérifier sa validité.
///
/// # Exemple
///
/// ```rust,ignore
/// use twconfig::get_config;
/// use twspotify::SpotifyConfigExt;
///
/// let config = get_config();
/// if let Some(token) = config.get_spotify_access_token()? {
///     println!("Token available ({} chars)", token.len());
/// }
/// ```
pub trait SpotifyConfigExt {
    /// Récupère le jeton d'accès Spotify depuis la configuration
    ///
    /// # Returns
    ///
    /// Le jeton d'accès, ou None si non configuré
    fn get_spotify_access_token(&self) -> Result<Option<String>>;

    /// Récupère le timestamp d'expiration du jeton
    ///
    /// # Returns
    ///
    /// Le timestamp d'expiration (Unix timestamp), ou None si non configuré
    fn get_spotify_token_expires_at(&self) -> Result<Option<u64>>;

    /// Sauvegarde le jeton d'accès et son expiration dans la configuration
    ///
    /// # Arguments
    ///
    /// * `token` - Le jeton d'accès fourni par la couche session
    /// * `expires_at` - Timestamp d'expiration (Unix timestamp)
    fn set_spotify_auth_info(&self, token: &str, expires_at: u64) -> Result<()>;

    /// Supprime les informations d'authentification de la configuration
    fn clear_spotify_auth_info(&self) -> Result<()>;

    /// Vérifie si le jeton d'accès est encore valide
    ///
    /// # Returns
    ///
    /// true si un jeton existe et n'est pas expiré, false sinon
    fn is_spotify_auth_valid(&self) -> bool;

    /// Récupère l'appareil de lecture préféré
    ///
    /// # Returns
    ///
    /// L'identifiant de l'appareil à privilégier lors d'un transfert,
    /// ou None si non configuré
    fn get_spotify_preferred_device(&self) -> Result<Option<String>>;

    /// Définit l'appareil de lecture préféré
    fn set_spotify_preferred_device(&self, device_id: &str) -> Result<()>;
}

impl SpotifyConfigExt for Config {
    fn get_spotify_access_token(&self) -> Result<Option<String>> {
        match self.get_value(&["accounts", "spotify", "access_token"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(Some(s)),
            Ok(Value::String(_)) => Ok(None), // Empty string
            Ok(_) => Ok(None),                // Wrong type
            Err(_) => Ok(None),               // Not configured
        }
    }

    fn get_spotify_token_expires_at(&self) -> Result<Option<u64>> {
        match self.get_value(&["accounts", "spotify", "token_expires_at"]) {
            Ok(Value::Number(n)) => Ok(n.as_u64()),
            Ok(_) => Ok(None),  // Wrong type
            Err(_) => Ok(None), // Not configured
        }
    }

    fn set_spotify_auth_info(&self, token: &str, expires_at: u64) -> Result<()> {
        if token.is_empty() {
            return Err(anyhow!("Empty Spotify access token"));
        }
        self.set_value(
            &["accounts", "spotify", "access_token"],
            Value::String(token.to_string()),
        )?;
        self.set_value(
            &["accounts", "spotify", "token_expires_at"],
            Value::Number(serde_yaml::Number::from(expires_at)),
        )
    }

    fn clear_spotify_auth_info(&self) -> Result<()> {
        // On ne propage pas les erreurs car les valeurs peuvent ne pas exister
        let _ = self.set_value(
            &["accounts", "spotify", "access_token"],
            Value::String(String::new()),
        );
        let _ = self.set_value(
            &["accounts", "spotify", "token_expires_at"],
            Value::Number(serde_yaml::Number::from(0)),
        );
        Ok(())
    }

    fn is_spotify_auth_valid(&self) -> bool {
        if self.get_spotify_access_token().ok().flatten().is_none() {
            return false;
        }

        if let Ok(Some(expires_at)) = self.get_spotify_token_expires_at() {
            use std::time::{SystemTime, UNIX_EPOCH};
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(u64::MAX);

            now < expires_at
        } else {
            false
        }
    }

    fn get_spotify_preferred_device(&self) -> Result<Option<String>> {
        match self.get_value(&["accounts", "spotify", "preferred_device"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(Some(s)),
            Ok(Value::String(_)) => Ok(None), // Empty string
            Ok(_) => Ok(None),                // Wrong type
            Err(_) => Ok(None),               // Not configured
        }
    }

    fn set_spotify_preferred_device(&self, device_id: &str) -> Result<()> {
        self.set_value(
            &["accounts", "spotify", "preferred_device"],
            Value::String(device_id.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_info_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        assert!(config.get_spotify_access_token().unwrap().is_none());
        assert!(!config.is_spotify_auth_valid());

        config.set_spotify_auth_info("BQDe...token", u64::MAX).unwrap();
        assert_eq!(
            config.get_spotify_access_token().unwrap().as_deref(),
            Some("BQDe...token")
        );
        assert!(config.is_spotify_auth_valid());

        config.clear_spotify_auth_info().unwrap();
        assert!(config.get_spotify_access_token().unwrap().is_none());
        assert!(!config.is_spotify_auth_valid());
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        config.set_spotify_auth_info("BQDe...token", 1).unwrap();
        assert!(!config.is_spotify_auth_valid());
    }

    #[test]
    fn test_empty_token_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        assert!(config.set_spotify_auth_info("", 0).is_err());
    }

    #[test]
    fn test_preferred_device() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        assert!(config.get_spotify_preferred_device().unwrap().is_none());
        config.set_spotify_preferred_device("abc123").unwrap();
        assert_eq!(
            config.get_spotify_preferred_device().unwrap().as_deref(),
            Some("abc123")
        );
    }
}
