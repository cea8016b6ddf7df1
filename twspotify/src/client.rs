//! Client principal pour piloter la lecture Spotify
//!
//! Ce module fournit un client haut-niveau : recherche catalogue, commandes de
//! lecture, et le flux composé recherche → lecture avec repli sur transfert
//! d'appareil.

use crate::api::SpotifyApi;
use crate::config_ext::SpotifyConfigExt;
use crate::error::{Result, SpotifyError};
use crate::models::{CurrentlyPlaying, Device, DevicesResponse, SearchResponse, Track};
use reqwest::Method;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client Spotify haut-niveau
pub struct SpotifyClient {
    /// API bas-niveau
    api: SpotifyApi,
    /// Marché utilisé pour les recherches catalogue
    market: String,
    /// Appareil privilégié lors d'un transfert de lecture
    preferred_device: Option<String>,
}

impl SpotifyClient {
    /// Crée un client avec un jeton d'accès déjà obtenu par la couche session
    ///
    /// # Exemple
    ///
    /// ```rust,no_run
    /// use twspotify::SpotifyClient;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let client = SpotifyClient::new("BQDe...access-token")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api: SpotifyApi::new(access_token)?,
            market: "ES".to_string(),
            preferred_device: None,
        })
    }

    /// Crée un client avec une URL de base et un timeout personnalisés
    /// (tests, proxy)
    pub fn with_base_url(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            api: SpotifyApi::with_base_url(base_url, access_token, timeout)?,
            market: "ES".to_string(),
            preferred_device: None,
        })
    }

    /// Crée un client en utilisant la configuration de twconfig
    /// (marché, URL de base, timeout, appareil préféré)
    pub fn from_config(access_token: impl Into<String>) -> Result<Self> {
        let config = twconfig::get_config();
        let api = SpotifyApi::with_base_url(
            config.get_spotify_api_base(),
            access_token,
            Duration::from_secs(config.get_spotify_timeout_secs()),
        )?;

        Ok(Self {
            api,
            market: config.get_spotify_market(),
            preferred_device: config.get_spotify_preferred_device()?,
        })
    }

    /// Définit le marché des recherches catalogue
    pub fn set_market(&mut self, market: impl Into<String>) {
        self.market = market.into();
    }

    /// Retourne le marché configuré
    pub fn market(&self) -> &str {
        &self.market
    }

    /// Définit l'appareil privilégié lors d'un transfert de lecture
    pub fn set_preferred_device(&mut self, device_id: impl Into<String>) {
        self.preferred_device = Some(device_id.into());
    }

    /// Retourne l'appareil préféré configuré
    pub fn preferred_device(&self) -> Option<&str> {
        self.preferred_device.as_deref()
    }

    /// Remplace le jeton d'accès (après rafraîchissement côté session)
    pub fn set_access_token(&mut self, token: String) {
        self.api.set_access_token(token);
    }

    // ============ Catalogue ============

    /// Recherche le meilleur résultat pour un couple titre/artiste
    ///
    /// Retourne [`SpotifyError::TrackNotFound`] quand le catalogue ne contient
    /// aucun résultat pour la requête.
    pub async fn search_track(&self, title: &str, artist: &str) -> Result<Track> {
        let query = format!("{} {}", title, artist);
        debug!("Searching catalog for '{}'", query);

        let response: SearchResponse = self
            .api
            .get(
                "/search",
                &[
                    ("q", query.as_str()),
                    ("type", "track"),
                    ("limit", "1"),
                    ("market", self.market.as_str()),
                ],
            )
            .await?;

        response
            .tracks
            .items
            .into_iter()
            .next()
            .ok_or(SpotifyError::TrackNotFound(query))
    }

    // ============ Appareils ============

    /// Liste les appareils de lecture connectés au compte
    pub async fn devices(&self) -> Result<Vec<Device>> {
        let response: DevicesResponse = self.api.get("/me/player/devices", &[]).await?;
        Ok(response.devices)
    }

    /// Transfère la lecture vers l'appareil donné
    pub async fn transfer_playback(&self, device_id: &str, force_play: bool) -> Result<()> {
        self.api
            .send_command(
                Method::PUT,
                "/me/player",
                &[],
                Some(json!({ "device_ids": [device_id], "play": force_play })),
            )
            .await
    }

    // ============ Lecture ============

    /// Lance la lecture des URIs données sur l'appareil actif
    pub async fn start_playback(&self, uris: &[String]) -> Result<()> {
        self.api
            .send_command(
                Method::PUT,
                "/me/player/play",
                &[],
                Some(json!({ "uris": uris })),
            )
            .await
    }

    /// État de lecture courant, ou `None` si rien n'est en cours
    pub async fn currently_playing(&self) -> Result<Option<CurrentlyPlaying>> {
        self.api
            .get_optional("/me/player/currently-playing", &[])
            .await
    }

    /// Bascule lecture/pause selon l'état courant (sémantique du bouton unique)
    pub async fn toggle_playback(&self) -> Result<()> {
        let playing = self
            .currently_playing()
            .await?
            .map(|state| state.is_playing)
            .unwrap_or(false);

        if playing {
            self.api
                .send_command(Method::PUT, "/me/player/pause", &[], None)
                .await
        } else {
            self.api
                .send_command(Method::PUT, "/me/player/play", &[], None)
                .await
        }
    }

    /// Passe au morceau suivant de la lecture distante
    pub async fn next_track(&self) -> Result<()> {
        self.api
            .send_command(Method::POST, "/me/player/next", &[], None)
            .await
    }

    /// Revient au morceau précédent de la lecture distante
    pub async fn previous_track(&self) -> Result<()> {
        self.api
            .send_command(Method::POST, "/me/player/previous", &[], None)
            .await
    }

    /// Déplace la tête de lecture à la position donnée (millisecondes)
    pub async fn seek(&self, position_ms: u64) -> Result<()> {
        let position = position_ms.to_string();
        self.api
            .send_command(
                Method::PUT,
                "/me/player/seek",
                &[("position_ms", position.as_str())],
                None,
            )
            .await
    }

    // ============ Flux composé ============

    /// Recherche un morceau par titre/artiste et lance sa lecture
    ///
    /// Si aucun appareil n'est actif, transfère la lecture (avec lecture
    /// forcée) vers l'appareil préféré s'il est connecté, sinon vers le
    /// premier appareil disponible, puis réessaie une fois.
    /// Chaque issue remonte sa variante :
    /// - [`SpotifyError::TrackNotFound`] : rien dans le catalogue
    /// - [`SpotifyError::NoActiveDevice`] : aucun appareil actif ni disponible
    /// - [`SpotifyError::NotAuthenticated`] : jeton expiré ou refusé
    pub async fn play_resolved(&self, title: &str, artist: &str) -> Result<PlayedTrack> {
        let track = self.search_track(title, artist).await?;
        let uris = vec![track.uri.clone()];

        match self.start_playback(&uris).await {
            Ok(()) => {}
            Err(SpotifyError::NoActiveDevice) => {
                warn!("No active device, trying to transfer playback");
                let devices = self.devices().await?;
                let Some(device_id) = pick_device(&devices, self.preferred_device.as_deref())
                else {
                    return Err(SpotifyError::NoActiveDevice);
                };

                info!("Transferring playback to device {}", device_id);
                self.transfer_playback(&device_id, true).await?;
                self.start_playback(&uris).await?;
            }
            Err(e) => return Err(e),
        }

        info!("Playing '{}' by {}", track.name, track.artist_names());
        Ok(PlayedTrack::from(track))
    }
}

/// Choisit la cible d'un transfert de lecture
///
/// L'appareil préféré est retenu s'il figure parmi les appareils connectés,
/// sinon le premier appareil porteur d'un identifiant.
fn pick_device(devices: &[Device], preferred: Option<&str>) -> Option<String> {
    preferred
        .filter(|wanted| {
            devices
                .iter()
                .any(|device| device.id.as_deref() == Some(*wanted))
        })
        .map(str::to_string)
        .or_else(|| devices.iter().find_map(|device| device.id.clone()))
}

/// Résumé du morceau effectivement lancé, renvoyé à la couche appelante
#[derive(Debug, Clone, Serialize)]
pub struct PlayedTrack {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub cover_url: Option<String>,
    pub uri: String,
}

impl From<Track> for PlayedTrack {
    fn from(track: Track) -> Self {
        let artist = track.artist_names();
        let cover_url = track.album.cover_url().map(str::to_string);
        Self {
            name: track.name,
            artist,
            album: track.album.name,
            cover_url,
            uri: track.uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Album, Artist, Image};

    fn sample_track() -> Track {
        Track {
            id: "4vLYewWIvqHfKtJDk8c8tq".to_string(),
            name: "So What".to_string(),
            uri: "spotify:track:4vLYewWIvqHfKtJDk8c8tq".to_string(),
            artists: vec![Artist {
                id: None,
                name: "Miles Davis".to_string(),
            }],
            album: Album {
                id: "1weenld61qoidwYuZ1GESA".to_string(),
                name: "Kind of Blue".to_string(),
                images: vec![Image {
                    url: "https://i.scdn.co/image/large".to_string(),
                    width: Some(640),
                    height: Some(640),
                }],
            },
            duration_ms: 562_640,
        }
    }

    #[test]
    fn test_client_creation() {
        let mut client = SpotifyClient::new("token").unwrap();
        assert_eq!(client.market(), "ES");
        client.set_market("FR");
        assert_eq!(client.market(), "FR");
    }

    fn device(id: Option<&str>, name: &str) -> Device {
        Device {
            id: id.map(str::to_string),
            name: name.to_string(),
            is_active: false,
            device_type: "Speaker".to_string(),
            volume_percent: None,
        }
    }

    #[test]
    fn test_pick_device_prefers_configured_device() {
        let devices = vec![device(Some("salon"), "Salon"), device(Some("cuisine"), "Cuisine")];
        assert_eq!(
            pick_device(&devices, Some("cuisine")).as_deref(),
            Some("cuisine")
        );
    }

    #[test]
    fn test_pick_device_falls_back_to_first_available() {
        let devices = vec![device(None, "Web Player"), device(Some("salon"), "Salon")];
        // Préférence absente des appareils connectés ou non configurée
        assert_eq!(pick_device(&devices, Some("gone")).as_deref(), Some("salon"));
        assert_eq!(pick_device(&devices, None).as_deref(), Some("salon"));
        assert!(pick_device(&[device(None, "Web Player")], Some("gone")).is_none());
        assert!(pick_device(&[], None).is_none());
    }

    #[tokio::test]
    async fn test_seek_sends_position_in_query() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 2048];
            let n = socket.read(&mut buf).await.unwrap();
            socket
                .write_all(b"HTTP/1.1 204 No Content\r\ncontent-length: 0\r\n\r\n")
                .await
                .unwrap();
            String::from_utf8_lossy(&buf[..n]).to_string()
        });

        let client = SpotifyClient::with_base_url(
            format!("http://{}", addr),
            "token",
            Duration::from_secs(5),
        )
        .unwrap();
        client.seek(64_000).await.unwrap();

        let request = server.await.unwrap();
        assert!(
            request.starts_with("PUT /me/player/seek?position_ms=64000 "),
            "unexpected request line: {}",
            request.lines().next().unwrap_or("")
        );
    }

    #[test]
    fn test_played_track_from_model() {
        let played = PlayedTrack::from(sample_track());
        assert_eq!(played.name, "So What");
        assert_eq!(played.artist, "Miles Davis");
        assert_eq!(played.album, "Kind of Blue");
        assert_eq!(played.cover_url.as_deref(), Some("https://i.scdn.co/image/large"));
        assert_eq!(played.uri, "spotify:track:4vLYewWIvqHfKtJDk8c8tq");
    }
}
