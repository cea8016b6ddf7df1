//! Structures de données pour représenter les objets de l'API Web Spotify

use serde::{Deserialize, Serialize};

/// Représente un artiste Spotify
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    /// Identifiant unique de l'artiste
    #[serde(default)]
    pub id: Option<String>,
    /// Nom de l'artiste
    pub name: String,
}

/// Image de couverture (plusieurs tailles par album)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Représente un album Spotify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    /// Identifiant unique de l'album
    pub id: String,
    /// Titre de l'album
    pub name: String,
    /// Images de couverture, de la plus grande à la plus petite
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Album {
    /// URL de la plus grande couverture disponible
    pub fn cover_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }
}

/// Représente une piste (track) Spotify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Identifiant unique de la piste
    pub id: String,
    /// Titre de la piste
    pub name: String,
    /// URI de lecture (`spotify:track:...`)
    pub uri: String,
    /// Artistes de la piste
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// Album contenant la piste
    pub album: Album,
    /// Durée en millisecondes
    #[serde(default)]
    pub duration_ms: u64,
}

impl Track {
    /// Noms d'artistes joints par ", " (format attendu par la présentation)
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Appareil de lecture connecté au compte
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Identifiant de l'appareil (absent pour certains appareils restreints)
    pub id: Option<String>,
    /// Nom affichable de l'appareil
    pub name: String,
    /// Indique si l'appareil est actuellement actif
    pub is_active: bool,
    /// Type d'appareil (Computer, Smartphone, Speaker, ...)
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub volume_percent: Option<u8>,
}

/// Réponse de `/me/player/devices`
#[derive(Debug, Clone, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

/// Page de résultats paginés
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u32,
}

/// Réponse de `/search` (restreinte au type `track`)
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Page<Track>,
}

/// État de lecture courant (`/me/player/currently-playing`)
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlaying {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    /// Piste en cours ; absente entre deux lectures
    #[serde(default)]
    pub item: Option<Track>,
}
