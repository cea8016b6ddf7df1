//! Entry : maillon de l'arène avec identité stable

use crate::error::Error;
use crate::track::TrackInfo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant opaque d'une entrée de la file
///
/// Attribué à la création, immuable, jamais réutilisé même après suppression
/// (UUID v4 aléatoire). Les appelants ne doivent supposer ni ordre ni
/// structure dans la valeur ; au bord du système il circule comme une chaîne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = Error;

    /// Un identifiant mal formé est une violation de contrat côté appelant
    fn from_str(s: &str) -> Result<Self, Error> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| Error::InvalidEntryId(s.to_string()))
    }
}

impl Serialize for EntryId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Maillon de l'arène : le morceau et ses liens avant/arrière
///
/// Les liens sont des identifiants, pas des références : la chaîne appartient
/// à la structure, jamais aux entrées elles-mêmes.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub id: EntryId,
    pub track: TrackInfo,
    pub prev: Option<EntryId>,
    pub next: Option<EntryId>,
}

/// Copie immuable des champs descriptifs d'une entrée
///
/// Découplée de la structure vivante : la couche appelante peut la conserver
/// ou la sérialiser sans tenir de verrou.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub id: EntryId,
    pub title: String,
    pub artist: String,
    pub duration: String,
    pub album: String,
}

impl EntrySnapshot {
    pub(crate) fn of(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            title: entry.track.title.clone(),
            artist: entry.track.artist.clone(),
            duration: entry.track.duration.clone(),
            album: entry.track.album.clone(),
        }
    }
}

/// Élément du listing complet, annoté du marqueur de curseur
#[derive(Debug, Clone, Serialize)]
pub struct ListedEntry {
    #[serde(flatten)]
    pub entry: EntrySnapshot,
    pub is_current: bool,
}

/// Vue sérialisable complète de la file, consommée par la présentation
#[derive(Debug, Clone, Serialize)]
pub struct QueueSnapshot {
    pub entries: Vec<ListedEntry>,
    pub size: usize,
}
