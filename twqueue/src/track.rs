//! TrackInfo : descripteur de morceau fourni par la couche requête

use serde::{Deserialize, Serialize};

/// Descripteur d'un morceau placé dans la file personnalisée
///
/// Tous les champs sont possédés par valeur : ils sont copiés à l'insertion
/// et ne référencent jamais la structure appelante. La validation des champs
/// incombe à la couche requête ; la file les suppose bien formés et ne les
/// re-valide pas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    /// Durée affichable, au format libre de la couche de présentation (ex: "3:30")
    pub duration: String,
    #[serde(default)]
    pub album: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_album_defaults_to_empty() {
        let track: TrackInfo = serde_json::from_str(
            r#"{"title": "Paranoid", "artist": "Black Sabbath", "duration": "2:48"}"#,
        )
        .unwrap();
        assert_eq!(track.album, "");
    }

    #[test]
    fn test_full_descriptor_roundtrip() {
        let track: TrackInfo = serde_json::from_str(
            r#"{"title": "Aja", "artist": "Steely Dan", "duration": "7:57", "album": "Aja"}"#,
        )
        .unwrap();
        assert_eq!(track.title, "Aja");
        assert_eq!(track.album, "Aja");
    }
}
