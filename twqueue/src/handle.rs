//! QueueHandle : accès partagé à la file de lecture

use crate::position::Position;
use crate::queue::core::QueueCore;
use crate::queue::entry::{EntryId, EntrySnapshot, ListedEntry, QueueSnapshot};
use crate::track::TrackInfo;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Poignée clonable sur une file partagée
///
/// [`QueueCore`] n'a aucune synchronisation interne ; cette poignée est la
/// frontière d'exclusion mutuelle exigée dès que plusieurs contextes de
/// requête touchent la même file. La couche propriétaire construit une
/// poignée au démarrage du processus et en passe un clone dans chaque
/// contexte — pas d'état global implicite.
///
/// Chaque opération prend le verrou, s'exécute d'un trait et le relâche.
#[derive(Clone, Default)]
pub struct QueueHandle {
    core: Arc<RwLock<QueueCore>>,
}

impl QueueHandle {
    /// Crée une file vide derrière une nouvelle poignée
    pub fn new() -> Self {
        Self::default()
    }

    /// Insère selon la directive de position et retourne l'identifiant attribué
    pub async fn insert(&self, track: TrackInfo, position: Position) -> EntryId {
        let mut core = self.core.write().await;
        let id = core.insert(track, position);
        debug!("Inserted entry {} at {:?} ({} entries)", id, position, core.len());
        id
    }

    /// Insère en tête de file
    pub async fn push_front(&self, track: TrackInfo) -> EntryId {
        self.insert(track, Position::Start).await
    }

    /// Insère en queue de file
    pub async fn push_back(&self, track: TrackInfo) -> EntryId {
        self.insert(track, Position::End).await
    }

    /// Retire une entrée par identifiant (`false` si inconnue)
    pub async fn remove(&self, id: &EntryId) -> bool {
        let mut core = self.core.write().await;
        let removed = core.remove(id);
        if removed {
            debug!("Removed entry {} ({} entries left)", id, core.len());
        }
        removed
    }

    /// Avance le curseur (voir [`QueueCore::advance`])
    pub async fn advance(&self) -> Option<EntrySnapshot> {
        self.core.write().await.advance()
    }

    /// Recule le curseur (voir [`QueueCore::retreat`])
    pub async fn retreat(&self) -> Option<EntrySnapshot> {
        self.core.write().await.retreat()
    }

    /// Place le curseur sur l'entrée donnée (`None` si inconnue)
    pub async fn select(&self, id: &EntryId) -> Option<EntrySnapshot> {
        self.core.write().await.select(id)
    }

    /// Instantané de l'entrée courante
    pub async fn current(&self) -> Option<EntrySnapshot> {
        self.core.read().await.current()
    }

    /// Listing complet annoté du marqueur de curseur
    pub async fn list(&self) -> Vec<ListedEntry> {
        self.core.read().await.list()
    }

    /// Vue sérialisable complète pour la couche de présentation
    pub async fn snapshot(&self) -> QueueSnapshot {
        self.core.read().await.snapshot()
    }

    /// Nombre d'entrées
    pub async fn len(&self) -> usize {
        self.core.read().await.len()
    }

    /// Vérifie si la file est vide
    pub async fn is_empty(&self) -> bool {
        self.core.read().await.is_empty()
    }
}
