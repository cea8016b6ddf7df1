//! QueueCore : chaîne doublement liée en arène avec curseur de lecture

use super::entry::{Entry, EntryId, EntrySnapshot, ListedEntry, QueueSnapshot};
use crate::position::Position;
use crate::track::TrackInfo;
use std::collections::HashMap;

/// Noyau de la file de lecture
///
/// Les entrées vivent dans une arène indexée par identifiant ; la chaîne est
/// tissée par les champs `prev`/`next` de chaque entrée. Invariants :
/// - chaîne acyclique et bidirectionnellement cohérente
/// - `head.prev` et `tail.next` toujours absents
/// - `current` absent ssi la file est vide, sinon il désigne une entrée de la chaîne
/// - le nombre d'entrées atteignables tête→queue égale la taille de l'arène
///
/// Aucune synchronisation interne : les mutations sont des mises à jour de
/// liens en plusieurs étapes, non atomiques dans leur ensemble. Tout accès
/// concurrent passe par [`crate::QueueHandle`].
#[derive(Debug, Default)]
pub struct QueueCore {
    entries: HashMap<EntryId, Entry>,
    head: Option<EntryId>,
    tail: Option<EntryId>,
    current: Option<EntryId>,
}

impl QueueCore {
    /// Crée une file vide
    pub fn new() -> Self {
        Self::default()
    }

    /// Nombre d'entrées
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Vérifie si la file est vide
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insère un morceau en tête de file, O(1)
    ///
    /// Si la file était vide, la nouvelle entrée devient tête, queue et
    /// curseur. Retourne l'identifiant attribué. Ne peut pas échouer.
    pub fn push_front(&mut self, track: TrackInfo) -> EntryId {
        let id = EntryId::new();
        let entry = Entry {
            id,
            track,
            prev: None,
            next: self.head,
        };

        match self.head {
            Some(old_head) => {
                if let Some(head) = self.entries.get_mut(&old_head) {
                    head.prev = Some(id);
                }
                self.head = Some(id);
            }
            None => {
                self.head = Some(id);
                self.tail = Some(id);
                self.current = Some(id);
            }
        }

        self.entries.insert(id, entry);
        id
    }

    /// Insère un morceau en queue de file, O(1)
    pub fn push_back(&mut self, track: TrackInfo) -> EntryId {
        let id = EntryId::new();
        let entry = Entry {
            id,
            track,
            prev: self.tail,
            next: None,
        };

        match self.tail {
            Some(old_tail) => {
                if let Some(tail) = self.entries.get_mut(&old_tail) {
                    tail.next = Some(id);
                }
                self.tail = Some(id);
            }
            None => {
                self.head = Some(id);
                self.tail = Some(id);
                self.current = Some(id);
            }
        }

        self.entries.insert(id, entry);
        id
    }

    /// Insère à la position donnée (0-indexée), en marchant depuis la tête
    ///
    /// `position <= 0` équivaut à [`push_front`](Self::push_front),
    /// `position >= len` à [`push_back`](Self::push_back) : les positions hors
    /// bornes sont bornées, jamais refusées. Sinon la nouvelle entrée est
    /// insérée immédiatement avant l'entrée occupant `position`.
    pub fn insert_at(&mut self, track: TrackInfo, position: i64) -> EntryId {
        if position <= 0 {
            return self.push_front(track);
        }
        if position as usize >= self.len() {
            return self.push_back(track);
        }

        let Some(at_id) = self.id_at(position as usize) else {
            // Inatteignable tant que les invariants tiennent (0 < position < len)
            return self.push_back(track);
        };
        let prev_id = self.entries.get(&at_id).and_then(|e| e.prev);

        let id = EntryId::new();
        let entry = Entry {
            id,
            track,
            prev: prev_id,
            next: Some(at_id),
        };

        match prev_id {
            Some(prev) => {
                if let Some(e) = self.entries.get_mut(&prev) {
                    e.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        if let Some(at) = self.entries.get_mut(&at_id) {
            at.prev = Some(id);
        }

        self.entries.insert(id, entry);
        id
    }

    /// Insère selon la directive de position de la couche requête
    pub fn insert(&mut self, track: TrackInfo, position: Position) -> EntryId {
        match position {
            Position::Start => self.push_front(track),
            Position::End => self.push_back(track),
            Position::At(index) => self.insert_at(track, index),
        }
    }

    /// Retire l'entrée d'identité donnée
    ///
    /// Retourne `false` si aucune entrée ne porte cet identifiant (signal
    /// « inconnu », pas une erreur). Si l'entrée retirée portait le curseur,
    /// celui-ci est relogé : voisin suivant d'abord ; à défaut (l'entrée était
    /// la queue) le prédécesseur ; à défaut (la file devient vide) désarmé.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        let Some(entry) = self.entries.remove(id) else {
            return false;
        };
        let (prev, next) = (entry.prev, entry.next);

        match prev {
            Some(p) => {
                if let Some(e) = self.entries.get_mut(&p) {
                    e.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(e) = self.entries.get_mut(&n) {
                    e.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if self.current == Some(*id) {
            self.current = match (next, prev) {
                (Some(n), _) => Some(n),
                // L'entrée retirée était la queue : reculer sur son prédécesseur
                (None, Some(p)) => Some(p),
                // La file devient vide
                (None, None) => None,
            };
        }

        true
    }

    /// Avance le curseur sur le voisin suivant
    ///
    /// Retourne un instantané de la nouvelle entrée courante, ou `None` si le
    /// curseur est en queue (pas de bouclage, curseur inchangé).
    pub fn advance(&mut self) -> Option<EntrySnapshot> {
        let next = self.current_entry().and_then(|e| e.next)?;
        self.current = Some(next);
        self.entries.get(&next).map(EntrySnapshot::of)
    }

    /// Recule le curseur sur le voisin précédent (symétrique de [`advance`](Self::advance))
    pub fn retreat(&mut self) -> Option<EntrySnapshot> {
        let prev = self.current_entry().and_then(|e| e.prev)?;
        self.current = Some(prev);
        self.entries.get(&prev).map(EntrySnapshot::of)
    }

    /// Place le curseur sur l'entrée d'identité donnée
    ///
    /// Retourne `None` (curseur inchangé) si l'identifiant est inconnu.
    pub fn select(&mut self, id: &EntryId) -> Option<EntrySnapshot> {
        let snapshot = self.entries.get(id).map(EntrySnapshot::of)?;
        self.current = Some(*id);
        Some(snapshot)
    }

    /// Instantané de l'entrée courante, ou `None` si la file est vide
    pub fn current(&self) -> Option<EntrySnapshot> {
        self.current_entry().map(EntrySnapshot::of)
    }

    /// Traversée complète tête→queue, recalculée à chaque appel
    ///
    /// Chaque élément porte le marqueur `is_current` ; exactement un élément
    /// le porte dès que la file n'est pas vide. Lecture seule.
    pub fn list(&self) -> Vec<ListedEntry> {
        let mut listed = Vec::with_capacity(self.len());
        let mut cursor = self.head;

        while let Some(id) = cursor {
            let Some(entry) = self.entries.get(&id) else {
                break;
            };
            listed.push(ListedEntry {
                entry: EntrySnapshot::of(entry),
                is_current: self.current == Some(id),
            });
            cursor = entry.next;
        }

        listed
    }

    /// Vue sérialisable complète (listing + taille) pour la présentation
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            entries: self.list(),
            size: self.len(),
        }
    }

    /// Identifiant de l'entrée à la position donnée (marche depuis la tête, O(n))
    fn id_at(&self, position: usize) -> Option<EntryId> {
        let mut cursor = self.head;
        for _ in 0..position {
            cursor = cursor
                .and_then(|id| self.entries.get(&id))
                .and_then(|e| e.next);
        }
        cursor
    }

    fn current_entry(&self) -> Option<&Entry> {
        self.current.and_then(|id| self.entries.get(&id))
    }
}
