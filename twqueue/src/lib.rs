//! # twqueue - File de lecture personnalisée à curseur
//!
//! Cette crate fournit la structure de file de lecture de TuneWeb :
//! - Collection ordonnée d'entrées à identité stable (chaîne doublement liée
//!   implémentée en arène, jamais de pointeurs partagés bruts)
//! - Insertion en tête, en queue ou à une position arbitraire (bornée)
//! - Suppression par identifiant avec relogement du curseur
//! - Curseur de lecture unique (« morceau courant ») avançable et reculable
//! - Listing complet annoté du marqueur de curseur
//!
//! # Architecture
//!
//! - **QueueCore** : structure pure, sans synchronisation interne
//! - **QueueHandle** : poignée clonable `Arc<RwLock<QueueCore>>`, frontière de
//!   synchronisation explicite construite par la couche propriétaire
//! - **TrackInfo** : descripteur de morceau fourni par la couche requête
//! - **Position** : directive d'insertion (`start`, `end` ou index)
//!
//! Les conditions « introuvable » ou « aux bornes » sont signalées par des
//! retours `Option`/`bool`, jamais par des erreurs ; la seule erreur dure est
//! un identifiant mal formé côté appelant.
//!
//! # Exemple d'utilisation
//!
//! ```
//! use twqueue::{Position, QueueHandle, TrackInfo};
//!
//! # #[tokio::main]
//! # async fn main() {
//! // Construite une seule fois par la couche propriétaire
//! let queue = QueueHandle::new();
//!
//! let track = TrackInfo {
//!     title: "So What".into(),
//!     artist: "Miles Davis".into(),
//!     duration: "9:22".into(),
//!     album: "Kind of Blue".into(),
//! };
//!
//! let id = queue.insert(track, Position::End).await;
//! assert_eq!(queue.current().await.map(|c| c.id), Some(id));
//!
//! for listed in queue.list().await {
//!     println!("{} - {} (courant: {})", listed.entry.artist, listed.entry.title, listed.is_current);
//! }
//! # }
//! ```

mod error;
mod handle;
mod position;
mod queue;
mod track;

// Réexports publics
pub use error::{Error, Result};
pub use handle::QueueHandle;
pub use position::Position;
pub use queue::core::QueueCore;
pub use queue::entry::{EntryId, EntrySnapshot, ListedEntry, QueueSnapshot};
pub use track::TrackInfo;
