//! Types d'erreurs pour twqueue

/// Erreurs de la file de lecture
///
/// La taxonomie est volontairement étroite : les conditions « introuvable »
/// sont signalées par des retours `Option`/`bool` et ne passent jamais par ce
/// type. Seules les violations de contrat côté appelant remontent en erreur.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid entry id: {0}")]
    InvalidEntryId(String),
}

/// Type Result spécialisé pour twqueue
pub type Result<T> = std::result::Result<T, Error>;
