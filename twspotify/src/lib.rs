//! # twspotify - Client de lecture distante Spotify pour TuneWeb
//!
//! Cette crate fournit le collaborateur « lecture distante » de TuneWeb : un
//! client Rust pour l'API Web Spotify couvrant la recherche catalogue et le
//! pilotage de la lecture sur les appareils de l'utilisateur.
//!
//! ## Vue d'ensemble
//!
//! `twspotify` permet :
//! - Recherche d'un morceau dans le catalogue par titre + artiste
//! - Lancement de la lecture sur l'appareil actif
//! - Repli automatique : transfert de la lecture vers un appareil disponible
//!   quand aucun n'est actif, puis nouvel essai
//! - Consultation du morceau en cours, bascule lecture/pause, sauts
//! - Listing et transfert des appareils de lecture
//!
//! Chaque issue distincte remonte sa propre variante d'erreur — « non
//! authentifié », « aucun appareil actif », « morceau introuvable » — afin que
//! la couche appelante puisse réagir différemment à chacune.
//!
//! Le jeton d'accès OAuth est une entrée : la couche session qui l'obtient et
//! le rafraîchit est hors du périmètre de cette crate.
//!
//! ## Architecture
//!
//! La crate suit le pattern en couches des autres crates TuneWeb :
//! - `SpotifyClient` : client principal haut-niveau
//! - `models` : structures de données (Track, Artist, Album, Device, etc.)
//! - `api` : couche d'accès à l'API REST Spotify
//! - `error` : gestion des erreurs
//! - `config_ext` : extension de `twconfig::Config`
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use twspotify::{SpotifyClient, SpotifyError};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Le jeton vient de la couche session (hors périmètre)
//!     let client = SpotifyClient::from_config("BQDe...access-token")?;
//!
//!     match client.play_resolved("So What", "Miles Davis").await {
//!         Ok(played) => println!("Lecture lancée : {}", played.name),
//!         Err(SpotifyError::TrackNotFound(query)) => println!("Introuvable : {}", query),
//!         Err(SpotifyError::NoActiveDevice) => println!("Ouvrez Spotify sur un appareil"),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config_ext;
pub mod error;
pub mod models;

pub use client::{PlayedTrack, SpotifyClient};
pub use config_ext::SpotifyConfigExt;
pub use error::{Result, SpotifyError};
pub use models::{Album, Artist, CurrentlyPlaying, Device, Image, SearchResponse, Track};
