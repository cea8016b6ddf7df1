//! Exemple d'utilisation basique de twspotify
//!
//! Cet exemple montre comment :
//! - Créer un client depuis la configuration
//! - Rechercher un morceau par titre et artiste
//! - Lancer la lecture avec repli sur transfert d'appareil
//!
//! Usage:
//! ```bash
//! SPOTIFY_TOKEN=BQDe... cargo run --example play_search -- "So What" "Miles Davis"
//! ```

use twspotify::{SpotifyClient, SpotifyError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialiser le logging
    tracing_subscriber::fmt::init();

    let token = std::env::var("SPOTIFY_TOKEN")
        .map_err(|_| anyhow::anyhow!("SPOTIFY_TOKEN environment variable not set"))?;

    let mut args = std::env::args().skip(1);
    let title = args.next().unwrap_or_else(|| "So What".to_string());
    let artist = args.next().unwrap_or_else(|| "Miles Davis".to_string());

    println!("=== TuneWeb - Lecture Spotify ===\n");

    let client = SpotifyClient::from_config(token)?;

    println!("--- Appareils disponibles ---");
    for device in client.devices().await? {
        let marker = if device.is_active { "*" } else { " " };
        println!(
            "  {} {} ({})",
            marker,
            device.name,
            device.device_type
        );
    }

    println!("\n--- Lecture ---");
    println!("Recherche: '{}' de {}...", title, artist);

    match client.play_resolved(&title, &artist).await {
        Ok(played) => {
            println!("✓ Lecture lancée !");
            println!("  Titre: {}", played.name);
            println!("  Artiste: {}", played.artist);
            println!("  Album: {}", played.album);
            if let Some(cover) = &played.cover_url {
                println!("  Couverture: {}", cover);
            }
        }
        Err(SpotifyError::TrackNotFound(query)) => {
            println!("✗ Aucun résultat pour '{}'", query);
        }
        Err(SpotifyError::NoActiveDevice) => {
            println!("✗ Aucun appareil de lecture disponible.");
            println!("  Ouvrez Spotify sur un appareil puis réessayez.");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
