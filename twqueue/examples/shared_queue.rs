//! Exemple : une file partagée entre plusieurs contextes de requête
//!
//! Lance quelques tâches qui insèrent des morceaux via des clones de la
//! poignée, puis affiche l'instantané JSON consommé par la présentation.
//!
//! ```bash
//! cargo run --example shared_queue
//! ```

use twqueue::{Position, QueueHandle, TrackInfo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    // Construite une seule fois, au démarrage du processus
    let queue = QueueHandle::new();

    let seeds = [
        ("Blue in Green", "Miles Davis", "5:37", "Kind of Blue"),
        ("Take Five", "Dave Brubeck", "5:24", "Time Out"),
        ("Goodbye Pork Pie Hat", "Charles Mingus", "5:44", "Mingus Ah Um"),
    ];

    let mut workers = Vec::new();
    for (title, artist, duration, album) in seeds {
        let handle = queue.clone();
        workers.push(tokio::spawn(async move {
            handle
                .insert(
                    TrackInfo {
                        title: title.to_string(),
                        artist: artist.to_string(),
                        duration: duration.to_string(),
                        album: album.to_string(),
                    },
                    Position::End,
                )
                .await
        }));
    }
    for worker in workers {
        worker.await?;
    }

    queue.advance().await;

    let snapshot = queue.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(current) = queue.current().await {
        println!("En cours : {} - {}", current.artist, current.title);
    }

    Ok(())
}
