use twqueue::{EntryId, Position, QueueCore, QueueHandle, TrackInfo};

fn track(title: &str, artist: &str) -> TrackInfo {
    TrackInfo {
        title: title.to_string(),
        artist: artist.to_string(),
        duration: "3:30".to_string(),
        album: String::new(),
    }
}

#[test]
fn test_empty_queue_behaviour() {
    let mut queue = QueueCore::new();

    assert!(queue.current().is_none());
    assert!(queue.list().is_empty());
    assert!(queue.advance().is_none());
    assert!(queue.retreat().is_none());

    let ghost: EntryId = "7f6f75e0-61a3-4c3f-8f63-8b3f0cf0a0aa".parse().unwrap();
    assert!(!queue.remove(&ghost));

    let snapshot = queue.snapshot();
    assert_eq!(snapshot.size, 0);
    assert!(snapshot.entries.is_empty());
}

#[test]
fn test_size_tracks_inserts_and_removals() {
    let mut queue = QueueCore::new();
    let mut ids = Vec::new();

    for i in 0..10 {
        ids.push(queue.insert(track(&format!("T{}", i), "A"), Position::End));
    }
    assert_eq!(queue.len(), 10);

    let mut removed = 0;
    for id in ids.iter().step_by(2) {
        assert!(queue.remove(id));
        removed += 1;
    }
    // Retirer une seconde fois échoue sans toucher la taille
    assert!(!queue.remove(&ids[0]));
    assert_eq!(queue.len(), 10 - removed);
}

#[test]
fn test_position_clamping_equivalences() {
    // position <= 0 équivaut à une insertion en tête
    let mut by_index = QueueCore::new();
    by_index.push_back(track("A", "x"));
    by_index.insert_at(track("B", "x"), -3);

    let mut by_front = QueueCore::new();
    by_front.push_back(track("A", "x"));
    by_front.push_front(track("B", "x"));

    let titles = |q: &QueueCore| -> Vec<String> { q.list().into_iter().map(|l| l.entry.title).collect() };
    assert_eq!(titles(&by_index), titles(&by_front));

    // position >= taille équivaut à une insertion en queue
    let mut past_end = QueueCore::new();
    past_end.push_back(track("A", "x"));
    past_end.insert_at(track("B", "x"), 7);
    assert_eq!(titles(&past_end), ["A", "B"]);
}

#[test]
fn test_listing_tags_exactly_one_current() {
    let mut queue = QueueCore::new();
    for i in 0..5 {
        queue.insert(track(&format!("T{}", i), "A"), Position::End);
    }

    let listed = queue.list();
    assert_eq!(listed.len(), queue.len());
    assert_eq!(listed.iter().filter(|l| l.is_current).count(), 1);

    queue.advance();
    queue.advance();
    let listed = queue.list();
    assert_eq!(listed.iter().filter(|l| l.is_current).count(), 1);
    assert!(listed[2].is_current);
}

// Scénario scripté : A en queue, B en tête, C en position 1, retrait de A.
#[test]
fn test_scripted_cursor_relocation_scenario() {
    let mut queue = QueueCore::new();

    // File vide -> [A], curseur = A
    let a = queue.insert(track("A", "one"), Position::End);
    assert_eq!(queue.current().unwrap().id, a);

    // [B, A], curseur inchangé = A
    let b = queue.insert(track("B", "two"), Position::Start);
    assert_eq!(queue.current().unwrap().id, a);

    // [B, C, A]
    let c = queue.insert(track("C", "three"), Position::At(1));
    let order: Vec<EntryId> = queue.list().into_iter().map(|l| l.entry.id).collect();
    assert_eq!(order, [b, c, a]);

    // A est la queue et porte le curseur : après retrait, curseur = C (son prédécesseur)
    assert!(queue.remove(&a));
    assert_eq!(queue.current().unwrap().id, c);

    // C est désormais la queue : avancer ne fait rien
    assert!(queue.advance().is_none());
    assert_eq!(queue.current().unwrap().id, c);

    // Reculer retourne l'instantané de B et y place le curseur
    let snapshot = queue.retreat().unwrap();
    assert_eq!(snapshot.id, b);
    assert_eq!(snapshot.title, "B");
    assert_eq!(queue.current().unwrap().id, b);
}

#[test]
fn test_select_moves_cursor_and_returns_snapshot() {
    let mut queue = QueueCore::new();
    let _a = queue.push_back(track("A", "one"));
    let b = queue.push_back(track("B", "two"));

    let snapshot = queue.select(&b).unwrap();
    assert_eq!(snapshot.artist, "two");
    assert_eq!(queue.current().unwrap().id, b);

    let ghost: EntryId = "3f2f0a34-6a07-4b5e-9f89-d4e5c2a8b111".parse().unwrap();
    assert!(queue.select(&ghost).is_none());
}

#[test]
fn test_snapshot_serializes_presentation_shape() {
    let mut queue = QueueCore::new();
    queue.push_back(TrackInfo {
        title: "So What".into(),
        artist: "Miles Davis".into(),
        duration: "9:22".into(),
        album: "Kind of Blue".into(),
    });

    let json = serde_json::to_value(queue.snapshot()).unwrap();
    assert_eq!(json["size"], 1);
    let entry = &json["entries"][0];
    assert_eq!(entry["title"], "So What");
    assert_eq!(entry["artist"], "Miles Davis");
    assert_eq!(entry["duration"], "9:22");
    assert_eq!(entry["album"], "Kind of Blue");
    assert_eq!(entry["is_current"], true);
    assert!(entry["id"].is_string());
}

#[tokio::test]
async fn test_handle_shared_between_contexts() {
    let queue = QueueHandle::new();

    // Chaque contexte de requête reçoit son clone de la poignée
    let writer = queue.clone();
    let inserted = tokio::spawn(async move {
        let mut ids = Vec::new();
        for i in 0..20 {
            ids.push(writer.push_back(track(&format!("T{}", i), "A")).await);
        }
        ids
    })
    .await
    .unwrap();

    assert_eq!(queue.len().await, 20);
    assert!(queue.remove(&inserted[0]).await);
    assert!(!queue.remove(&inserted[0]).await);
    assert_eq!(queue.len().await, 19);

    let listed = queue.list().await;
    assert_eq!(listed.iter().filter(|l| l.is_current).count(), 1);
}

#[tokio::test]
async fn test_handle_insert_parses_wire_position() {
    let queue = QueueHandle::new();
    queue.push_back(track("A", "x")).await;

    // Directive telle que reçue de la couche requête : valeur inconnue -> queue
    let position: Position = serde_json::from_str(r#""somewhere""#).unwrap();
    assert_eq!(position, Position::End);
    queue.insert(track("B", "x"), position).await;

    let titles: Vec<String> = queue
        .list()
        .await
        .into_iter()
        .map(|l| l.entry.title)
        .collect();
    assert_eq!(titles, ["A", "B"]);
}
