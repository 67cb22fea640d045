//! End-to-end exercises of the room actor through its public handle,
//! driving full estimation rounds the way connected clients would.

use scrumdeck_protocol::{ParticipantId, RoomKey, StateSnapshot};
use scrumdeck_room::{RoomHandle, RoomManager};
use scrumdeck_session::SessionId;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

type Sink = UnboundedSender<Vec<u8>>;
type Rx = UnboundedReceiver<Vec<u8>>;

async fn join(room: &RoomHandle<Sink>, session: u64, id: &str, spectator: bool) -> Rx {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    room.attach(SessionId::new(session), ParticipantId::new(id), spectator, tx)
        .await
        .unwrap();
    rx
}

async fn send(room: &RoomHandle<Sink>, session: u64, json: &str) {
    room.frame(SessionId::new(session), json.as_bytes().to_vec())
        .await
        .unwrap();
}

fn last_snapshot(rx: &mut Rx) -> StateSnapshot {
    let mut last = None;
    while let Ok(frame) = rx.try_recv() {
        if let Ok(snapshot) = serde_json::from_slice(&frame) {
            last = Some(snapshot);
        }
    }
    last.expect("at least one snapshot delivered")
}

#[tokio::test]
async fn test_full_estimation_round() {
    let mut manager = RoomManager::new();
    let room = manager.handle_for(&RoomKey::new("sprint-42"));

    let mut rx_ana = join(&room, 1, "ana", false).await;
    let _rx_bob = join(&room, 2, "bob", false).await;
    let _rx_spy = join(&room, 3, "spy", true).await;

    // Both voters pick a card; votes stay hidden.
    send(&room, 1, r#"{"type":"vote","card":{"value":"5","color":"blue"}}"#).await;
    send(&room, 2, r#"{"type":"vote","card":{"value":"8","color":"red"}}"#).await;
    let snapshot = room.snapshot().await.unwrap();
    assert!(!snapshot.revealed);
    assert!(snapshot.users.iter().take(2).all(|u| u.vote.is_some()));

    // The spectator cannot vote.
    send(&room, 3, r#"{"type":"vote","card":{"value":"1","color":"green"}}"#).await;
    let snapshot = room.snapshot().await.unwrap();
    assert!(snapshot.users[2].vote.is_none());

    // Only the host ("ana", first voter to join) can reveal.
    send(&room, 2, r#"{"type":"reveal"}"#).await;
    assert!(!room.snapshot().await.unwrap().revealed);
    send(&room, 1, r#"{"type":"reveal"}"#).await;
    assert!(room.snapshot().await.unwrap().revealed);

    // Reset hides and clears everything for the next story.
    send(&room, 1, r#"{"type":"reset"}"#).await;
    let snapshot = room.snapshot().await.unwrap();
    assert!(!snapshot.revealed);
    assert!(snapshot.users.iter().all(|u| u.vote.is_none()));

    let seen = last_snapshot(&mut rx_ana);
    assert_eq!(seen.users.len(), 3);
}

#[tokio::test]
async fn test_host_succession_on_disconnect() {
    let mut manager = RoomManager::new();
    let room = manager.handle_for(&RoomKey::new("succession"));

    let _rx_spy = join(&room, 1, "spy", true).await;
    let _rx_ana = join(&room, 2, "ana", false).await;
    let _rx_bob = join(&room, 3, "bob", false).await;

    // "bob" has no authority while "ana" is present.
    send(&room, 3, r#"{"type":"reveal"}"#).await;
    assert!(!room.snapshot().await.unwrap().revealed);

    // The host role passes over the spectator to the next voter.
    room.detach(SessionId::new(2)).await.unwrap();
    send(&room, 3, r#"{"type":"reveal"}"#).await;
    assert!(room.snapshot().await.unwrap().revealed);
}

#[tokio::test]
async fn test_spectator_alone_has_no_host() {
    let mut manager = RoomManager::new();
    let room = manager.handle_for(&RoomKey::new("orphan"));

    let _rx_ana = join(&room, 1, "ana", false).await;
    let _rx_spy = join(&room, 2, "spy", true).await;

    send(&room, 1, r#"{"type":"setDeck","deckId":"fibonacci"}"#).await;
    send(&room, 1, r#"{"type":"vote","card":{"value":"5","color":"blue"}}"#).await;
    send(&room, 2, r#"{"type":"reveal"}"#).await;
    assert!(!room.snapshot().await.unwrap().revealed);
    send(&room, 1, r#"{"type":"reveal"}"#).await;
    assert!(room.snapshot().await.unwrap().revealed);

    // The only voter leaves; the remaining spectator holds no privilege.
    room.detach(SessionId::new(1)).await.unwrap();
    send(&room, 2, r#"{"type":"reset"}"#).await;
    let snapshot = room.snapshot().await.unwrap();
    assert!(snapshot.revealed, "reset from a spectator is a no-op");
    assert_eq!(snapshot.users.len(), 1);
}

#[tokio::test]
async fn test_deck_selection_resets_round() {
    let mut manager = RoomManager::new();
    let room = manager.handle_for(&RoomKey::new("decks"));
    let _rx = join(&room, 1, "ana", false).await;

    send(&room, 1, r#"{"type":"vote","card":{"value":"5","color":"blue"}}"#).await;
    send(&room, 1, r#"{"type":"reveal"}"#).await;
    send(&room, 1, r#"{"type":"setDeck","deckId":"tshirt"}"#).await;

    let snapshot = room.snapshot().await.unwrap();
    assert_eq!(snapshot.deck_id, "tshirt");
    assert!(!snapshot.revealed);
    assert!(snapshot.users[0].vote.is_none());
    assert!(snapshot.active_custom_deck.is_none());
}

#[tokio::test]
async fn test_custom_deck_lifecycle() {
    let mut manager = RoomManager::new();
    let room = manager.handle_for(&RoomKey::new("custom"));
    let _rx = join(&room, 1, "ana", false).await;

    send(
        &room,
        1,
        r#"{"type":"setCustomDeck","deck":{"id":"team","name":"Team deck","cards":[{"value":"XS","color":"teal"}]}}"#,
    )
    .await;
    let snapshot = room.snapshot().await.unwrap();
    assert_eq!(snapshot.deck_id, "team");
    assert_eq!(snapshot.active_custom_deck.as_ref().unwrap().name, "Team deck");

    // Switching back to a built-in deck drops the custom payload.
    send(&room, 1, r#"{"type":"setDeck","deckId":"fibonacci"}"#).await;
    let snapshot = room.snapshot().await.unwrap();
    assert_eq!(snapshot.deck_id, "fibonacci");
    assert!(snapshot.active_custom_deck.is_none());
}

#[tokio::test]
async fn test_profile_survives_tab_close_but_not_full_leave() {
    let mut manager = RoomManager::new();
    let room = manager.handle_for(&RoomKey::new("profiles"));

    let _tab1 = join(&room, 1, "ana", false).await;
    let _tab2 = join(&room, 2, "ana", false).await;
    send(&room, 1, r#"{"type":"setProfile","name":"Ana Byte","avatar":"cat"}"#).await;

    // One tab closing keeps the participant and their profile.
    room.detach(SessionId::new(2)).await.unwrap();
    let snapshot = room.snapshot().await.unwrap();
    assert_eq!(snapshot.users[0].name, "Ana Byte");
    assert_eq!(snapshot.users[0].avatar.as_deref(), Some("cat"));

    // A full leave and rejoin starts from defaults again.
    room.detach(SessionId::new(1)).await.unwrap();
    let _tab3 = join(&room, 3, "ana", false).await;
    let snapshot = room.snapshot().await.unwrap();
    assert_eq!(snapshot.users[0].name, "ana");
    assert!(snapshot.users[0].avatar.is_none());
}
