//! GameSession query-state orchestration against the mock fullnode

use noughts::{
    Address, ClientError, GameClient, GameSession, Mark, Position, Trophy, TurnIndicator, Winner,
};

use crate::mocks::MockRpc;

fn package() -> Address {
    Address::parse("0xca5e").unwrap()
}

fn game_id() -> Address {
    Address::parse("0x9a3e").unwrap()
}

fn player_x() -> Address {
    Address::parse("0xa11ce").unwrap()
}

fn player_o() -> Address {
    Address::parse("0xb0b").unwrap()
}

fn session_with(rpc: MockRpc, signer: Option<Address>) -> GameSession<MockRpc> {
    GameSession::new(GameClient::new(rpc, package(), signer), game_id())
}

fn put_fresh_game(rpc: &MockRpc, kind: &str) {
    rpc.put_game(
        &game_id(),
        &package(),
        kind,
        vec![0; 9],
        0,
        &player_x(),
        &player_o(),
    );
}

#[test]
fn test_new_session_starts_pending() {
    let session = session_with(MockRpc::new(), None);
    assert!(session.game().is_pending());
    assert!(session.trophy().is_pending());
    assert!(session.turn_indicator().is_none());
    assert!(session.winner().is_none());
}

#[tokio::test]
async fn test_refresh_fills_both_queries() {
    let rpc = MockRpc::new();
    put_fresh_game(&rpc, "shared");
    let mut session = session_with(rpc, Some(player_x()));

    session.refresh().await;

    assert!(session.game().ready().is_some());
    assert_eq!(session.trophy().ready(), Some(&Trophy::None));
    assert_eq!(session.turn_indicator(), Some(TurnIndicator::Yours));
    assert_eq!(session.winner(), Some(Winner::None));
}

#[tokio::test]
async fn test_refresh_failure_is_terminal_until_retried() {
    let rpc = MockRpc::new();
    let mut session = session_with(rpc, None);

    session.refresh().await;
    assert!(matches!(
        session.game().error(),
        Some(ClientError::NotFound { .. })
    ));
    // The trophy query depends on the game's kind, so it never ran.
    assert!(session.trophy().is_pending());

    // A later retry can succeed.
    put_fresh_game(session.client().rpc(), "shared");
    session.refresh().await;
    assert!(session.game().ready().is_some());
}

#[tokio::test]
async fn test_place_mark_refetches_only_after_confirmation() {
    let rpc = MockRpc::new();
    put_fresh_game(&rpc, "shared");
    let mut session = session_with(rpc, Some(player_x()));
    session.refresh().await;

    session
        .place_mark(Position::new(0, 0).unwrap())
        .await
        .unwrap();

    // Submission, confirmation, then the two refetches, in that order.
    let calls = session.client().rpc().calls();
    assert_eq!(
        calls,
        vec![
            "get_object",
            "dev_inspect",
            "execute_transaction",
            "wait_for_transaction",
            "get_object",
            "dev_inspect",
        ]
    );

    let game = session.game().ready().unwrap();
    assert_eq!(game.turn, 1);
    assert_eq!(game.board.get(Position::new(0, 0).unwrap()), Mark::X);
    assert_eq!(session.turn_indicator(), Some(TurnIndicator::Theirs));
}

#[tokio::test]
async fn test_place_mark_on_owned_game_changes_nothing() {
    let rpc = MockRpc::new();
    put_fresh_game(&rpc, "owned");
    let mut session = session_with(rpc, Some(player_x()));
    session.refresh().await;
    let calls_before = session.client().rpc().call_count();

    session
        .place_mark(Position::new(0, 0).unwrap())
        .await
        .unwrap();

    // No submission, no refetch.
    assert_eq!(session.client().rpc().call_count(), calls_before);
    assert_eq!(session.game().ready().unwrap().turn, 0);
}

#[tokio::test]
async fn test_place_mark_before_refresh_is_rejected() {
    let rpc = MockRpc::new();
    put_fresh_game(&rpc, "shared");
    let mut session = session_with(rpc, Some(player_x()));

    let err = session
        .place_mark(Position::new(0, 0).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidMove { .. }));
}

#[tokio::test]
async fn test_burn_invalidates_both_queries() {
    let rpc = MockRpc::new();
    put_fresh_game(&rpc, "shared");
    let mut session = session_with(rpc, Some(player_x()));
    session.refresh().await;

    session.burn().await.unwrap();

    assert!(session.game().is_pending());
    assert!(session.trophy().is_pending());
}

#[tokio::test]
async fn test_won_game_reported_through_session() {
    let rpc = MockRpc::new();
    rpc.put_game(
        &game_id(),
        &package(),
        "shared",
        vec![1, 1, 1, 2, 2, 0, 0, 0, 0],
        5,
        &player_x(),
        &player_o(),
    );
    rpc.set_trophy(&game_id(), 2);

    // X made the winning move on an odd turn.
    let mut session = session_with(rpc, Some(player_x()));
    session.refresh().await;
    assert_eq!(session.winner(), Some(Winner::You));
}
