use move_trainer::{
    MemoryStore, MoveVerdict, ProgressStore, Puzzle, SequenceSession, SessionMode, SessionStatus,
    TrainerError,
};

fn session(fen: &str, moves: &[&str], mode: SessionMode) -> SequenceSession {
    SequenceSession::new(
        fen,
        moves.iter().map(|s| s.to_string()).collect(),
        mode,
        "test_sequence",
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn a_single_move_puzzle_solves_and_records_progress() {
    let puzzle = Puzzle::by_id("002").unwrap();
    let mut session = puzzle.session(SessionMode::Practice).unwrap();
    let mut store = MemoryStore::new();

    let verdict = session
        .play_user_move(&mut store, "e1", "e8", None)
        .unwrap();
    assert_eq!(verdict, MoveVerdict::Solved);
    assert_eq!(session.status(), SessionStatus::Succeeded);
    assert!(!session.reply_pending());
    assert_eq!(store.get("puzzle_solved_002").as_deref(), Some("true"));
}

#[tokio::test(start_paused = true)]
async fn a_scripted_reply_plays_back_between_user_moves() {
    // 1. Qe8+ Rxe8 2. Rxe8#
    let puzzle = Puzzle::by_id("004").unwrap();
    let mut session = puzzle.session(SessionMode::Practice).unwrap();
    let mut store = MemoryStore::new();

    let verdict = session
        .play_user_move(&mut store, "e4", "e8", None)
        .unwrap();
    assert_eq!(verdict, MoveVerdict::Advanced);
    assert!(session.reply_pending());
    // the solver may not jump the queue
    assert!(matches!(
        session.play_user_move(&mut store, "e1", "e8", None),
        Err(TrainerError::NotSolving)
    ));

    let reply = session.play_scheduled_reply().await.unwrap();
    assert_eq!(reply, "a8e8");
    assert!(!session.reply_pending());

    let verdict = session
        .play_user_move(&mut store, "e1", "e8", None)
        .unwrap();
    assert_eq!(verdict, MoveVerdict::Solved);
    assert_eq!(store.get("puzzle_solved_004").as_deref(), Some("true"));
}

#[tokio::test(start_paused = true)]
async fn a_wrong_move_shows_then_reverts_byte_for_byte() {
    let mut session = session(
        "r5k1/5ppp/8/8/4Q3/8/5PPP/4R1K1 w - - 0 1",
        &["e4e8", "a8e8", "e1e8"],
        SessionMode::Practice,
    );
    let mut store = MemoryStore::new();
    let before = session.fen();

    let verdict = session
        .play_user_move(&mut store, "e4", "e5", None)
        .unwrap();
    assert_eq!(verdict, MoveVerdict::Rejected);
    assert_eq!(session.status(), SessionStatus::Failed);
    // the wrong move is left visible until recovery
    assert_ne!(session.fen(), before);
    assert_eq!(session.cursor(), 0);

    session.recover().await.unwrap();
    assert_eq!(session.fen(), before);
    assert_eq!(session.status(), SessionStatus::Solving);
    assert_eq!(store.get("test_sequence"), None);

    // and the sequence is still solvable afterwards
    let verdict = session
        .play_user_move(&mut store, "e4", "e8", None)
        .unwrap();
    assert_eq!(verdict, MoveVerdict::Advanced);
}

#[tokio::test(start_paused = true)]
async fn rush_mode_counts_strikes_and_ends_at_the_limit() {
    let mut session = session(
        "6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1",
        &["e1e8"],
        SessionMode::Rush { strike_limit: 2 },
    );
    let mut store = MemoryStore::new();

    let verdict = session
        .play_user_move(&mut store, "e1", "e2", None)
        .unwrap();
    assert_eq!(verdict, MoveVerdict::Rejected);
    assert_eq!(session.strikes(), 1);
    assert_eq!(session.status(), SessionStatus::Failed);
    session.recover().await.unwrap();

    let verdict = session
        .play_user_move(&mut store, "e1", "e3", None)
        .unwrap();
    assert_eq!(verdict, MoveVerdict::Rejected);
    assert_eq!(session.strikes(), 2);
    assert_eq!(session.status(), SessionStatus::Ended);

    // the run is over for good: no recovery, no more moves
    assert!(session.recover().await.is_err());
    assert!(matches!(
        session.play_user_move(&mut store, "e1", "e8", None),
        Err(TrainerError::NotSolving)
    ));
    assert_eq!(store.get("test_sequence"), None);
}

#[tokio::test(start_paused = true)]
async fn a_bare_script_entry_accepts_any_promotion() {
    let mut session = session("8/4P3/8/8/8/8/8/K6k w - - 0 1", &["e7e8"], SessionMode::Practice);
    let mut store = MemoryStore::new();

    let verdict = session
        .play_user_move(&mut store, "e7", "e8", Some('n'))
        .unwrap();
    assert_eq!(verdict, MoveVerdict::Solved);
    // the knight promotion really happened on the board
    assert!(session.fen().starts_with("4N3/"));
}

#[tokio::test(start_paused = true)]
async fn solving_twice_only_writes_progress_once() {
    let mut session = session(
        "6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1",
        &["e1e8"],
        SessionMode::Practice,
    );
    let mut store = MemoryStore::new();

    session.play_user_move(&mut store, "e1", "e8", None).unwrap();
    assert_eq!(store.get("test_sequence").as_deref(), Some("true"));

    session.reset().unwrap();
    store.set("test_sequence", "tampered");
    session.play_user_move(&mut store, "e1", "e8", None).unwrap();
    // the completion side effect fires only on the first solve
    assert_eq!(store.get("test_sequence").as_deref(), Some("tampered"));
}
