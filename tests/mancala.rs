use std::{sync::Arc, time::{Duration, Instant}};

use mancala_search::{config::SearchConfig, engine::{AlphaBetaSearch, Evaluator, IterativeDeepening, MemoMode, MinimaxSearch, SearchParams, SearchableState}, game::{utility::StoreDifference, Game}, rules::{mancala::Mancala, Player}, testing::fingerprint::FingerprintAudit};


// Pit 0 captures the ten stones across from pit 1.
fn capture_available() -> Mancala {
    return Mancala::from_board(vec![1, 0, 0, 0, 1, 1, 0, 1, 1, 1, 1, 10, 1, 0], Player::One).unwrap();
}


#[test]
fn whose_turn_it_is_changes_the_fingerprint() {
    let board = vec![3, 0, 2, 4, 1, 5, 9, 2, 2, 0, 6, 1, 3, 10];
    let one = Mancala::from_board(board.clone(), Player::One).unwrap();
    let two = Mancala::from_board(board, Player::Two).unwrap();
    assert_ne!(one.fingerprint(), two.fingerprint());
    assert_eq!(one.fingerprint(), one.clone().fingerprint());
}

#[test]
fn clones_are_independent() {
    let original = Mancala::default();
    let mut copy = original.clone();
    copy.do_action(&3).unwrap();
    assert_eq!(original, Mancala::default());
    assert_ne!(copy, original);
    assert_ne!(copy.fingerprint(), original.fingerprint());
}

#[test]
fn illegal_pits_are_rejected_through_the_trait() {
    let mut board = Mancala::default();
    assert!(board.do_action(&6).is_err());
    assert!(board.do_action(&9).is_err());
    assert_eq!(board, Mancala::default());
}

#[test]
fn a_one_ply_search_takes_the_capture() {
    let evaluator = StoreDifference::new(Player::One);
    let params = SearchParams::new(1).with_max_time(Duration::from_secs(5));
    let action = AlphaBetaSearch::search(&capture_available(), &evaluator, &params, Instant::now()).unwrap();
    assert_eq!(action, 0);
}

#[test]
fn extra_turn_layers_match_unpruned_minimax() {
    let board = Mancala::with_size(4, 2).unwrap();
    let evaluator = StoreDifference::new(Player::One);
    for depth in 1..=6 {
        let expected = MinimaxSearch::value(&board, &evaluator, depth).unwrap();
        let params = SearchParams::new(depth).with_max_time(Duration::from_secs(30)).with_memo_mode(MemoMode::Strict);
        let report = AlphaBetaSearch::run(&board, &evaluator, &params, Instant::now()).unwrap();
        assert_eq!(report.value, expected, "depth {}", depth);
    }
}

#[test]
fn the_second_player_minimizes_from_player_ones_view() {
    let mut board = Mancala::default();
    board.do_action(&0).unwrap();
    let evaluator = StoreDifference::new(Player::One);
    assert_eq!(evaluator.is_max_layer(&board), Some(false));
    let params = SearchParams::new(3).with_max_time(Duration::from_secs(10)).with_memo_mode(MemoMode::Strict);
    let report = AlphaBetaSearch::run(&board, &evaluator, &params, Instant::now()).unwrap();
    let values = MinimaxSearch::action_values(&board, &evaluator, 3).unwrap();
    let best = values.iter().map(|(_, v)| *v).fold(f32::INFINITY, f32::min);
    assert_eq!(report.value, best);
}

#[test]
fn the_scheduler_plays_mancala() {
    let config = SearchConfig::default().with_min_depth(2).with_max_depth(6).with_think_time(Duration::from_secs(10));
    let board = Mancala::default();
    let pit = IterativeDeepening::new(config).get_move(&board, Arc::new(StoreDifference::new(Player::One))).unwrap();
    assert!(board.legal_moves().contains(&pit));
}

#[test]
fn two_bots_finish_a_game() {
    let config = SearchConfig::default().with_min_depth(1).with_max_depth(3).with_think_time(Duration::from_secs(10));
    let mut game = Game::new(Mancala::with_size(4, 3).unwrap(), None, config).unwrap();
    let mut turns = 0;
    while !game.board().is_over() {
        game.play_ai_move().unwrap();
        turns += 1;
        assert!(turns < 200);
    }
    assert_eq!(game.board().board().iter().sum::<u32>(), 24);
    assert!(game.board().outcome().is_some());
    assert_eq!(game.move_history().len(), turns);
}

#[test]
fn mancala_fingerprints_survive_an_audit() {
    let result = FingerprintAudit::run(&Mancala::with_size(4, 2).unwrap(), 5);
    assert!(result.is_clean());
    assert!(result.transpositions > 0);
}
