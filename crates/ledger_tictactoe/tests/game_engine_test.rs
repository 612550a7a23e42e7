//! Tests for the game engine lifecycle.

use ledger_tictactoe::{Cell, GameEngine, GameError, GameRecord, GameState, Pubkey, Sign, Tile};

/// Plays `moves` alternately from the first player, panicking on rejection.
fn play_out(a: Pubkey, b: Pubkey, moves: &[(u8, u8)]) -> GameRecord {
    let mut record = GameEngine::setup_game(a, b);
    for (i, (row, column)) in moves.iter().enumerate() {
        let player = if i % 2 == 0 { a } else { b };
        record = GameEngine::play(&record, player, Tile::new(*row, *column))
            .unwrap_or_else(|e| panic!("move {} rejected: {}", i + 1, e));
    }
    record
}

#[test]
fn test_setup_game() {
    let player_one = Pubkey::new_unique();
    let player_two = Pubkey::new_unique();

    let game = GameEngine::setup_game(player_one, player_two);

    assert_eq!(*game.turn(), 1);
    assert_eq!(game.players(), &[player_one, player_two]);
    assert_eq!(game.state(), &GameState::Active);
    assert_eq!(game.board(), &ledger_tictactoe::Board::new());
}

#[test]
fn test_player_one_plays_invalid_move() {
    let player_one = Pubkey::new_unique();
    let game = GameEngine::setup_game(player_one, Pubkey::new_unique());

    let result = GameEngine::play(&game, player_one, Tile::new(5, 1));

    assert_eq!(result, Err(GameError::TileOutOfBounds));
    assert_eq!(result.unwrap_err().code(), 6003);
    assert_eq!(*game.turn(), 1);
    assert_eq!(game.board().filled(), 0);
}

#[test]
fn test_player_one_plays_valid_move() {
    let player_one = Pubkey::new_unique();
    let game = GameEngine::setup_game(player_one, Pubkey::new_unique());

    let game = GameEngine::play(&game, player_one, Tile::new(0, 0)).expect("valid move");

    assert_eq!(*game.turn(), 2);
    assert_eq!(game.state(), &GameState::Active);
    assert_eq!(
        game.board().rows(),
        &[
            [Cell::Marked(Sign::X), Cell::Empty, Cell::Empty],
            [Cell::Empty, Cell::Empty, Cell::Empty],
            [Cell::Empty, Cell::Empty, Cell::Empty],
        ]
    );
}

#[test]
fn test_wrong_player_rejected() {
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let game = GameEngine::setup_game(a, b);

    assert_eq!(
        GameEngine::play(&game, b, Tile::new(1, 1)),
        Err(GameError::NotPlayersTurn)
    );

    let stranger = Pubkey::new_unique();
    assert_eq!(
        GameEngine::play(&game, stranger, Tile::new(1, 1)),
        Err(GameError::NotPlayersTurn)
    );
}

#[test]
fn test_out_of_bounds_after_moves_keeps_turn() {
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let game = play_out(a, b, &[(0, 0), (1, 1)]);

    assert_eq!(
        GameEngine::play(&game, a, Tile::new(0, 3)),
        Err(GameError::TileOutOfBounds)
    );
    assert_eq!(*game.turn(), 3);
}

#[test]
fn test_occupied_tile_rejected() {
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let game = play_out(a, b, &[(1, 1)]);

    assert_eq!(
        GameEngine::play(&game, b, Tile::new(1, 1)),
        Err(GameError::TileAlreadySet)
    );
}

#[test]
fn test_replaying_accepted_move_fails() {
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let before = GameEngine::setup_game(a, b);
    let after = GameEngine::play(&before, a, Tile::new(2, 0)).unwrap();

    // Same caller is no longer on turn.
    assert_eq!(
        GameEngine::play(&after, a, Tile::new(2, 0)),
        Err(GameError::NotPlayersTurn)
    );
    // The next player cannot take the cell either.
    assert_eq!(
        GameEngine::play(&after, b, Tile::new(2, 0)),
        Err(GameError::TileAlreadySet)
    );
}

#[test]
fn test_self_play_replay_hits_tile_check() {
    let a = Pubkey::new_unique();
    let game = GameEngine::setup_game(a, a);
    let game = GameEngine::play(&game, a, Tile::new(0, 0)).unwrap();

    assert_eq!(
        GameEngine::play(&game, a, Tile::new(0, 0)),
        Err(GameError::TileAlreadySet)
    );

    let game = GameEngine::play(&game, a, Tile::new(0, 1)).unwrap();
    assert_eq!(game.board().get(Tile::new(0, 1)), Some(Cell::Marked(Sign::O)));
}

#[test]
fn test_win_detection() {
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    // X takes the top row.
    let game = play_out(a, b, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);

    assert_eq!(game.state(), &GameState::Won { winner: a });
    assert_eq!(game.winner(), Some(a));
    assert_eq!(*game.turn(), 6);
}

#[test]
fn test_second_player_can_win() {
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    // O takes the middle column.
    let game = play_out(a, b, &[(0, 0), (0, 1), (2, 2), (1, 1), (1, 0), (2, 1)]);

    assert_eq!(game.state(), &GameState::Won { winner: b });
    assert_eq!(*game.turn(), 7);
}

#[test]
fn test_win_on_last_cell_is_not_tie() {
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    // X O X / O X O / O X X, completing the main diagonal with the ninth move.
    let game = play_out(
        a,
        b,
        &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 1), (2, 0), (2, 2)],
    );

    assert_eq!(game.state(), &GameState::Won { winner: a });
    assert_eq!(*game.turn(), 10);
}

#[test]
fn test_tie_detection() {
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    // X O X / X O O / O X X
    let game = play_out(
        a,
        b,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (2, 0), (2, 1), (1, 2), (2, 2)],
    );

    assert_eq!(game.state(), &GameState::Tie);
    assert_eq!(game.winner(), None);
    assert_eq!(*game.turn(), 10);
    assert_eq!(game.board().filled(), 9);
}

#[test]
fn test_terminal_state_rejects_moves() {
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let won = play_out(a, b, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);

    // Game over is checked before turn, bounds and occupancy.
    for (player, tile) in [
        (b, Tile::new(2, 0)),
        (a, Tile::new(2, 0)),
        (b, Tile::new(9, 9)),
        (b, Tile::new(0, 0)),
    ] {
        assert_eq!(
            GameEngine::play(&won, player, tile),
            Err(GameError::GameAlreadyOver)
        );
    }

    let tied = play_out(
        a,
        b,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (2, 0), (2, 1), (1, 2), (2, 2)],
    );
    assert_eq!(
        GameEngine::play(&tied, a, Tile::new(0, 0)),
        Err(GameError::GameAlreadyOver)
    );
}
