//! Whole-game scenarios driven through the library API.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::PathBuf;

use knightmoves::board::{Direction, KnightId, Position, Status};
use knightmoves::game::{FightOutcome, Game};
use knightmoves::protocol::{play_file, play_moves, MoveListError};
use serde_json::json;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn pos(x: i64, y: i64) -> Position {
    Position::new(x, y).unwrap()
}

#[test]
fn read_moves_from_file() {
    let mut game = Game::new();
    let applied = play_file(&mut game, &data("moves.txt")).unwrap();
    assert_eq!(applied, 5);

    let state: serde_json::Value = serde_json::from_str(&game.to_json().unwrap()).unwrap();
    assert_eq!(state["Red"], json!([[2, 0], "alive", null, 1, 1]));
    assert_eq!(state["Blue"], json!([[7, 1], "alive", null, 1, 1]));
    assert_eq!(state["Green"], json!([[6, 7], "alive", null, 1, 1]));
    assert_eq!(state["Yellow"], json!([null, "drowned", null, 1, 1]));
}

#[test]
fn full_battle() {
    let mut game = Game::new();
    let applied = play_file(&mut game, &data("battle.txt")).unwrap();
    // The line after END is never played.
    assert_eq!(applied, 29);

    let state: serde_json::Value = serde_json::from_str(&game.to_json().unwrap()).unwrap();
    assert_eq!(
        state,
        json!({
            "Red": [[3, 3], "alive", "Axe", 3, 1],
            "Blue": [null, "drowned", null, 1, 1],
            "Green": [[5, 2], "dead", null, 1, 1],
            "Yellow": [[2, 3], "dead", null, 1, 1],
            "Axe": [[3, 3], true],
            "Dagger": [[2, 3], false],
            "MagicStaff": [[7, 2], false],
            "Helmet": [[5, 2], false],
        })
    );
    assert_eq!(game.winner(), Some(KnightId::Red));
}

/// Plays the next `n` lines of a move list as their own document.
fn play_chunk<'a>(game: &mut Game, lines: &mut impl Iterator<Item = &'a str>, n: usize) -> usize {
    let chunk: Vec<&str> = lines.by_ref().take(n).collect();
    let doc = format!("GAME-START\n{}\n", chunk.join("\n"));
    play_moves(game, Cursor::new(doc)).unwrap()
}

#[test]
fn battle_turn_by_turn() {
    let mut game = Game::new();
    let text = std::fs::read_to_string(data("battle.txt")).unwrap();
    let mut lines = text.lines().skip(1);

    // Red walks onto the axe.
    assert_eq!(play_chunk(&mut game, &mut lines, 4), 4);
    assert_eq!(game.attack(KnightId::Red), 3);
    assert!(game.items_on(pos(2, 2)).is_empty());

    // Yellow takes the dagger and walks next to Red.
    assert_eq!(play_chunk(&mut game, &mut lines, 6), 6);
    assert_eq!(game.attack(KnightId::Yellow), 2);
    assert_eq!(game.knight(KnightId::Yellow).position(), Some(pos(2, 3)));

    // Red attacks and wins; the dagger stays where Yellow fell.
    assert_eq!(lines.next(), Some("R:E"));
    let turn = game.make_move('R', Direction::East).unwrap();
    assert_eq!(
        turn.fight,
        Some(FightOutcome { winner: KnightId::Red, loser: KnightId::Yellow })
    );
    let dagger = game.item_id("Dagger").unwrap();
    assert_eq!(game.items_on(pos(2, 3)), vec![dagger]);

    // Red moves on, Blue takes the staff, Green takes the helmet and
    // attacks Blue, losing against the staff's defence.
    assert_eq!(play_chunk(&mut game, &mut lines, 12), 12);
    assert_eq!(game.knight(KnightId::Green).status(), Status::Dead);
    assert_eq!(game.knight(KnightId::Green).position(), Some(pos(5, 2)));
    assert_eq!(game.defence(KnightId::Blue), 2);

    // Blue walks off the south edge.
    assert_eq!(play_chunk(&mut game, &mut lines, 3), 3);
    assert_eq!(game.knight(KnightId::Blue).status(), Status::Drowned);
    let staff = game.item_id("MagicStaff").unwrap();
    assert_eq!(game.item(staff).unwrap().position(), pos(7, 2));
    assert!(!game.item(staff).unwrap().equipped());
}

#[test]
fn malformed_line_keeps_earlier_moves() {
    let mut game = Game::new();
    let text = "GAME-START\nR:S\nB:N\nR:Z\nR:S\n";
    let err = play_moves(&mut game, Cursor::new(text)).unwrap_err();
    assert!(matches!(err, MoveListError::InvalidDirection { line: 4, .. }));
    assert_eq!(game.knight(KnightId::Red).position(), Some(pos(1, 0)));
    assert_eq!(game.knight(KnightId::Blue).position(), Some(pos(6, 0)));
}

#[test]
fn wrong_header_is_fatal() {
    let mut game = Game::new();
    let file = File::open(data("stacked_layout.json")).unwrap();
    let err = play_moves(&mut game, BufReader::new(file)).unwrap_err();
    assert!(matches!(err, MoveListError::MissingHeader(_)));
    assert_eq!(game, Game::new());
}
