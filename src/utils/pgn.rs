//! PGN export of a recorded game.
//!
//! Writes Seven-Tag-Roster headers, the starting FEN for games that did not
//! begin from the standard layout, SAN movetext and the result token.

use crate::chess_errors::ChessErrors;
use crate::game::history::History;
use crate::game_state::chess_types::Color;
use crate::game_state::game_status::GameStatus;

/// Export with default headers and today's date.
pub fn write_pgn(history: &History, status: GameStatus) -> Result<String, ChessErrors> {
    let date = chrono::Local::now().format("%Y.%m.%d").to_string();
    let headers = vec![
        ("Event".to_owned(), "Casual Game".to_owned()),
        ("Site".to_owned(), "Local".to_owned()),
        ("Date".to_owned(), date),
        ("Round".to_owned(), "-".to_owned()),
        ("White".to_owned(), "White".to_owned()),
        ("Black".to_owned(), "Black".to_owned()),
    ];
    write_pgn_with_headers(history, status, &headers)
}

/// Export with caller-supplied headers, written in the given order.
///
/// `Result` is always derived from `status`, and `SetUp`/`FEN` are added when
/// the history starts from a non-standard position; caller entries for those
/// keys are ignored.
pub fn write_pgn_with_headers(
    history: &History,
    status: GameStatus,
    headers: &[(String, String)],
) -> Result<String, ChessErrors> {
    let result = status.result_token();
    let mut out = String::new();

    for (key, value) in headers {
        if matches!(key.as_str(), "Result" | "SetUp" | "FEN") {
            continue;
        }
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push_str(&format!("[Result \"{result}\"]\n"));

    let initial = history.initial();
    if !initial.is_starting_position() {
        out.push_str("[SetUp \"1\"]\n");
        out.push_str(&format!("[FEN \"{}\"]\n", initial.to_fen()));
    }
    out.push('\n');

    let mut movetext_parts = Vec::<String>::with_capacity(history.len() + 1);
    let mut move_number = initial.fullmove_number();
    for (index, entry) in history.as_notation().into_iter().enumerate() {
        match entry.color {
            Color::White => movetext_parts.push(format!("{move_number}. {}", entry.text)),
            Color::Black if index == 0 => {
                movetext_parts.push(format!("{move_number}... {}", entry.text))
            }
            Color::Black => movetext_parts.push(entry.text),
        }
        if entry.color == Color::Black {
            move_number += 1;
        }
    }
    movetext_parts.push(result.to_owned());

    out.push_str(&movetext_parts.join(" "));
    out.push('\n');
    Ok(out)
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
