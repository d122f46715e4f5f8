//! PGN text export. Writing the text anywhere is the caller's business.

use crate::error::{ChessError, ChessResult};
use crate::move_log::MoveLog;
use chrono::{Local, NaiveDate};

/// Seven-tag-roster header values
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PgnHeaders {
    pub event: String,
    pub site: String,
    pub date: NaiveDate,
    pub round: String,
    pub white: String,
    pub black: String,
    pub result: String,
}

impl Default for PgnHeaders {
    fn default() -> Self {
        PgnHeaders {
            event: "Casual Game".to_string(),
            site: "Local".to_string(),
            date: Local::now().date_naive(),
            round: "1".to_string(),
            white: "Player 1".to_string(),
            black: "Player 2".to_string(),
            result: "*".to_string(),
        }
    }
}

/// Render the header block and numbered move pairs.
///
/// Fails with `NothingToExport` when no move has been committed.
pub fn export_pgn(move_log: &MoveLog, headers: &PgnHeaders) -> ChessResult<String> {
    if move_log.is_empty() {
        return Err(ChessError::NothingToExport);
    }

    let mut pgn = String::new();
    let tags = [
        ("Event", headers.event.clone()),
        ("Site", headers.site.clone()),
        ("Date", headers.date.format("%Y.%m.%d").to_string()),
        ("Round", headers.round.clone()),
        ("White", headers.white.clone()),
        ("Black", headers.black.clone()),
        ("Result", headers.result.clone()),
    ];
    for (name, value) in tags {
        pgn.push_str(&format!("[{} \"{}\"]\n", name, value));
    }
    pgn.push('\n');

    for (i, pair) in move_log.moves().chunks(2).enumerate() {
        pgn.push_str(&format!("{}. ", i + 1));
        for mv in pair {
            pgn.push_str(&mv.notation());
            pgn.push(' ');
        }
    }

    Ok(pgn)
}
