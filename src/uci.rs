//! UCI Protocol Module
//!
//! Line-oriented engine protocol over any reader/writer pair. Replies go to
//! the writer; diagnostics go to the logger. Lines that cannot be understood
//! are ignored.

use std::io::{self, BufRead, Write};

use crate::config::{EngineConfig, MAX_DEPTH, MAX_THREADS, MIN_DEPTH, MIN_THREADS};
use crate::error::{ChessError, ChessResult};
use crate::game::Game;
use crate::move_log::Move;
use crate::parallel_search::ParallelSearch;
use crate::types::*;
use log::{debug, info, warn};

// Engine identification
const ENGINE_NAME: &str = "MinimaxChess";
const ENGINE_AUTHOR: &str = "minimax_chess developers";
const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// An integer engine option
#[derive(Clone, Debug)]
pub struct UCIOption {
    pub name: &'static str,
    pub default: i64,
    pub min: i64,
    pub max: i64,
}

impl UCIOption {
    pub fn spin(name: &'static str, default: i64, min: i64, max: i64) -> Self {
        UCIOption {
            name,
            default,
            min,
            max,
        }
    }

    pub fn to_uci_string(&self) -> String {
        format!(
            "option name {} type spin default {} min {} max {}",
            self.name, self.default, self.min, self.max
        )
    }

    /// Parse a value and clamp it into range
    pub fn parse_value(&self, value_str: &str) -> Option<i64> {
        value_str
            .trim()
            .parse::<i64>()
            .ok()
            .map(|v| v.clamp(self.min, self.max))
    }
}

/// Parse coordinate move text: "e2e4", "e7e8q", "e2-e4" or "e2xe4"
pub fn parse_move_text(text: &str) -> ChessResult<(Position, Position, Option<PieceKind>)> {
    let invalid = || ChessError::InvalidMoveText(text.to_string());
    let compact: String = text.chars().filter(|c| *c != '-' && *c != 'x').collect();
    if !text.is_ascii() || compact.len() < 4 || compact.len() > 5 {
        return Err(invalid());
    }

    let from = Position::parse(&compact[0..2]).ok_or_else(invalid)?;
    let to = Position::parse(&compact[2..4]).ok_or_else(invalid)?;
    let promotion = match compact[4..].chars().next() {
        Some(c) => Some(PieceKind::from_promotion_char(c).ok_or_else(invalid)?),
        None => None,
    };
    Ok((from, to, promotion))
}

/// UCI protocol handler
pub struct UCIProtocol<W: Write> {
    game: Game,
    config: EngineConfig,
    options: Vec<UCIOption>,
    out: W,
    running: bool,
}

impl<W: Write> UCIProtocol<W> {
    pub fn new(out: W, config: EngineConfig) -> Self {
        let options = vec![
            UCIOption::spin("Depth", config.depth as i64, MIN_DEPTH as i64, MAX_DEPTH as i64),
            UCIOption::spin("Threads", config.threads as i64, MIN_THREADS as i64, MAX_THREADS as i64),
        ];
        UCIProtocol {
            game: Game::new(),
            config,
            options,
            out,
            running: true,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Consume the handler and hand back its writer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Process lines until `quit` or end of input
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            self.process_command(line.trim())?;
            if !self.running {
                break;
            }
        }
        Ok(())
    }

    pub fn process_command(&mut self, line: &str) -> io::Result<()> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(());
        };

        match command {
            "uci" => self.cmd_uci(),
            "isready" => self.send("readyok"),
            "setoption" => {
                self.cmd_setoption(args);
                Ok(())
            }
            "ucinewgame" => {
                self.game = Game::new();
                Ok(())
            }
            "position" => {
                self.cmd_position(args);
                Ok(())
            }
            "go" => self.cmd_go(args),
            "d" => self.cmd_display(),
            // Search is synchronous, nothing to interrupt
            "stop" => Ok(()),
            "quit" => {
                self.running = false;
                Ok(())
            }
            _ => {
                debug!("ignoring unknown command: {}", command);
                Ok(())
            }
        }
    }

    fn send(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()
    }

    fn cmd_uci(&mut self) -> io::Result<()> {
        self.send(&format!("id name {} {}", ENGINE_NAME, ENGINE_VERSION))?;
        self.send(&format!("id author {}", ENGINE_AUTHOR))?;
        let lines: Vec<String> = self.options.iter().map(UCIOption::to_uci_string).collect();
        for line in lines {
            self.send(&line)?;
        }
        self.send("uciok")
    }

    fn cmd_setoption(&mut self, args: &[&str]) {
        if args.len() < 2 || args[0] != "name" {
            return;
        }

        let value_at = args.iter().position(|a| *a == "value");
        let name = args[1..value_at.unwrap_or(args.len())].join(" ");
        let Some(value_str) = value_at.map(|i| args[i + 1..].join(" ")) else {
            return;
        };

        let Some(option) = self.options.iter().find(|o| o.name.eq_ignore_ascii_case(&name)) else {
            debug!("ignoring unknown option: {}", name);
            return;
        };
        let Some(value) = option.parse_value(&value_str) else {
            debug!("ignoring bad value for {}: {}", name, value_str);
            return;
        };

        match option.name {
            "Depth" => self.config = self.config.with_depth(value as u32),
            "Threads" => self.config = self.config.with_threads(value as usize),
            _ => {}
        }
        info!("option {} set to {}", option.name, value);
    }

    fn cmd_position(&mut self, args: &[&str]) {
        let Some((&kind, rest)) = args.split_first() else {
            return;
        };

        let moves_at = rest.iter().position(|a| *a == "moves");
        let setup = &rest[..moves_at.unwrap_or(rest.len())];

        let game = match kind {
            "startpos" => Game::new(),
            "fen" => match Game::from_fen(&setup.join(" ")) {
                Ok(game) => game,
                Err(e) => {
                    warn!("{}", e);
                    return;
                }
            },
            _ => return,
        };
        self.game = game;

        if let Some(i) = moves_at {
            for text in &rest[i + 1..] {
                let result = parse_move_text(text)
                    .and_then(|(from, to, promo)| self.game.make_move(from, to, promo));
                if let Err(e) = result {
                    warn!("skipping move {}: {}", text, e);
                }
            }
        }
    }

    fn cmd_go(&mut self, args: &[&str]) -> io::Result<()> {
        let mut depth = self.config.depth;

        let mut i = 0;
        while i < args.len() {
            match args[i] {
                "depth" if i + 1 < args.len() => {
                    if let Ok(d) = args[i + 1].parse::<u32>() {
                        depth = d.clamp(MIN_DEPTH, MAX_DEPTH);
                    }
                    i += 2;
                }
                "wtime" | "btime" | "winc" | "binc" | "movestogo" | "movetime" | "nodes" => {
                    i += 2;
                }
                _ => {
                    i += 1;
                }
            }
        }

        let mut search = ParallelSearch::new(self.config.threads);
        let best = search.find_best_move(self.game.board(), self.game.turn(), depth);
        let board = self.game.board();
        let reply = match best.and_then(|(from, to)| board.piece_at(from).map(|p| (from, to, p))) {
            Some((from, to, piece)) => {
                let mut mv = Move::new(from, to, piece);
                mv.is_capture = board.piece_at(to).is_some();
                format!("bestmove {}", mv.notation())
            }
            None => "bestmove 0000".to_string(),
        };
        self.send(&reply)
    }

    fn cmd_display(&mut self) -> io::Result<()> {
        let turn = self.game.turn();
        let lines = [
            self.game.board().display(),
            format!("Side to move: {}", turn),
            format!("In check: {}", self.game.is_check(turn)),
            format!("Moves: {}", self.game.move_log().notations().join(" ")),
        ];
        for line in lines {
            self.send(&line)?;
        }
        Ok(())
    }
}
