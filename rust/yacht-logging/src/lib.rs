//! yacht-logging: NDJSON events + tracing setup.
//!
//! Append-only NDJSON logs of committed marks and finished boards for post-mortems.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use thiserror::Error;
use yacht_core::{Category, ScoreBoard, ScoreBoardEntry};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ruleset id stamped into every event.
pub const RULESET_ID: &str = "yacht_12cat_bonus35_v1";

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub ruleset_id: &'static str,

    pub game_id: u64,
    pub category: Category,
    pub dice: [u8; 5],
    pub score: u32,
}

impl MarkEventV1 {
    pub fn from_entry(game_id: u64, entry: &ScoreBoardEntry) -> Self {
        Self {
            event: "mark",
            ts_ms: now_ms(),
            ruleset_id: RULESET_ID,
            game_id,
            category: entry.category(),
            dice: entry.combination().dice(),
            score: entry.score(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub ruleset_id: &'static str,

    pub game_id: u64,
    pub filled: usize,
    pub complete: bool,
    pub upper_section_total: u32,
    pub upper_section_bonus: u32,
    pub score: u32,
}

impl BoardEventV1 {
    pub fn from_board(game_id: u64, board: &ScoreBoard) -> Self {
        Self {
            event: "board",
            ts_ms: now_ms(),
            ruleset_id: RULESET_ID,
            game_id,
            filled: board.len(),
            complete: board.is_complete(),
            upper_section_total: board.upper_section_total(),
            upper_section_bonus: board.upper_section_bonus(),
            score: board.score(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NdjsonError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}
