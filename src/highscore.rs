/// The leaderboard: a short, score-ordered list persisted as `name,score`
/// lines.
///
/// Names are written verbatim with no escaping, so a name containing a comma
/// produces a line that is skipped on the next load.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::constants::MAX_HIGH_SCORES;
use crate::error::{HighScoreError, HighScoreResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Bounded, non-increasing by score.  Equal scores keep arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
    capacity: usize,
}

impl Default for HighScoreTable {
    fn default() -> Self {
        Self::new(MAX_HIGH_SCORES)
    }
}

impl HighScoreTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Best score on the table, if any.
    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Whether `score` would earn a place on the table.
    pub fn qualifies(&self, score: u32) -> bool {
        self.capacity > 0
            && (self.entries.len() < self.capacity
                || self.entries.last().map_or(true, |lowest| score > lowest.score))
    }

    /// Insert a result.  Returns `false` (table unchanged) when the table is
    /// full and `score` does not beat the lowest entry, or when the exact
    /// `(name, score)` pair is already present.
    pub fn add(&mut self, name: &str, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        if self
            .entries
            .iter()
            .any(|e| e.name == name && e.score == score)
        {
            return false;
        }
        self.entries.push(HighScoreEntry {
            name: name.to_string(),
            score,
        });
        self.sort_and_truncate();
        true
    }

    fn sort_and_truncate(&mut self) {
        // `sort_by` is stable, which keeps ties in arrival order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }

    // ── Flat-file format ─────────────────────────────────────────────────────

    /// Parse `name,score` lines.  Blank lines, lines without exactly two
    /// fields, and non-numeric scores are skipped.
    pub fn parse(text: &str, capacity: usize) -> Self {
        Self::parse_bytes(text.as_bytes(), capacity)
    }

    /// Like [`parse`](Self::parse), but each line is decoded on its own so a
    /// line that is not UTF-8 is skipped instead of spoiling the whole file.
    pub fn parse_bytes(bytes: &[u8], capacity: usize) -> Self {
        let mut table = Self::new(capacity);
        let mut skipped = 0usize;
        for raw in bytes.split(|&b| b == b'\n') {
            let Ok(line) = std::str::from_utf8(raw) else {
                skipped += 1;
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Some(entry) => table.entries.push(entry),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(skipped, "ignored malformed high-score lines");
        }
        table.sort_and_truncate();
        table
    }

    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{},{}\n", e.name, e.score))
            .collect()
    }

    /// Load from `path`.  A missing file is an empty table, not an error.
    pub fn load(path: &Path, capacity: usize) -> HighScoreResult<Self> {
        match fs::read(path) {
            Ok(bytes) => Ok(Self::parse_bytes(&bytes, capacity)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new(capacity)),
            Err(source) => Err(HighScoreError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Overwrite `path` with the whole table.
    pub fn save(&self, path: &Path) -> HighScoreResult<()> {
        let io_err = |source: io::Error| HighScoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        fs::write(path, self.serialize()).map_err(io_err)
    }
}

/// A name that can be written as a single `name,score` field: line breaks
/// and commas become spaces, surrounding whitespace is dropped.
pub fn clean_name(name: &str) -> String {
    name.chars()
        .map(|c| if c == ',' || c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

fn parse_line(line: &str) -> Option<HighScoreEntry> {
    let mut fields = line.split(',');
    let name = fields.next()?;
    let score = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    let score = score.trim().parse().ok()?;
    Some(HighScoreEntry {
        name: name.to_string(),
        score,
    })
}
