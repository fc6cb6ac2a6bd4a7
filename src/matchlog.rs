// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Append-only record of matches.
//!
//! Each match is one line, `<hex scalar> -> <artifact>`, newline terminated.
//! A file log is opened in append mode for every record: it is created if
//! missing, never truncated, and never reordered. Appends from several
//! threads are serialised by a lock, and each line is written with a single
//! `write_all`, so concurrent sweeps cannot interleave partial lines.

use num_bigint::BigUint;
use num_traits::Num;
use parking_lot::Mutex;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Separator between the scalar and the artifact on a log line.
pub const SEPARATOR: &str = " -> ";

/// One successful oracle match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchRecord {
    pub scalar: BigUint,
    pub artifact: String,
}

impl MatchRecord {
    pub fn new(scalar: BigUint, artifact: impl Into<String>) -> Self {
        Self {
            scalar,
            artifact: artifact.into(),
        }
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}{}{}", self.scalar, SEPARATOR, self.artifact)
    }
}

impl FromStr for MatchRecord {
    type Err = MatchLogError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = || MatchLogError::InvalidRecord(line.to_string());
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let (hex, artifact) = line.split_once(SEPARATOR).ok_or_else(invalid)?;
        let scalar = BigUint::from_str_radix(hex.trim(), 16).map_err(|_| invalid())?;
        Ok(MatchRecord::new(scalar, artifact))
    }
}

#[derive(Debug, Error)]
pub enum MatchLogError {
    #[error("match log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed match log line {line}: '{content}'")]
    Malformed { line: usize, content: String },

    #[error("not a match record: '{0}'")]
    InvalidRecord(String),
}

/// Durable destination for match records.
pub trait MatchLog {
    /// Append one record. A record is durable only once this returns `Ok`.
    fn append(&self, record: &MatchRecord) -> Result<(), MatchLogError>;
}

impl<L: MatchLog + ?Sized> MatchLog for &L {
    fn append(&self, record: &MatchRecord) -> Result<(), MatchLogError> {
        (**self).append(record)
    }
}

/// Match log backed by a text file.
#[derive(Debug)]
pub struct FileMatchLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileMatchLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every record written so far.
    pub fn records(&self) -> Result<Vec<MatchRecord>, MatchLogError> {
        let _guard = self.lock.lock();
        read_match_log(&self.path)
    }

    fn io_error(&self, source: io::Error) -> MatchLogError {
        MatchLogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl MatchLog for FileMatchLog {
    fn append(&self, record: &MatchRecord) -> Result<(), MatchLogError> {
        let line = format!("{}\n", record);
        let _guard = self.lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .and_then(|_| file.sync_data())
            .map_err(|e| self.io_error(e))
    }
}

/// In-memory match log, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryMatchLog {
    records: Mutex<Vec<MatchRecord>>,
}

impl MemoryMatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<MatchRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl MatchLog for MemoryMatchLog {
    fn append(&self, record: &MatchRecord) -> Result<(), MatchLogError> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Parse a match log file. A missing file is an empty log.
pub fn read_match_log(path: &Path) -> Result<Vec<MatchRecord>, MatchLogError> {
    let io_error = |source| MatchLogError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(e)),
    };
    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(io_error)?;
        if line.trim().is_empty() {
            continue;
        }
        let record = line.parse::<MatchRecord>().map_err(|_| MatchLogError::Malformed {
            line: index + 1,
            content: line.clone(),
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let record = MatchRecord::new(BigUint::from(0x1abcu32), "12VVRNPi4SJqUTsp6FmqDqY5sGosDtysn4");
        let line = record.to_string();
        assert_eq!(line, "1abc -> 12VVRNPi4SJqUTsp6FmqDqY5sGosDtysn4");
        assert_eq!(line.parse::<MatchRecord>().unwrap(), record);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "no separator".parse::<MatchRecord>(),
            Err(MatchLogError::InvalidRecord(content)) if content == "no separator"
        ));
        assert!(matches!("zz -> x".parse::<MatchRecord>(), Err(MatchLogError::InvalidRecord(_))));
    }

    #[test]
    fn test_artifact_whitespace_survives_round_trip() {
        let record = MatchRecord::new(BigUint::from(0xabu8), "padded artifact  ");
        assert_eq!(record.to_string().parse::<MatchRecord>().unwrap(), record);

        // Line terminators are not part of the artifact.
        let parsed = "ab -> x \r\n".parse::<MatchRecord>().unwrap();
        assert_eq!(parsed.artifact, "x ");
    }

    #[test]
    fn test_file_log_keeps_trailing_whitespace() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = FileMatchLog::new(dir.path().join("found.txt"));
        let record = MatchRecord::new(BigUint::from(0x1abu32), "tab\t");
        log.append(&record).unwrap();
        assert_eq!(log.records().unwrap(), vec![record]);
    }

    #[test]
    fn test_bad_line_reports_its_number() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("found.txt");
        std::fs::write(&path, "1ab -> ok\nbroken\n").unwrap();
        match read_match_log(&path) {
            Err(MatchLogError::Malformed { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "broken");
            }
            other => panic!("expected malformed line, got {:?}", other),
        }
    }

    #[test]
    fn test_memory_log_appends_in_order() {
        let log = MemoryMatchLog::new();
        assert!(log.is_empty());
        log.append(&MatchRecord::new(BigUint::from(1u8), "a")).unwrap();
        log.append(&MatchRecord::new(BigUint::from(2u8), "b")).unwrap();
        let artifacts: Vec<String> = log.records().into_iter().map(|r| r.artifact).collect();
        assert_eq!(artifacts, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_file_is_empty_log() {
        let path = Path::new("this/path/does/not/exist/found.txt");
        assert!(read_match_log(path).unwrap().is_empty());
    }
}
