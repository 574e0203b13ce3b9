//! Daily flat-file audit sink.
//!
//! # Responsibilities
//! - Serialize records as "{timestamp} {LEVEL} {json}" lines
//! - Append to one file per day, rolling on date change
//!
//! # Design Decisions
//! - The Mutex guards only the file handle; records are built outside it.
//! - Write failures propagate to the caller, which escalates to 500.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use super::record::{LineRecord, MainRecord};

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("cannot open audit file {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot write audit record: {0}")]
    Write(#[from] std::io::Error),

    #[error("cannot serialize audit record: {0}")]
    Serialize(#[from] serde_json::Error),
}

struct OpenedFile {
    date: NaiveDate,
    file: File,
}

/// Append-only audit file writer with daily rollover.
pub struct AuditSink {
    dir: PathBuf,
    current: Mutex<Option<OpenedFile>>,
}

impl AuditSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            current: Mutex::new(None),
        }
    }

    /// Write the per-request record. Returns the formatted line.
    pub fn write_main(&self, record: &MainRecord) -> Result<String, AuditError> {
        self.write_record("main", record.has_error(), record)
    }

    /// Write the per-TCP-call record. Returns the formatted line.
    pub fn write_line(&self, record: &LineRecord) -> Result<String, AuditError> {
        self.write_record("line", record.has_error(), record)
    }

    fn write_record<T: Serialize>(
        &self,
        kind: &str,
        is_error: bool,
        record: &T,
    ) -> Result<String, AuditError> {
        let now = Local::now();
        let level = if is_error { "ERROR" } else { "INFO" };
        let json = serde_json::to_string(record)?;
        let line = format!(
            "{} {} {} {}",
            now.format("%Y-%m-%dT%H:%M:%S%.3f%z"),
            level,
            kind,
            json
        );

        let mut guard = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let today = now.date_naive();
        let needs_open = match guard.as_ref() {
            Some(opened) => opened.date != today,
            None => true,
        };
        if needs_open {
            *guard = Some(OpenedFile {
                date: today,
                file: self.open_for(today)?,
            });
        }
        // The option was just populated above.
        if let Some(opened) = guard.as_mut() {
            writeln!(opened.file, "{line}")?;
        }
        Ok(line)
    }

    fn open_for(&self, date: NaiveDate) -> Result<File, AuditError> {
        fs::create_dir_all(&self.dir).map_err(|e| AuditError::Open {
            path: self.dir.display().to_string(),
            source: e,
        })?;
        let path = self.dir.join(format!("gateway-{}.log", date.format("%Y-%m-%d")));
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| AuditError::Open {
                path: path.display().to_string(),
                source: e,
            })
    }
}
