//! Append-only activity log at `~/.recipe-porter/activity.log`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{RecipeError, Result};

const ERROR_MARKER: &str = "🔴";
const INFO_MARKER: &str = "🟢";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub domain: Option<String>,
    pub event: String,
    pub details: Option<String>,
}

pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new() -> Result<Self> {
        let user_dirs = directories::UserDirs::new().ok_or_else(|| {
            RecipeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine home directory",
            ))
        })?;
        let dir = user_dirs.home_dir().join(".recipe-porter");
        fs::create_dir_all(&dir)?;
        Ok(Self::at(dir.join("activity.log")))
    }

    /// Logger writing to an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(
        &self,
        level: LogLevel,
        domain: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            domain: domain.map(|d| d.to_string()),
            event: event.to_string(),
            details: details.map(|d| d.to_string()),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        let marker = match entry.level {
            LogLevel::Info => INFO_MARKER,
            LogLevel::Error => ERROR_MARKER,
        };

        writeln!(
            file,
            "{} {} {} {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            marker,
            entry.event,
            entry.domain.as_deref().unwrap_or("*"),
            entry.details.as_deref().unwrap_or("")
        )?;

        Ok(())
    }

    /// Matching lines, most recent first.
    pub fn read_logs(&self, domain_filter: Option<&str>, errors_only: bool) -> Result<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let reader = BufReader::new(fs::File::open(&self.log_path)?);
        let mut matching = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if errors_only && !line.contains(ERROR_MARKER) {
                continue;
            }
            if let Some(domain) = domain_filter {
                if !line.contains(domain) {
                    continue;
                }
            }
            matching.push(line);
        }

        matching.reverse();
        Ok(matching)
    }

    pub fn info(&self, domain: Option<&str>, event: &str, details: Option<&str>) -> Result<()> {
        self.log(LogLevel::Info, domain, event, details)
    }

    pub fn error(&self, domain: Option<&str>, event: &str, details: Option<&str>) -> Result<()> {
        self.log(LogLevel::Error, domain, event, details)
    }
}
