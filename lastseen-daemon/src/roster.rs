//! Roster file presence source
//!
//! The file is re-read on every heartbeat. Format, one entry per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! #session inactive
//! Zezima 301
//! Some_Name 0
//! ```
//!
//! The last whitespace-separated token is the world; everything before it
//! is the display name. A world of zero or less means offline. The
//! `#session` directive switches between `active` and `inactive`.

use lastseen_core::PresenceSource;
use lastseen_model::{normalize_display_name, OnlineMember, SessionState};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SESSION_DIRECTIVE: &str = "#session";

/// Parsed roster file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub session: SessionState,
    pub members: Vec<OnlineMember>,
}

pub fn parse_roster(text: &str) -> Roster {
    let mut session = SessionState::Active;
    let mut members = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix(SESSION_DIRECTIVE) {
            match rest.trim() {
                "active" => session = SessionState::Active,
                "inactive" => session = SessionState::Inactive,
                other => debug!(line = lineno + 1, value = other, "Unknown session directive"),
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let Some((name, world)) = line.rsplit_once(char::is_whitespace) else {
            debug!(line = lineno + 1, "Skipping roster line without world");
            continue;
        };
        let Ok(world) = world.parse::<i32>() else {
            debug!(line = lineno + 1, world, "Skipping roster line with bad world");
            continue;
        };
        let identity = normalize_display_name(name);
        if identity.is_blank() {
            continue;
        }
        members.push(OnlineMember { identity, world });
    }

    Roster { session, members }
}

pub struct RosterSource {
    path: PathBuf,
    tick: u64,
    roster: Option<Roster>,
}

impl RosterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tick: 0,
            roster: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Advance one tick and re-read the roster file.
    ///
    /// Returns the session state the file asks for. A missing or unreadable
    /// file keeps the session active but leaves the roster unloaded.
    pub async fn advance(&mut self) -> SessionState {
        self.tick += 1;
        self.roster = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Some(parse_roster(&text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read roster");
                None
            }
        };
        self.roster
            .as_ref()
            .map_or(SessionState::Active, |r| r.session)
    }
}

impl PresenceSource for RosterSource {
    fn tick_count(&self) -> u64 {
        self.tick
    }

    fn current_online_members(&mut self) -> Option<Vec<OnlineMember>> {
        self.roster.as_ref().map(|r| r.members.clone())
    }
}
