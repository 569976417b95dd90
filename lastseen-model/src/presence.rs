use crate::Identity;

/// One entry of a roster snapshot.
///
/// `world` is the host's world or session marker. Anything non-positive
/// means the member is offline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlineMember {
    pub identity: Identity,
    pub world: i32,
}

impl OnlineMember {
    pub fn new(identity: impl Into<Identity>, world: i32) -> Self {
        Self { identity: identity.into(), world }
    }

    pub fn is_online(&self) -> bool {
        self.world > 0
    }
}

/// Host session state. Heartbeats only count while `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Inactive,
    Active,
}

impl SessionState {
    pub fn is_active(self) -> bool {
        matches!(self, SessionState::Active)
    }
}

/// Caller-facing answer to "when was this peer last online".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    /// Currently online; no timestamp is shown.
    Online,
    /// Last observed online at this time (ms since epoch).
    LastSeen(u64),
    /// Never observed.
    Unknown,
}
