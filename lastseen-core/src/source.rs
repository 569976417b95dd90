use lastseen_model::OnlineMember;

/// Host-side view of who is online, polled once per heartbeat.
pub trait PresenceSource: Send {
    /// The host's heartbeat counter. Drives flush timing.
    fn tick_count(&self) -> u64;

    /// Current roster with each member's world marker.
    ///
    /// `None` means the roster has not been loaded yet; the tracker then
    /// leaves its online set and buffer alone for this heartbeat.
    fn current_online_members(&mut self) -> Option<Vec<OnlineMember>>;
}
