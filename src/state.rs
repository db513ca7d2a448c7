use crate::host::NodeId;

/// What started the current interaction session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabSource {
    Pointer,
    Touch,
    Keyboard,
}

impl GrabSource {
    /// Keyboard grabs move by key steps only; pointer moves are ignored.
    pub fn tracks_pointer(self) -> bool {
        matches!(self, GrabSource::Pointer | GrabSource::Touch)
    }
}

/// An in-progress drag of a single panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub panel: NodeId,
    pub handle: NodeId,
    pub source: GrabSource,
}

/// Process-wide interaction state: the active session, the last pointer
/// position, and the stacking and panel counters.
#[derive(Debug, Clone)]
pub struct InteractionState {
    session: Option<Session>,
    pointer: (i32, i32),
    next_stacking: u64,
    panel_count: u32,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(crate::constants::INITIAL_STACKING)
    }
}

impl InteractionState {
    pub fn new(initial_stacking: u32) -> Self {
        Self {
            session: None,
            pointer: (0, 0),
            next_stacking: u64::from(initial_stacking),
            panel_count: 0,
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.session
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_panel(&self) -> Option<NodeId> {
        self.session.map(|s| s.panel)
    }

    /// Start a session, replacing any previous one. Returns the replaced
    /// session so the caller can clear its indicators.
    pub fn begin(&mut self, session: Session) -> Option<Session> {
        self.session.replace(session)
    }

    pub fn end(&mut self) -> Option<Session> {
        self.session.take()
    }

    pub fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    pub fn set_pointer(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);
    }

    /// Hand out the current stacking value and advance the counter.
    ///
    /// The counter is 64 bits wide and starts at a 32-bit value, so it never
    /// runs out.
    pub fn next_stacking(&mut self) -> u64 {
        let value = self.next_stacking;
        self.next_stacking += 1;
        value
    }

    /// The value the next call to [`Self::next_stacking`] returns.
    pub fn peek_stacking(&self) -> u64 {
        self.next_stacking
    }

    /// Count one more initialized panel and return its 1-based ordinal.
    pub fn register_panel(&mut self) -> u32 {
        self.panel_count = self.panel_count.saturating_add(1);
        self.panel_count
    }

    pub fn panel_count(&self) -> u32 {
        self.panel_count
    }
}
