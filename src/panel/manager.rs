use std::collections::BTreeMap;

use super::{PanelEntry, PanelOp, PanelRegistry};
use crate::config::PanelSettings;
use crate::error::{PanelError, PanelResult};
use crate::host::{ControlRole, Indicator, NodeId, PanelHost};
use crate::state::{InteractionState, Session};

/// Owns the host, the panel registry and the interaction state.
///
/// Every user action enters through [`PanelManager::handle_event`]; the
/// lifecycle operations are also callable directly or by name through
/// [`PanelManager::invoke`].
#[derive(Debug)]
pub struct PanelManager<H: PanelHost> {
    pub(crate) host: H,
    pub(crate) registry: PanelRegistry,
    pub(crate) state: InteractionState,
    pub(crate) settings: PanelSettings,
    /// Which lifecycle operation an activated control runs.
    pub(crate) controls: BTreeMap<ControlRole, PanelOp>,
}

impl<H: PanelHost> PanelManager<H> {
    pub fn new(host: H) -> Self {
        Self::with_settings(host, PanelSettings::default())
    }

    pub fn with_settings(host: H, settings: PanelSettings) -> Self {
        let mut controls = BTreeMap::new();
        controls.insert(ControlRole::Close, PanelOp::Close);
        controls.insert(ControlRole::Minimize, PanelOp::Minimize);
        Self {
            host,
            registry: PanelRegistry::new(),
            state: InteractionState::new(settings.initial_stacking),
            settings,
            controls,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn entry(&self, panel: NodeId) -> Option<&PanelEntry> {
        self.registry.get(panel)
    }

    pub fn is_registered(&self, panel: NodeId) -> bool {
        self.registry.contains(panel) && self.host.contains(panel)
    }

    /// Registered panels, back to front.
    pub fn panels(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .registry
            .ids()
            .filter(|id| self.host.contains(*id))
            .collect();
        ids.sort_by_key(|id| (self.host.stacking(*id), *id));
        ids
    }

    pub fn is_minimized(&self, panel: NodeId) -> bool {
        self.host.has_indicator(panel, Indicator::Hidden)
    }

    pub fn active_panel(&self) -> Option<NodeId> {
        self.state.active_panel()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_active()
    }

    /// Drop any in-progress session and clear its indicators.
    pub fn reset_interaction(&mut self) {
        self.end_session();
    }

    /// Run a named operation against `panel`.
    pub fn invoke(&mut self, panel: NodeId, name: &str) -> PanelResult<()> {
        let op: PanelOp = name.parse()?;
        self.apply(op, panel)
    }

    pub fn apply(&mut self, op: PanelOp, panel: NodeId) -> PanelResult<()> {
        match op {
            PanelOp::Init => self.init(panel, Default::default()),
            PanelOp::Minimize => self.minimize(panel),
            PanelOp::Restore => self.restore(panel),
            PanelOp::Close => self.close(panel),
        }
    }

    pub(crate) fn nearest_panel(&self, node: NodeId) -> Option<NodeId> {
        self.registry.nearest_panel(&self.host, node)
    }

    /// Assign `panel` the next stacking value.
    pub(crate) fn raise(&mut self, panel: NodeId) -> u64 {
        let value = self.state.next_stacking();
        self.host.set_stacking(panel, value);
        value
    }

    pub(crate) fn begin_session(&mut self, session: Session) {
        if let Some(previous) = self.state.begin(session) {
            self.clear_session_marks(previous);
        }
        self.host.set_grabbed(session.handle, true);
        self.host.set_indicator(session.panel, Indicator::Moving, true);
        tracing::debug!(panel = ?session.panel, source = ?session.source, "grab started");
    }

    pub(crate) fn end_session(&mut self) -> Option<Session> {
        let session = self.state.end()?;
        self.clear_session_marks(session);
        tracing::debug!(panel = ?session.panel, source = ?session.source, "grab released");
        Some(session)
    }

    fn clear_session_marks(&mut self, session: Session) {
        self.host.set_grabbed(session.handle, false);
        self.host.set_indicator(session.panel, Indicator::Moving, false);
    }

    /// The live entry for `panel`, forgetting it if the host dropped the node.
    pub(crate) fn live_entry(&mut self, panel: NodeId) -> PanelResult<&mut PanelEntry> {
        if !self.host.contains(panel) {
            if self.registry.remove(panel).is_some() {
                tracing::debug!(panel = ?panel, "forgetting detached panel");
            }
            return Err(PanelError::NotFound(panel));
        }
        self.registry
            .get_mut(panel)
            .ok_or(PanelError::NotFound(panel))
    }
}
