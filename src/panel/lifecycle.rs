use super::{PanelConfig, PanelEntry, PanelManager, PanelOp};
use crate::error::{PanelError, PanelResult};
use crate::host::{ControlRole, Indicator, NodeId, PanelHost};

impl<H: PanelHost> PanelManager<H> {
    /// Attach panel behaviour to an existing node and give it its tiled
    /// default placement.
    pub fn init(&mut self, panel: NodeId, config: PanelConfig) -> PanelResult<()> {
        if !self.host.contains(panel) {
            tracing::warn!(panel = ?panel, "init on a node that is not in the document");
            return Err(PanelError::NotFound(panel));
        }
        let handle = self
            .host
            .find_control(panel, ControlRole::Handle)
            .ok_or(PanelError::MissingHandle(panel))?;
        let close = self.host.find_control(panel, ControlRole::Close);
        let minimize = self.host.find_control(panel, ControlRole::Minimize);

        self.host.set_indicator(panel, Indicator::Panel, true);
        self.host.set_grabbed(handle, false);
        if self.host.focus_order(handle).is_none() {
            self.host.set_focus_order(handle, self.settings.default_focus_order);
        }

        let ordinal = self.state.register_panel();
        let position = self.settings.tiled_position(ordinal);
        self.host.set_position(panel, position);

        let replaced = self.registry.insert(PanelEntry {
            root: panel,
            handle,
            close,
            minimize,
            callbacks: config.into(),
        });
        tracing::debug!(
            panel = ?panel,
            seq = ordinal,
            top = position.top,
            left = position.left,
            reinit = replaced.is_some(),
            "initialized panel"
        );

        self.notify(panel, PanelOp::Init)?;
        Ok(())
    }

    /// Hide the panel. Repeating it re-applies the indicator and re-runs the
    /// callback.
    pub fn minimize(&mut self, panel: NodeId) -> PanelResult<()> {
        self.live_entry(panel)?;
        self.host.set_indicator(panel, Indicator::Hidden, true);
        tracing::debug!(panel = ?panel, "minimized panel");
        self.notify(panel, PanelOp::Minimize)?;
        Ok(())
    }

    /// Show the panel again and bring it to the front.
    pub fn restore(&mut self, panel: NodeId) -> PanelResult<()> {
        self.live_entry(panel)?;
        self.host.set_indicator(panel, Indicator::Hidden, false);
        let stacking = self.raise(panel);
        tracing::debug!(panel = ?panel, stacking, "restored panel");
        self.notify(panel, PanelOp::Restore)?;
        Ok(())
    }

    /// Notify the caller, then remove the panel from the document for good.
    pub fn close(&mut self, panel: NodeId) -> PanelResult<()> {
        self.live_entry(panel)?;
        if self.state.active_panel() == Some(panel) {
            self.end_session();
        }
        let Some(mut entry) = self.registry.remove(panel) else {
            return Err(PanelError::NotFound(panel));
        };
        tracing::debug!(panel = ?panel, "closing panel");
        let host: &dyn PanelHost = &self.host;
        (entry.callbacks.hook(PanelOp::Close))(host, panel);
        self.host.remove(panel);
        Ok(())
    }

    /// Run the hook registered for `op` with read access to the host.
    fn notify(&mut self, panel: NodeId, op: PanelOp) -> PanelResult<bool> {
        self.live_entry(panel)?;
        let host: &dyn PanelHost = &self.host;
        let entry = self
            .registry
            .get_mut(panel)
            .ok_or(PanelError::NotFound(panel))?;
        Ok((entry.callbacks.hook(op))(host, panel))
    }
}
