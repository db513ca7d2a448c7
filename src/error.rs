use thiserror::Error;

use crate::host::NodeId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// An operation name that the panel surface does not define.
    #[error("method '{0}' does not exist")]
    InvalidOperation(String),

    /// The node is not a registered panel, or it has been closed.
    #[error("panel not found: {0}")]
    NotFound(NodeId),

    #[error("panel {0} has no drag handle")]
    MissingHandle(NodeId),
}

pub type PanelResult<T> = Result<T, PanelError>;
