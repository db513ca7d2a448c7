use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;

/// The operations a panel handle answers to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelOp {
    Init,
    Minimize,
    Restore,
    Close,
}

impl PanelOp {
    pub const ALL: [PanelOp; 4] = [
        PanelOp::Init,
        PanelOp::Minimize,
        PanelOp::Restore,
        PanelOp::Close,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PanelOp::Init => "init",
            PanelOp::Minimize => "minimize",
            PanelOp::Restore => "restore",
            PanelOp::Close => "close",
        }
    }
}

impl fmt::Display for PanelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelOp {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| PanelError::InvalidOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for op in PanelOp::ALL {
            assert_eq!(op.as_str().parse::<PanelOp>(), Ok(op));
        }
    }

    #[test]
    fn unknown_name_is_invalid_operation() {
        assert_eq!(
            "maximize".parse::<PanelOp>(),
            Err(PanelError::InvalidOperation("maximize".into()))
        );
        // names are exact
        assert!("Close".parse::<PanelOp>().is_err());
    }
}
