use std::fmt;

use crate::api::types::{BlockId, KeyCode, PlayerId};

/// Errors raised by registration calls and level/asset handling.
///
/// The per-tick simulation never produces these: bad runtime state is
/// resolved by treating it as non-colliding.
#[derive(Debug)]
pub enum EngineError {
    /// A registration call was given values it cannot run with.
    Configuration(String),
    /// A sprite source could not be resolved. Recoverable: callers substitute a fill.
    AssetLoad { id: String, reason: String },
    /// A level document could not be parsed or written.
    Level(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Configuration(msg) => write!(f, "configuration error: {}", msg),
            EngineError::AssetLoad { id, reason } => {
                write!(f, "failed to load asset '{}': {}", id, reason)
            }
            EngineError::Level(msg) => write!(f, "level error: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Level(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Non-fatal conditions that turn an operation into a no-op.
/// Reported through the `log` facade, never returned as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicWarning {
    JumpWhileAirborne(PlayerId),
    JumpDuringDeathLock(PlayerId),
    UnboundKey(KeyCode),
    ClickWithoutHandler(BlockId),
}

impl LogicWarning {
    pub(crate) fn report(self) {
        log::debug!("{}", self);
    }
}

impl fmt::Display for LogicWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicWarning::JumpWhileAirborne(id) => {
                write!(f, "jump ignored: player {} is airborne", id.0)
            }
            LogicWarning::JumpDuringDeathLock(id) => {
                write!(f, "jump ignored: player {} is respawning", id.0)
            }
            LogicWarning::UnboundKey(key) => write!(f, "no key-down handler for key {}", key.0),
            LogicWarning::ClickWithoutHandler(id) => {
                write!(f, "block {} was clicked but has no click handler", id.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_asset() {
        let err = EngineError::AssetLoad {
            id: "coin.png".into(),
            reason: "not found".into(),
        };
        assert_eq!(err.to_string(), "failed to load asset 'coin.png': not found");
    }

    #[test]
    fn json_errors_become_level_errors() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("{");
        let err: EngineError = parse.unwrap_err().into();
        assert!(matches!(err, EngineError::Level(_)));
    }
}
