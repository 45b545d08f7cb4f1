// Process lifecycle.
//
// The bot only ever moves forward through these states. There is no
// reconnect/resume path: anything that fails before `Listening` ends the
// process.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Connected,
    CommandsRegistered,
    Listening,
    ShuttingDown,
    Closed,
}

impl LifecycleState {
    /// The only state reachable from this one.
    pub fn next(self) -> Option<Self> {
        match self {
            LifecycleState::Created => Some(LifecycleState::Connected),
            LifecycleState::Connected => Some(LifecycleState::CommandsRegistered),
            LifecycleState::CommandsRegistered => Some(LifecycleState::Listening),
            LifecycleState::Listening => Some(LifecycleState::ShuttingDown),
            LifecycleState::ShuttingDown => Some(LifecycleState::Closed),
            LifecycleState::Closed => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid lifecycle transition: {from:?} -> {to:?}")]
pub struct LifecycleError {
    pub from: LifecycleState,
    pub to: LifecycleState,
}

#[derive(Debug)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Created,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Move to `to`, which must be the direct successor of the current state.
    pub fn advance(&mut self, to: LifecycleState) -> Result<(), LifecycleError> {
        if self.state.next() != Some(to) {
            return Err(LifecycleError {
                from: self.state,
                to,
            });
        }

        tracing::debug!(from = ?self.state, to = ?to, "Lifecycle transition");
        self.state = to;
        Ok(())
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_linear_run() {
        let mut lifecycle = Lifecycle::new();
        for state in [
            LifecycleState::Connected,
            LifecycleState::CommandsRegistered,
            LifecycleState::Listening,
            LifecycleState::ShuttingDown,
            LifecycleState::Closed,
        ] {
            lifecycle.advance(state).unwrap();
            assert_eq!(lifecycle.state(), state);
        }
        assert_eq!(lifecycle.state().next(), None);
    }

    #[test]
    fn test_cannot_skip_registration() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.advance(LifecycleState::Connected).unwrap();

        let err = lifecycle.advance(LifecycleState::Listening).unwrap_err();
        assert_eq!(
            err,
            LifecycleError {
                from: LifecycleState::Connected,
                to: LifecycleState::Listening,
            }
        );
        assert_eq!(lifecycle.state(), LifecycleState::Connected);
    }

    #[test]
    fn test_cannot_go_backwards_or_resume() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.advance(LifecycleState::Connected).unwrap();
        assert!(lifecycle.advance(LifecycleState::Created).is_err());
        assert!(lifecycle.advance(LifecycleState::Connected).is_err());
    }
}
