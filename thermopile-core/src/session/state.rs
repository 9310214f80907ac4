//! Session state machine
//!
//! A session is either `Uninitialized` (no model, no buffers) or `Ready`
//! (model bound, buffers sized for it). Every session operation is an
//! event; illegal events are rejected rather than ignored.

use crate::error::Error;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// No model bound; only `init` and `clear` are accepted
    Uninitialized,
    /// Model bound and buffers allocated
    Ready,
}

/// Session operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// Bind a model and allocate buffers
    Init,
    /// Acquire, verify and decode one frame
    Acquire,
    /// Write a device register
    Configure,
    /// Release buffers and unbind the model
    Clear,
}

impl SessionState {
    /// Check if frames can be read
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: SessionEvent) -> Result<Self, Error> {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (Uninitialized, Init) => Ok(Ready),
            (Ready, Init) => Err(Error::AlreadyInitialized),

            (Ready, Acquire) | (Ready, Configure) => Ok(Ready),
            (Uninitialized, Acquire) | (Uninitialized, Configure) => Err(Error::NotInitialized),

            // Clearing twice is a no-op
            (_, Clear) => Ok(Uninitialized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_clear() {
        let ready = SessionState::Uninitialized
            .transition(SessionEvent::Init)
            .unwrap();
        assert_eq!(ready, SessionState::Ready);
        assert!(ready.is_ready());

        let cleared = ready.transition(SessionEvent::Clear).unwrap();
        assert_eq!(cleared, SessionState::Uninitialized);
    }

    #[test]
    fn test_double_init_rejected() {
        assert_eq!(
            SessionState::Ready.transition(SessionEvent::Init),
            Err(Error::AlreadyInitialized)
        );
    }

    #[test]
    fn test_uninitialized_rejects_io() {
        for event in [SessionEvent::Acquire, SessionEvent::Configure] {
            assert_eq!(
                SessionState::Uninitialized.transition(event),
                Err(Error::NotInitialized)
            );
        }
    }

    #[test]
    fn test_ready_stays_ready() {
        for event in [SessionEvent::Acquire, SessionEvent::Configure] {
            assert_eq!(
                SessionState::Ready.transition(event),
                Ok(SessionState::Ready)
            );
        }
    }

    #[test]
    fn test_clear_is_idempotent() {
        for state in [SessionState::Uninitialized, SessionState::Ready] {
            assert_eq!(
                state.transition(SessionEvent::Clear),
                Ok(SessionState::Uninitialized)
            );
        }
    }
}
