//! Per-session state carried across generation cycles.

use std::sync::Arc;

use crate::worker::Outcome;

/// Where the current generation cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No request in flight; results of the last cycle stay visible.
    Idle,
    /// A worker thread is running the remote calls.
    Pending,
}

/// Results retained between cycles plus the current phase.
///
/// The last image and last error survive until a later cycle overwrites
/// them; starting a new request clears neither, and a success does not
/// erase an earlier error message.
pub struct Session {
    phase: Phase,
    last_image: Option<Arc<[u8]>>,
    last_error: Option<String>,
    cycle: u64,
}

impl Session {
    /// Fresh session: idle, nothing displayed.
    #[must_use]
    pub fn new() -> Self {
        Self { phase: Phase::Idle, last_image: None, last_error: None, cycle: 0 }
    }

    /// True while a worker is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    /// Bytes of the most recent successful generation.
    #[must_use]
    pub fn image(&self) -> Option<&Arc<[u8]>> {
        self.last_image.as_ref()
    }

    /// Message of the most recent failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// URI the current image is loaded under.
    ///
    /// Changes on every success so the texture cache never serves stale
    /// bytes for a new generation.
    #[must_use]
    pub fn image_uri(&self) -> String {
        format!("bytes://generated-{}", self.cycle)
    }

    /// Enter the pending phase. Prior image and error stay visible.
    pub fn begin(&mut self) {
        self.phase = Phase::Pending;
    }

    /// Apply the worker's terminal outcome and return to idle.
    pub fn settle(&mut self, outcome: Outcome) {
        self.phase = Phase::Idle;
        match outcome {
            Outcome::Success(bytes) => {
                self.cycle += 1;
                self.last_image = Some(Arc::from(bytes.into_boxed_slice()));
            }
            Outcome::Failure(message) => {
                self.last_error = Some(message);
            }
        }
    }

    /// Put a message in the error region outside a generation cycle
    /// (used for save failures).
    pub fn set_error(&mut self, message: String) {
        self.last_error = Some(message);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_empty() {
        let session = Session::new();
        assert!(!session.is_pending());
        assert!(session.image().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn success_cycle() {
        let mut session = Session::new();
        session.begin();
        assert!(session.is_pending());

        session.settle(Outcome::Success(vec![1, 2, 3]));
        assert!(!session.is_pending());
        assert_eq!(session.image().unwrap().as_ref(), &[1, 2, 3]);
        assert!(session.error().is_none());
    }

    #[test]
    fn failure_cycle_keeps_message_verbatim() {
        let mut session = Session::new();
        session.begin();
        session.settle(Outcome::Failure("Incorrect API key provided: invalid_api_key".into()));

        assert!(!session.is_pending());
        assert!(session.image().is_none());
        assert!(session.error().unwrap().contains("invalid_api_key"));
    }

    #[test]
    fn failure_keeps_previous_image() {
        let mut session = Session::new();
        session.begin();
        session.settle(Outcome::Success(vec![7]));

        session.begin();
        session.settle(Outcome::Failure("boom".into()));

        assert_eq!(session.image().unwrap().as_ref(), &[7]);
        assert_eq!(session.error(), Some("boom"));
    }

    #[test]
    fn prior_error_stays_until_next_failure() {
        let mut session = Session::new();
        session.begin();
        session.settle(Outcome::Failure("first".into()));

        session.begin();
        assert_eq!(session.error(), Some("first"));
        session.settle(Outcome::Success(vec![1]));
        assert_eq!(session.error(), Some("first"));

        session.begin();
        session.settle(Outcome::Failure("second".into()));
        assert_eq!(session.error(), Some("second"));
    }

    #[test]
    fn uri_changes_per_success() {
        let mut session = Session::new();
        let before = session.image_uri();
        session.begin();
        session.settle(Outcome::Success(vec![1]));
        let after = session.image_uri();
        assert_ne!(before, after);

        session.begin();
        session.settle(Outcome::Failure("no change".into()));
        assert_eq!(session.image_uri(), after);
    }

    #[test]
    fn save_error_is_reported() {
        let mut session = Session::new();
        session.set_error("I/O error: permission denied".into());
        assert!(session.error().unwrap().contains("permission denied"));
    }
}
