//! Close-request gate.
//!
//! A close cannot wait for the confirmation dialog, so the gate cancels it,
//! asks, and lets the answer re-enter the termination routine later. Once the
//! user confirms, the latch stays set for the rest of the session.

/// Gate states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// The window may close freely.
    Open,
    /// Close requests hide the window; the process keeps running.
    BackgroundDeferred,
    /// A confirmation prompt is waiting for an answer.
    ConfirmPending,
    /// The user agreed to stop downloads; close always proceeds.
    Latched,
}

/// What the coordinator must do with a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// Cancel the close and hide the window.
    HideToBackground,
    /// Cancel the close and present the confirmation prompt.
    AskConfirmation,
    /// Cancel the close; a prompt is already on screen.
    AwaitingAnswer,
    /// Run the termination routine.
    Terminate,
}

#[derive(Debug)]
pub struct ShutdownGate {
    state: GateState,
    latched: bool,
}

impl ShutdownGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Open,
            latched: false,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Evaluate a close request against the current preferences.
    pub fn on_close_requested(
        &mut self,
        run_in_background: bool,
        downloads_running: bool,
    ) -> CloseDecision {
        if run_in_background {
            if self.state != GateState::ConfirmPending {
                self.state = GateState::BackgroundDeferred;
            }
            return CloseDecision::HideToBackground;
        }

        if downloads_running && !self.latched {
            if self.state == GateState::ConfirmPending {
                return CloseDecision::AwaitingAnswer;
            }
            self.state = GateState::ConfirmPending;
            log::info!("[GATE] downloads running, asking before close");
            return CloseDecision::AskConfirmation;
        }

        if !self.latched {
            self.state = GateState::Open;
        }
        CloseDecision::Terminate
    }

    /// Apply the user's answer to a pending prompt.
    ///
    /// Returns `Terminate` when the user confirmed, `None` when they declined
    /// or when no prompt was pending.
    pub fn on_confirmation(&mut self, confirmed: bool) -> Option<CloseDecision> {
        if self.state != GateState::ConfirmPending {
            log::debug!("[GATE] ignoring confirmation answer with no pending prompt");
            return None;
        }

        if confirmed {
            self.latched = true;
            self.state = GateState::Latched;
            log::info!("[GATE] close confirmed, latch set");
            Some(CloseDecision::Terminate)
        } else {
            self.state = GateState::Open;
            log::info!("[GATE] close declined");
            None
        }
    }
}

impl Default for ShutdownGate {
    fn default() -> Self {
        Self::new()
    }
}
