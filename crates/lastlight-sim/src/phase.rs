//! The phase machine: which phase transitions are legal, and warned
//! no-ops for everything else.

use tracing::warn;

use lastlight_core::enums::Phase;

/// Owns the current [`Phase`]. Transitions that are not in the legal set
/// (including identical-state re-entry) change nothing and are reported
/// as soft warnings, never fired as events.
#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: Phase,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: Phase::MainMenu,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The legal transition set. Any phase may return to the main menu
    /// (run abandonment / restart); terminal phases have no other exits.
    pub fn can_transition(from: Phase, to: Phase) -> bool {
        use Phase::*;
        match (from, to) {
            (MainMenu, Day) => true,
            (Day, Transition) => true,
            (Transition, Night) => true,
            (Night, Dawn) | (Night, Victory) => true,
            (Dawn, Day) => true,
            (Day | Transition | Night | Dawn, GameOver) => true,
            (from, MainMenu) => from != MainMenu,
            _ => false,
        }
    }

    /// Attempt a transition. Returns `false` without side effects when
    /// the transition is not legal from the current phase.
    pub fn transition(&mut self, to: Phase) -> bool {
        if !Self::can_transition(self.phase, to) {
            warn!(
                from = self.phase.as_str(),
                to = to.as_str(),
                "phase_transition_rejected"
            );
            return false;
        }
        self.phase = to;
        true
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}
