//! State machine for lamina acquisition
//!
//! Acquisition states: NotOwned → Owned via Acquire (idempotent once owned),
//! any state → NotOwned via Reset. There is no failing transition, so the
//! machine is total.

/// Whether the collector owns the lamina
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcquisitionState {
    NotOwned,
    Owned,
}

impl AcquisitionState {
    pub fn from_flag(adquirida: bool) -> Self {
        if adquirida {
            Self::Owned
        } else {
            Self::NotOwned
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned)
    }
}

impl std::fmt::Display for AcquisitionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOwned => write!(f, "not_owned"),
            Self::Owned => write!(f, "owned"),
        }
    }
}

/// Events that trigger acquisition transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AcquisitionEvent {
    /// The collector got the lamina
    Acquire,
    /// Soft removal: the lamina row stays, ownership is cleared
    Reset,
}

impl std::fmt::Display for AcquisitionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Acquire => write!(f, "acquire"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

/// Result of applying an event to a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: AcquisitionState,
    pub to: AcquisitionState,
}

impl Transition {
    /// True when the event left the state unchanged (acquire while owned,
    /// reset while not owned)
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Lamina acquisition state machine
pub struct AcquisitionStateMachine;

impl AcquisitionStateMachine {
    /// Apply an event to the current state
    pub fn transition(current: AcquisitionState, event: AcquisitionEvent) -> Transition {
        let to = match (current, event) {
            (AcquisitionState::NotOwned, AcquisitionEvent::Acquire) => AcquisitionState::Owned,
            (AcquisitionState::Owned, AcquisitionEvent::Acquire) => AcquisitionState::Owned,
            (AcquisitionState::Owned, AcquisitionEvent::Reset) => AcquisitionState::NotOwned,
            (AcquisitionState::NotOwned, AcquisitionEvent::Reset) => AcquisitionState::NotOwned,
        };
        Transition { from: current, to }
    }
}
