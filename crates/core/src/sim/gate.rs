//! Step Gate.
//!
//! A single-slot signal that admits one instruction per request. The
//! controller `produce`s a request; the engine `consume`s it before every
//! fetch. A second `produce` blocks until the first has been consumed, which
//! throttles a free-running controller to exactly one step ahead.
//!
//! Beyond the slot, the gate tracks whether a consumed step is still
//! executing (`retire` ends it) so the controller can `settle` before reading
//! state, and whether the engine has stopped (`close`).

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::common::error::GateError;

#[derive(Debug, Default)]
struct GateState {
    /// A produced request awaits the engine.
    pending: bool,
    /// The engine consumed a request and has not retired it yet.
    in_flight: bool,
    /// The engine stopped; no request will ever be consumed again.
    closed: bool,
}

/// Bounded (capacity-1) step request channel.
#[derive(Debug, Default)]
pub struct StepGate {
    state: Mutex<GateState>,
    signal: Condvar,
}

impl StepGate {
    /// Creates an open gate with no pending request.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_while<'a>(
        &'a self,
        guard: MutexGuard<'a, GateState>,
        condition: impl FnMut(&mut GateState) -> bool,
    ) -> MutexGuard<'a, GateState> {
        self.signal
            .wait_while(guard, condition)
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests one step, blocking while a previous request is unconsumed.
    ///
    /// # Errors
    ///
    /// `GateError::Closed` once the engine has stopped.
    pub fn produce(&self) -> Result<(), GateError> {
        let mut state = self.wait_while(self.lock(), |s| s.pending && !s.closed);
        if state.closed {
            return Err(GateError::Closed);
        }
        state.pending = true;
        self.signal.notify_all();
        Ok(())
    }

    /// Blocks until a request is pending, then takes it.
    ///
    /// # Errors
    ///
    /// `GateError::Closed` if the gate is closed with nothing pending.
    pub fn consume(&self) -> Result<(), GateError> {
        let mut state = self.wait_while(self.lock(), |s| !s.pending && !s.closed);
        if !state.pending {
            return Err(GateError::Closed);
        }
        state.pending = false;
        state.in_flight = true;
        self.signal.notify_all();
        Ok(())
    }

    /// Marks the most recently consumed step as executed.
    pub fn retire(&self) {
        let mut state = self.lock();
        state.in_flight = false;
        self.signal.notify_all();
    }

    /// Blocks until every produced step has executed or the engine stopped.
    pub fn settle(&self) {
        let _state = self.wait_while(self.lock(), |s| (s.pending || s.in_flight) && !s.closed);
    }

    /// Stops the gate, waking every waiter. Pending requests are discarded.
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        state.pending = false;
        state.in_flight = false;
        self.signal.notify_all();
    }

    /// Returns true once the engine has stopped.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Returns true if a produced request has not been consumed yet.
    pub fn is_pending(&self) -> bool {
        self.lock().pending
    }
}
