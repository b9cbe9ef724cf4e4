//! Simulator: owns the shared CPU, the step gate, and the engine thread.
//!
//! The engine thread runs `consume -> step -> retire` until the program halts
//! or faults, then closes the gate. The controller side (this struct) produces
//! steps and inspects the CPU between them. The CPU sits behind a mutex that
//! the engine holds only for the duration of one instruction.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info};

use crate::common::error::{EngineError, Fault, GateError, LoadError};
use crate::config::Config;
use crate::core::{Cpu, ExitStatus, StepOutcome};

use super::gate::StepGate;
use super::image::ProcessImage;

/// How the engine thread finished without a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The entry function returned to the sentinel.
    Halted(ExitStatus),
    /// The controller shut the engine down before the program halted.
    Stopped,
}

fn lock(cpu: &Mutex<Cpu>) -> MutexGuard<'_, Cpu> {
    cpu.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Engine thread body: one instruction per consumed step.
///
/// On halt or fault the gate is closed before the step is released, so a
/// controller settling on that step already observes the engine as stopped.
fn run_engine(cpu: &Mutex<Cpu>, gate: &StepGate) -> Result<RunOutcome, Fault> {
    loop {
        if gate.consume().is_err() {
            return Ok(RunOutcome::Stopped);
        }
        let outcome = lock(cpu).step();
        match outcome {
            Ok(StepOutcome::Continue) => gate.retire(),
            Ok(StepOutcome::Halted(status)) => {
                gate.close();
                info!(
                    rax = format_args!("{:#x}", status.rax),
                    retired = lock(cpu).retired,
                    "program halted"
                );
                return Ok(RunOutcome::Halted(status));
            }
            Err(fault) => {
                gate.close();
                error!(%fault, "execution fault");
                return Err(fault);
            }
        }
    }
}

/// Top-level simulator: shared CPU state + engine thread + step gate.
#[derive(Debug)]
pub struct Simulator {
    cpu: Arc<Mutex<Cpu>>,
    gate: Arc<StepGate>,
    engine: Option<JoinHandle<Result<RunOutcome, Fault>>>,
}

impl Simulator {
    /// Boots `image` on a fresh CPU and starts the engine thread.
    ///
    /// The engine blocks until the first step is produced.
    ///
    /// # Errors
    ///
    /// `LoadError` if the image does not fit or the thread cannot be spawned;
    /// in both cases no instruction has executed.
    pub fn start(config: &Config, image: &ProcessImage) -> Result<Self, LoadError> {
        let mut cpu = Cpu::new(config);
        let _ = cpu.boot(image)?;
        Self::spawn(cpu)
    }

    /// Starts the engine thread on an already booted CPU.
    ///
    /// # Errors
    ///
    /// `LoadError::Spawn` if the thread cannot be created.
    pub fn spawn(cpu: Cpu) -> Result<Self, LoadError> {
        let cpu = Arc::new(Mutex::new(cpu));
        let gate = Arc::new(StepGate::new());

        let engine = {
            let cpu = Arc::clone(&cpu);
            let gate = Arc::clone(&gate);
            thread::Builder::new()
                .name("engine".into())
                .spawn(move || run_engine(&cpu, &gate))
                .map_err(LoadError::Spawn)?
        };
        debug!("engine thread started");

        Ok(Self {
            cpu,
            gate,
            engine: Some(engine),
        })
    }

    /// The gate the engine consumes from.
    pub fn gate(&self) -> &StepGate {
        &self.gate
    }

    /// Executes one instruction and waits until it has retired.
    ///
    /// # Errors
    ///
    /// `GateError::Closed` if the engine already stopped.
    pub fn step(&self) -> Result<(), GateError> {
        self.gate.produce()?;
        self.gate.settle();
        Ok(())
    }

    /// Runs `f` against the CPU between steps.
    pub fn inspect<T>(&self, f: impl FnOnce(&Cpu) -> T) -> T {
        self.gate.settle();
        f(&lock(&self.cpu))
    }

    /// Returns true while the engine can still consume steps.
    pub fn is_running(&self) -> bool {
        !self.gate.is_closed()
    }

    /// Free-runs: produces steps until the engine stops, then joins it.
    ///
    /// # Errors
    ///
    /// `EngineError` if the program faulted or the engine panicked.
    pub fn run(&mut self) -> Result<RunOutcome, EngineError> {
        while self.gate.produce().is_ok() {}
        self.join()
    }

    /// Stops the engine if still running, then joins it.
    ///
    /// # Errors
    ///
    /// `EngineError` if the program faulted or the engine panicked.
    pub fn shutdown(&mut self) -> Result<RunOutcome, EngineError> {
        self.gate.close();
        self.join()
    }

    /// Waits for the engine thread to finish.
    ///
    /// Blocks indefinitely if the engine is still waiting for steps. Once
    /// joined, later calls report `RunOutcome::Stopped`; the CPU stays
    /// available through `inspect`.
    ///
    /// # Errors
    ///
    /// `EngineError` if the program faulted or the engine panicked.
    pub fn join(&mut self) -> Result<RunOutcome, EngineError> {
        let Some(engine) = self.engine.take() else {
            return Ok(RunOutcome::Stopped);
        };
        match engine.join() {
            Ok(result) => result.map_err(EngineError::from),
            Err(_) => Err(EngineError::Panicked),
        }
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        if let Some(engine) = self.engine.take() {
            self.gate.close();
            let _ = engine.join();
        }
    }
}
