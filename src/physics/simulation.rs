//! The stepping loop that owns the particle set and the clock

use super::error::{PhysicsError, SimulationError};
use super::gravity::{DirectGravity, ForceModel};
use super::integrators::{Integrator, IntegratorRegistry};
use super::math::{Scalar, Vector};
use super::particle::ParticleSet;
use super::snapshot::Snapshot;
use crate::config::PhysicsConfig;
use bevy::log::{debug, error, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Accumulated simulated time
///
/// `elapsed` is derived from the step count, so it grows by exactly one
/// time step per step and never accumulates rounding drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    time_step: Scalar,
    steps: u64,
}

impl SimulationClock {
    pub fn new(time_step: Scalar) -> Self {
        Self {
            time_step,
            steps: 0,
        }
    }

    #[inline]
    pub fn time_step(&self) -> Scalar {
        self.time_step
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated seconds since the start of the run
    #[inline]
    pub fn elapsed(&self) -> Scalar {
        self.steps as Scalar * self.time_step
    }

    fn tick(&mut self) {
        self.steps += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoopState {
    /// Constructed, no step taken yet
    #[default]
    Idle,
    Running,
    /// A step produced non-finite state; no further steps are possible
    Halted,
}

/// Cooperative cancellation request, checked between steps only
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Signalled,
    StepLimit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps: u64,
    pub elapsed: Scalar,
    pub reason: StopReason,
}

/// Repeatedly advances a particle set with a fixed time step
///
/// The loop owns the set for its whole lifetime. Each step evaluates the
/// integrator on an immutable view of the current set and installs the
/// result only if the whole step succeeded, so observers only ever see
/// complete post-step states.
pub struct SimulationLoop {
    particles: ParticleSet,
    clock: SimulationClock,
    integrator: Box<dyn Integrator>,
    force: Box<dyn ForceModel>,
    state: LoopState,
}

impl SimulationLoop {
    pub fn new(
        particles: ParticleSet,
        integrator: Box<dyn Integrator>,
        force: Box<dyn ForceModel>,
        time_step: Scalar,
    ) -> Result<Self, SimulationError> {
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(SimulationError::InvalidTimeStep(time_step));
        }

        if particles.is_empty() {
            return Err(SimulationError::EmptyParticleSet);
        }

        info!(
            "Simulating {} particles with {} (dt = {} s)",
            particles.len(),
            integrator.name(),
            time_step
        );

        Ok(Self {
            particles,
            clock: SimulationClock::new(time_step),
            integrator,
            force,
            state: LoopState::Idle,
        })
    }

    /// Builds a loop with direct gravity and the integrator named in
    /// `config`.
    pub fn from_config(
        config: &PhysicsConfig,
        particles: ParticleSet,
    ) -> Result<Self, SimulationError> {
        let integrator = IntegratorRegistry::default()
            .create(&config.integrator)
            .map_err(SimulationError::UnknownIntegrator)?;

        Self::new(
            particles,
            integrator,
            Box::new(DirectGravity::new()),
            config.time_step,
        )
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    #[inline]
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    #[inline]
    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.clock.steps(), self.clock.elapsed(), &self.particles)
    }

    /// Moves an idle loop to running. Has no effect otherwise.
    pub fn start(&mut self) {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
        }
    }

    /// Advances the set by one time step and returns the new snapshot.
    ///
    /// On `SingularForce` the state is left exactly as it was before the
    /// call and the loop keeps running, so the caller may `reposition` a
    /// particle and retry. Non-finite results halt the loop.
    pub fn step(&mut self) -> Result<Snapshot, SimulationError> {
        match self.state {
            LoopState::Halted => {
                return Err(SimulationError::Halted {
                    step: self.clock.steps(),
                });
            }
            LoopState::Idle => self.start(),
            LoopState::Running => {}
        }

        let step = self.clock.steps() + 1;
        let dt = self.clock.time_step();

        let advanced = self
            .integrator
            .step(self.particles.particles(), self.force.as_ref(), dt)
            .map_err(|source| self.failure(step, source))?;

        let non_finite: Vec<usize> = advanced
            .iter()
            .filter(|particle| !particle.is_finite())
            .map(|particle| particle.index())
            .collect();

        if !non_finite.is_empty() {
            self.state = LoopState::Halted;
            return Err(self.failure(
                step,
                PhysicsError::NonFiniteState {
                    indices: non_finite,
                },
            ));
        }

        self.particles.replace(advanced);
        self.clock.tick();

        debug!("Step {} complete, t = {} s", step, self.clock.elapsed());

        Ok(self.snapshot())
    }

    /// Steps until `stop` is raised or `max_steps` more steps were taken,
    /// handing every snapshot to `observer`.
    pub fn run(
        &mut self,
        stop: &StopSignal,
        max_steps: Option<u64>,
        mut observer: impl FnMut(&Snapshot),
    ) -> Result<RunSummary, SimulationError> {
        let mut taken = 0;

        let reason = loop {
            if stop.is_stopped() {
                break StopReason::Signalled;
            }
            if max_steps.is_some_and(|limit| taken >= limit) {
                break StopReason::StepLimit;
            }

            let snapshot = self.step()?;
            observer(&snapshot);
            taken += 1;
        };

        Ok(RunSummary {
            steps: taken,
            elapsed: self.clock.elapsed(),
            reason,
        })
    }

    /// Moves one particle between steps, e.g. to separate a coincident pair.
    pub fn reposition(&mut self, index: usize, position: Vector) -> Result<(), PhysicsError> {
        self.particles.set_position(index, position)
    }

    fn failure(&self, step: u64, source: PhysicsError) -> SimulationError {
        match &source {
            PhysicsError::SingularForce { first, second } => warn!(
                "Step {} aborted: particles {} and {} coincide",
                step, first, second
            ),
            other => error!("Step {} failed: {}", step, other),
        }

        SimulationError::Step {
            step,
            elapsed: self.clock.elapsed(),
            source,
        }
    }
}
