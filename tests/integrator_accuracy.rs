//! Accuracy tests for numerical integrators
//!
//! Tests each integrator against known analytical solutions and verifies
//! expected order of convergence.

use gravitas::physics::diagnostics;
use gravitas::physics::error::Result;
use gravitas::physics::gravity::{DirectGravity, ForceModel};
use gravitas::physics::integrators::{
    ExplicitEuler, Integrator, RungeKuttaFourthOrder, SemiImplicitEuler,
};
use gravitas::physics::math::{Scalar, Vector};
use gravitas::physics::particle::{Particle, ParticleSet};
use gravitas::physics::simulation::{SimulationLoop, StopSignal};
use gravitas::physics::units;
use gravitas::scenarios;

const PI: Scalar = std::f64::consts::PI;

const BINARY_MASS: Scalar = 2.0e30;
const BINARY_SEPARATION: Scalar = 4.0e11;

/// Harmonic oscillator a = -ω²x, independent of the other particles
struct HarmonicOscillator {
    omega: Scalar,
}

impl HarmonicOscillator {
    /// Analytical position at time t for x(0) = 1, v(0) = 0
    fn exact_position(&self, t: Scalar) -> Vector {
        Vector::new((self.omega * t).cos(), 0.0, 0.0)
    }
}

impl ForceModel for HarmonicOscillator {
    fn acceleration_on(&self, target: &Particle, _: &[Particle]) -> Result<Vector> {
        Ok(-self.omega * self.omega * target.position())
    }
}

fn binary() -> Vec<Particle> {
    scenarios::binary_circular_orbit(BINARY_MASS, BINARY_SEPARATION)
        .unwrap()
        .particles()
        .to_vec()
}

fn advance(
    integrator: &dyn Integrator,
    particles: Vec<Particle>,
    force: &dyn ForceModel,
    dt: Scalar,
    steps: usize,
) -> Vec<Particle> {
    (0..steps).fold(particles, |current, _| {
        integrator.step(&current, force, dt).unwrap()
    })
}

fn separation(particles: &[Particle]) -> Scalar {
    (particles[1].position() - particles[0].position()).length()
}

/// Largest relative energy error seen while stepping
fn max_energy_error(integrator: &dyn Integrator, dt: Scalar, steps: usize) -> Scalar {
    let gravity = DirectGravity::new();
    let mut particles = binary();
    let initial = diagnostics::total_energy(&particles, units::GRAVITATIONAL_CONSTANT);
    let mut max_error = 0.0f64;

    for _ in 0..steps {
        particles = integrator.step(&particles, &gravity, dt).unwrap();
        let energy = diagnostics::total_energy(&particles, units::GRAVITATIONAL_CONSTANT);
        max_error = max_error.max(((energy - initial) / initial).abs());
    }

    max_error
}

#[test]
fn test_rk4_closes_kepler_orbit() {
    let dt = units::HOUR;
    let period = scenarios::circular_orbit_period(2.0 * BINARY_MASS, BINARY_SEPARATION);
    let steps = (period / dt).round() as usize;

    let initial = binary();
    let end = advance(
        &RungeKuttaFourthOrder,
        initial.clone(),
        &DirectGravity::new(),
        dt,
        steps,
    );

    let separation_error = (separation(&end) - BINARY_SEPARATION).abs() / BINARY_SEPARATION;
    assert!(
        separation_error < 0.01,
        "Separation drifted by {:.4}%",
        separation_error * 100.0
    );

    for (start, finish) in initial.iter().zip(&end) {
        let miss = (finish.position() - start.position()).length();
        assert!(
            miss < 0.01 * BINARY_SEPARATION,
            "Body {} missed its starting point by {:.3e} m",
            start.index(),
            miss
        );
    }
}

#[test]
fn test_semi_implicit_euler_energy_is_bounded() {
    let dt = units::HOUR;
    let period = scenarios::circular_orbit_period(2.0 * BINARY_MASS, BINARY_SEPARATION);
    let steps = (3.0 * period / dt) as usize;

    let semi_implicit = max_energy_error(&SemiImplicitEuler, dt, steps);
    let explicit = max_energy_error(&ExplicitEuler, dt, steps);

    println!(
        "Energy error over three orbits: semi-implicit {:.3e}, explicit {:.3e}",
        semi_implicit, explicit
    );

    assert!(
        semi_implicit < 1e-3,
        "Semi-implicit Euler energy error too large: {:.3e}",
        semi_implicit
    );
    assert!(
        explicit > 2.0 * semi_implicit,
        "Explicit Euler should drift further ({:.3e} vs {:.3e})",
        explicit,
        semi_implicit
    );
}

#[test]
fn test_rk4_convergence_order() {
    let period = scenarios::circular_orbit_period(2.0 * BINARY_MASS, BINARY_SEPARATION);
    let quarter = period / 4.0;
    // Body 0 starts on +x and orbits counterclockwise
    let exact = Vector::new(0.0, BINARY_SEPARATION / 2.0, 0.0);

    let errors: Vec<Scalar> = [50, 100]
        .into_iter()
        .map(|steps| {
            let dt = quarter / steps as Scalar;
            let end = advance(
                &RungeKuttaFourthOrder,
                binary(),
                &DirectGravity::new(),
                dt,
                steps,
            );
            (end[0].position() - exact).length()
        })
        .collect();

    let ratio = errors[0] / errors[1];
    println!("RK4 error ratio when halving dt: {:.2}", ratio);
    assert!(
        ratio > 10.0 && ratio < 22.0,
        "Unexpected error reduction: {} ({:?})",
        ratio,
        errors
    );
}

#[test]
fn test_semi_implicit_euler_order() {
    let oscillator = HarmonicOscillator { omega: 1.0 };
    let time_steps: [Scalar; 4] = [0.1, 0.05, 0.025, 0.0125];

    let errors: Vec<Scalar> = time_steps
        .iter()
        .map(|&dt| {
            let steps = (1.0 / dt).round() as usize;
            let start = vec![Particle::new(0, Vector::X, Vector::ZERO, 1.0).unwrap()];
            let end = advance(&SemiImplicitEuler, start, &oscillator, dt, steps);
            let exact = oscillator.exact_position(1.0);
            (end[0].position() - exact).length() / exact.length()
        })
        .collect();

    for i in 1..errors.len() {
        let order = (errors[i - 1] / errors[i]).log2();
        println!("Semi-implicit Euler convergence order: {:.2}", order);
        assert!(
            order > 0.8 && order < 1.5,
            "Unexpected convergence order: {}",
            order
        );
    }
}

#[test]
fn test_rk4_tracks_oscillator() {
    let oscillator = HarmonicOscillator { omega: 2.0 * PI };
    let start = vec![Particle::new(0, Vector::X, Vector::ZERO, 1.0).unwrap()];

    let end = advance(&RungeKuttaFourthOrder, start, &oscillator, 0.001, 1000);

    let error = (end[0].position() - oscillator.exact_position(1.0)).length();
    assert!(error < 1e-9, "RK4 error after one period: {:.3e}", error);
}

#[test]
fn test_symmetric_binary_stays_symmetric() {
    let integrators: [&dyn Integrator; 3] =
        [&ExplicitEuler, &SemiImplicitEuler, &RungeKuttaFourthOrder];

    for integrator in integrators {
        let end = advance(integrator, binary(), &DirectGravity::new(), units::DAY, 200);

        assert_eq!(
            end[0].position(),
            -end[1].position(),
            "{} broke position symmetry",
            integrator.name()
        );
        assert_eq!(
            end[0].velocity(),
            -end[1].velocity(),
            "{} broke velocity symmetry",
            integrator.name()
        );
    }
}

#[test]
fn test_loop_snapshots_match_integrator() {
    let particles = scenarios::binary_circular_orbit(BINARY_MASS, BINARY_SEPARATION).unwrap();
    let mut simulation = SimulationLoop::new(
        particles,
        Box::new(RungeKuttaFourthOrder),
        Box::new(DirectGravity::new()),
        units::DAY,
    )
    .unwrap();

    let mut last = None;
    let summary = simulation
        .run(&StopSignal::new(), Some(30), |snapshot| {
            last = Some(snapshot.clone())
        })
        .unwrap();
    let last = last.unwrap();

    let expected = advance(
        &RungeKuttaFourthOrder,
        binary(),
        &DirectGravity::new(),
        units::DAY,
        30,
    );

    assert_eq!(summary.steps, 30);
    assert_eq!(last.step, 30);
    assert_eq!(last.elapsed, 30.0 * units::DAY);
    for (state, particle) in last.particles.iter().zip(&expected) {
        assert_eq!(state.index, particle.index());
        assert_eq!(state.position, particle.position());
        assert_eq!(state.velocity, particle.velocity());
    }
}

#[test]
fn test_every_registered_integrator_runs_from_config() {
    let registry = gravitas::physics::integrators::IntegratorRegistry::default();

    for name in registry.list_available() {
        let config = gravitas::config::PhysicsConfig {
            time_step: units::DAY,
            integrator: name.clone(),
        };
        let particles: ParticleSet = scenarios::three_body().unwrap();
        let mut simulation = SimulationLoop::from_config(&config, particles).unwrap();

        for _ in 0..10 {
            simulation.step().unwrap();
        }

        assert_eq!(simulation.integrator().name(), name);
        assert_eq!(simulation.clock().elapsed(), 10.0 * units::DAY);
    }
}
