//! Noisy trajectory simulator backend.

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use radqec_hal::{
    Capabilities, Counts, ExecutionResult, Executor, HalError, HalResult, ValidationResult,
    check_shots, validate_circuit,
};
use radqec_ir::{Circuit, InstructionKind, NoiseChannelSet, QuantumError, StandardGate};

use crate::statevector::Statevector;

/// Default qubit limit; 16 qubits is 1 MiB of amplitudes per trajectory.
pub const DEFAULT_MAX_QUBITS: u32 = 16;

/// Default per-run shot limit.
pub const DEFAULT_MAX_SHOTS: u32 = 10_000_000;

/// Classical bits are packed into a `u64` per shot.
const MAX_CLBITS: usize = 64;

/// One step of a compiled circuit, with its noise rule already resolved.
#[derive(Debug, Clone)]
enum Step {
    Gate {
        gate: StandardGate,
        qubits: [usize; 2],
        noise: Option<QuantumError>,
    },
    Reset {
        qubit: usize,
        noise: Option<QuantumError>,
    },
    Measure {
        qubit: usize,
        clbit: usize,
    },
}

/// A circuit lowered to a flat step list for the shot loop.
#[derive(Debug, Clone)]
struct Program {
    steps: Vec<Step>,
    num_qubits: usize,
    num_clbits: usize,
}

impl Program {
    fn compile(circuit: &Circuit, noise: &NoiseChannelSet) -> HalResult<Self> {
        let instructions = circuit
            .instructions()
            .map_err(|e| HalError::InvalidCircuit(e.to_string()))?;

        let mut steps = Vec::with_capacity(instructions.len());
        let mut noisy_steps = 0usize;
        for inst in instructions {
            let rule = noise.lookup(inst.name(), &inst.qubits).copied();
            match inst.kind {
                InstructionKind::Gate(gate) => {
                    let mut qubits = [0usize; 2];
                    for (slot, q) in qubits.iter_mut().zip(&inst.qubits) {
                        *slot = q.index();
                    }
                    noisy_steps += usize::from(rule.is_some());
                    steps.push(Step::Gate {
                        gate,
                        qubits,
                        noise: rule,
                    });
                }
                InstructionKind::Reset => {
                    noisy_steps += usize::from(rule.is_some());
                    steps.push(Step::Reset {
                        qubit: inst.qubits[0].index(),
                        noise: rule,
                    });
                }
                InstructionKind::Measure => {
                    for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                        steps.push(Step::Measure {
                            qubit: q.index(),
                            clbit: c.index(),
                        });
                    }
                }
                InstructionKind::Barrier => {}
            }
        }

        debug!(
            "Compiled {} steps ({} with noise) from {} noise rules",
            steps.len(),
            noisy_steps,
            noise.len()
        );

        Ok(Self {
            steps,
            num_qubits: circuit.num_qubits(),
            num_clbits: circuit.num_clbits(),
        })
    }

    /// Run `shots` independent trajectories and histogram the classical registers.
    fn sample(&self, shots: u32, seed: u64) -> FxHashMap<u64, u64> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut sv = Statevector::new(self.num_qubits);
        let mut histogram: FxHashMap<u64, u64> = FxHashMap::default();

        for shot in 0..shots {
            sv.reinitialize();
            let mut register = 0u64;

            for step in &self.steps {
                match step {
                    Step::Gate {
                        gate,
                        qubits,
                        noise,
                    } => {
                        let operands = &qubits[..gate.num_qubits()];
                        sv.apply_gate(*gate, operands);
                        if let Some(error) = noise {
                            apply_fault(&mut sv, error, operands, &mut rng);
                        }
                    }
                    Step::Reset { qubit, noise } => {
                        sv.reset(*qubit, rng.gen_range(0.0..1.0));
                        if let Some(error) = noise {
                            apply_fault(&mut sv, error, &[*qubit], &mut rng);
                        }
                    }
                    Step::Measure { qubit, clbit } => {
                        let bit = 1u64 << clbit;
                        if sv.measure(*qubit, rng.gen_range(0.0..1.0)) {
                            register |= bit;
                        } else {
                            register &= !bit;
                        }
                    }
                }
            }

            *histogram.entry(register).or_insert(0) += 1;

            if shot > 0 && shot % 100_000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }

        histogram
    }

    /// Render a packed register most-significant clbit first.
    fn bitstring(&self, register: u64) -> String {
        (0..self.num_clbits)
            .rev()
            .map(|j| if (register >> j) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}

fn apply_fault(sv: &mut Statevector, error: &QuantumError, qubits: &[usize], rng: &mut SmallRng) {
    let paulis = error.sample(rng.gen_range(0.0..1.0));
    for (pauli, &qubit) in paulis.iter().zip(qubits) {
        sv.apply_pauli(*pauli, qubit);
    }
}

/// Local noisy simulator.
///
/// Each shot is an independent statevector trajectory: gates are applied
/// exactly, then any matching noise rule samples a Pauli fault. Measurements
/// and resets collapse the state mid-circuit, so repeated syndrome rounds
/// behave like they would on hardware.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a simulator with default limits and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            capabilities: Capabilities::trajectory_simulator(DEFAULT_MAX_QUBITS, DEFAULT_MAX_SHOTS)
                .with_name("simulator"),
            seed: None,
        }
    }

    /// Fix the RNG seed so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use the given seed, or entropy when `None`.
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Override the qubit limit.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.capabilities.num_qubits = max_qubits;
        self
    }

    /// Override the shot limit.
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.capabilities.max_shots = max_shots;
        self
    }

    /// Configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn check(&self, circuit: &Circuit, shots: u32) -> HalResult<()> {
        check_shots(&self.capabilities, shots)?;
        if circuit.num_clbits() > MAX_CLBITS {
            return Err(HalError::CircuitTooLarge(format!(
                "{} classical bits exceeds the simulator limit of {MAX_CLBITS}",
                circuit.num_clbits()
            )));
        }
        match validate_circuit(&self.capabilities, circuit)? {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid { reasons } => {
                if circuit.num_qubits() > self.capabilities.num_qubits as usize {
                    Err(HalError::CircuitTooLarge(reasons.join("; ")))
                } else {
                    Err(HalError::InvalidCircuit(reasons.join("; ")))
                }
            }
        }
    }

    /// Validate the request and compile it, choosing the seed for this run.
    fn prepare(
        &self,
        circuit: &Circuit,
        noise: &NoiseChannelSet,
        shots: u32,
    ) -> HalResult<(Program, u64)> {
        self.check(circuit, shots)?;
        let program = Program::compile(circuit, noise)?;
        let seed = self.seed.unwrap_or_else(rand::random);
        debug!(
            "Starting simulation: {} qubits, {} shots, seed {}",
            program.num_qubits, shots, seed
        );
        Ok((program, seed))
    }

    /// Render the sampled histogram as an [`ExecutionResult`].
    fn finish(
        &self,
        program: &Program,
        histogram: FxHashMap<u64, u64>,
        run: RunInfo,
    ) -> ExecutionResult {
        debug!("Simulation completed in {:?}", run.elapsed);
        let mut counts = Counts::new();
        for (register, count) in histogram {
            counts.insert(program.bitstring(register), count);
        }
        ExecutionResult::new(counts, run.shots)
            .with_execution_time(run.elapsed.as_millis() as u64)
            .with_seed(Some(run.seed))
            .with_metadata(serde_json::json!({ "noise_rules": run.noise_rules }))
    }

    /// Run synchronously on the current thread.
    #[instrument(skip(self, circuit, noise), fields(circuit = circuit.name(), rules = noise.len()))]
    pub fn simulate(
        &self,
        circuit: &Circuit,
        noise: &NoiseChannelSet,
        shots: u32,
    ) -> HalResult<ExecutionResult> {
        let (program, seed) = self.prepare(circuit, noise, shots)?;

        let start = Instant::now();
        let histogram = program.sample(shots, seed);
        let run = RunInfo {
            shots,
            seed,
            noise_rules: noise.len(),
            elapsed: start.elapsed(),
        };
        Ok(self.finish(&program, histogram, run))
    }
}

/// Bookkeeping carried from sampling into the result.
struct RunInfo {
    shots: u32,
    seed: u64,
    noise_rules: usize,
    elapsed: Duration,
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Executor for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        validate_circuit(&self.capabilities, circuit)
    }

    #[instrument(skip(self, circuit, noise), fields(circuit = circuit.name(), rules = noise.len()))]
    async fn run(
        &self,
        circuit: &Circuit,
        noise: &NoiseChannelSet,
        shots: u32,
    ) -> HalResult<ExecutionResult> {
        let (program, seed) = self.prepare(circuit, noise, shots)?;

        let start = Instant::now();
        let (program, histogram) = tokio::task::spawn_blocking(move || {
            let histogram = program.sample(shots, seed);
            (program, histogram)
        })
        .await
        .map_err(|e| HalError::JobFailed(format!("simulation task failed: {e}")))?;
        let run = RunInfo {
            shots,
            seed,
            noise_rules: noise.len(),
            elapsed: start.elapsed(),
        };
        Ok(self.finish(&program, histogram, run))
    }
}
