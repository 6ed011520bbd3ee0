//! Benchmarks for radqec circuit and noise-table operations
//!
//! Run with: cargo bench -p radqec-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use radqec_ir::{Circuit, ClbitId, NoiseChannelSet, PauliChannel, QuantumError, QubitId};

/// Benchmark building a repeated-syndrome style circuit
fn bench_syndrome_rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("syndrome_rounds");

    for rounds in &[1u32, 2, 5, 10] {
        group.bench_with_input(BenchmarkId::new("build", rounds), rounds, |b, &r| {
            b.iter(|| {
                let mut circuit = Circuit::with_size("rounds", 5, r);
                for round in 0..r {
                    circuit.reset(QubitId(4)).unwrap();
                    circuit.h(QubitId(4)).unwrap();
                    for q in 0..4 {
                        circuit.cz(QubitId(4), QubitId(q)).unwrap();
                    }
                    circuit.h(QubitId(4)).unwrap();
                    circuit.measure(QubitId(4), ClbitId(round)).unwrap();
                }
                black_box(circuit)
            });
        });
    }

    group.finish();
}

/// Benchmark circuit depth calculation
fn bench_circuit_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_depth");

    for num_qubits in &[5u32, 10, 20] {
        let mut circuit = Circuit::with_size("bench", *num_qubits, 0);
        for _layer in 0..5 {
            for i in 0..*num_qubits {
                circuit.h(QubitId(i)).unwrap();
            }
            for i in (0..*num_qubits - 1).step_by(2) {
                circuit.cx(QubitId(i), QubitId(i + 1)).unwrap();
            }
        }

        group.bench_with_input(
            BenchmarkId::new("depth", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit.depth()));
            },
        );
    }

    group.finish();
}

/// Benchmark noise-rule lookup on an all-pairs table
fn bench_noise_lookup(c: &mut Criterion) {
    let mut noise = NoiseChannelSet::new();
    let single = QuantumError::Pauli(PauliChannel::symmetric(0.01).unwrap());
    let pair = QuantumError::depolarizing(0.01, 2).unwrap();
    for q in 0..7 {
        noise.add_rule("h", [QubitId(q)], single).unwrap();
    }
    for a in 0..7 {
        for b in 0..7 {
            if a != b {
                noise.add_rule("cx", [QubitId(a), QubitId(b)], pair).unwrap();
            }
        }
    }

    c.bench_function("noise_lookup_hit", |b| {
        let qubits = [QubitId(3), QubitId(5)];
        b.iter(|| black_box(noise.lookup(black_box("cx"), black_box(&qubits))));
    });
    c.bench_function("noise_lookup_miss", |b| {
        let qubits = [QubitId(2)];
        b.iter(|| black_box(noise.lookup(black_box("measure"), black_box(&qubits))));
    });
}

criterion_group!(
    benches,
    bench_syndrome_rounds,
    bench_circuit_depth,
    bench_noise_lookup,
);

criterion_main!(benches);
