//! Benchmarks for rotor machine operations.
//!
//! Measures machine construction, single-byte encryption, buffer throughput,
//! and how substitution cost scales with the number of rotors.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rotormachine::{MachineSettings, RotorMachine};

/// Seed used consistently across all benchmarks.
const BENCH_SEED: u64 = 2024;

/// Buffer size for the throughput benchmarks.
const BUFFER_SIZE: usize = 64 * 1024;

fn bench_buffer() -> Vec<u8> {
    (0..BUFFER_SIZE).map(|i| (i % 256) as u8).collect()
}

/// Benchmarks building a three-rotor machine from settings.
///
/// Covers reflector and rotor shuffling plus the fixed-point repair pass.
fn bench_construction(c: &mut Criterion) {
    c.bench_function("machine_construction", |b| {
        b.iter(|| {
            MachineSettings::new()
                .seed(black_box(BENCH_SEED))
                .plug_pair(b'a', b'z')
                .build()
                .unwrap()
        });
    });
}

/// Benchmarks `encrypt_byte()` with the default three rotors.
///
/// The machine keeps stepping between iterations, so the double-step path
/// is exercised at its natural frequency.
fn bench_encrypt_byte(c: &mut Criterion) {
    let mut machine = RotorMachine::with_seed(3, BENCH_SEED).unwrap();

    let mut group = c.benchmark_group("encrypt_single_byte");
    group.throughput(Throughput::Bytes(1));
    group.bench_function("3_rotors", |b| {
        b.iter(|| machine.encrypt_byte(black_box(0x41)));
    });
    group.finish();
}

/// Benchmarks in-place buffer processing.
fn bench_process_buffer(c: &mut Criterion) {
    let mut machine = RotorMachine::with_seed(3, BENCH_SEED).unwrap();
    machine.set_plugboard(&[(1, 2), (3, 4), (5, 6)]);
    let mut buffer = bench_buffer();

    let mut group = c.benchmark_group("process_buffer");
    group.throughput(Throughput::Bytes(BUFFER_SIZE as u64));
    group.bench_function("in_place_64k", |b| {
        b.iter(|| machine.process_in_place(black_box(&mut buffer)));
    });
    group.finish();
}

/// Benchmarks buffer throughput across rotor counts.
///
/// Every rotor is traversed twice per byte, so cost grows linearly with the
/// rotor count while stepping stays bounded to three rotors.
fn bench_rotor_scaling(c: &mut Criterion) {
    let rotor_counts: &[usize] = &[1, 3, 8];
    let input = bench_buffer();

    let mut group = c.benchmark_group("rotor_scaling");
    group.throughput(Throughput::Bytes(BUFFER_SIZE as u64));

    for &count in rotor_counts {
        let mut machine = RotorMachine::with_seed(count, BENCH_SEED).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| machine.process_bytes(black_box(&input)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_encrypt_byte,
    bench_process_buffer,
    bench_rotor_scaling,
);
criterion_main!(benches);
