//! Performance benchmarks for the controller tick loop.
//!
//! The controller runs on a 10 ms cooperative tick, so a tick must stay
//! far below that budget whatever phase the gate is in.
//!
//! # Run Benchmarks
//!
//! ```sh
//! # Run all tick benchmarks
//! cargo bench --bench tick_bench
//!
//! # Run one group
//! cargo bench --bench tick_bench -- idle_tick
//!
//! # Compare against a saved baseline
//! cargo bench --bench tick_bench -- --save-baseline main
//! cargo bench --bench tick_bench -- --baseline main
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use gatekeep_emulator::{AccessController, GatePhase, Peripherals, VirtualDisplay};
use gatekeep_hardware::mock::{
    MockGate, MockIndicators, MockKeypad, MockKeypadHandle, MockRemoteLink,
};

type Controller =
    AccessController<MockKeypad, MockRemoteLink, VirtualDisplay, MockGate, MockIndicators>;

fn controller() -> (Controller, MockKeypadHandle) {
    let (keypad, handle) = MockKeypad::new();
    let controller = AccessController::new(Peripherals {
        keypad,
        remote: MockRemoteLink::new(),
        display: VirtualDisplay::default(),
        gate: MockGate::new(),
        indicators: MockIndicators::new(),
    })
    .expect("controller should build over mock ports");
    (controller, handle)
}

/// Benchmark a single tick with nothing to do.
fn bench_idle_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("idle_tick");
    group.throughput(Throughput::Elements(1));

    let (mut controller, _handle) = controller();
    group.bench_function("idle", |b| {
        b.iter(|| black_box(controller.tick()).expect("tick should succeed"));
    });

    group.finish();
}

/// Benchmark a single tick while the gate counts down.
fn bench_open_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_tick");
    group.throughput(Throughput::Elements(1));

    let (mut controller, handle) = controller();
    handle.press_sequence("1805").expect("keys should queue");
    while controller.phase() != GatePhase::Open(10) {
        controller.tick().expect("tick should succeed");
    }

    let mut queued = false;
    group.bench_function("countdown", |b| {
        b.iter(|| {
            controller.tick().expect("tick should succeed");
            // Restart the cycle once it has run out
            match controller.phase() {
                GatePhase::Idle if !queued => {
                    handle.press_sequence("1805").expect("keys should queue");
                    queued = true;
                }
                GatePhase::Evaluating => queued = false,
                _ => {}
            }
        });
    });

    group.finish();
}

/// Benchmark complete entry cycles of varying outcome.
fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_cycle");

    for (name, code) in [("granted", "1805"), ("denied", "0000")] {
        group.bench_with_input(BenchmarkId::new("cycle", name), &code, |b, &code| {
            b.iter(|| {
                let (mut controller, handle) = controller();
                handle.press_sequence(code).expect("keys should queue");
                while controller.phase() == GatePhase::Idle {
                    controller.tick().expect("tick should succeed");
                }
                while controller.phase() != GatePhase::Idle {
                    controller.tick().expect("tick should succeed");
                }
                black_box(controller.uptime_ms())
            });
        });
    }

    group.finish();
}

/// Benchmark remote line verification.
fn bench_remote_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("remote_line");
    group.throughput(Throughput::Elements(1));

    let (mut controller, _handle) = controller();
    group.bench_function("verify", |b| {
        b.iter(|| {
            controller.remote_mut().submit(black_box("1805"));
            controller.tick().expect("tick should succeed");
            controller.remote_mut().take_responses()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_idle_tick,
    bench_open_tick,
    bench_full_cycle,
    bench_remote_line
);
criterion_main!(benches);
