//! 呼び出し方式間のパフォーマンス比較ベンチマーク
//!
//! 1回の反復で各方式がオペレーションをN回呼ぶ。スループットは呼び出し単位で報告する。

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use expr_bench::core::{ArgumentMode, CallCounter, StrategyKind};
use expr_bench::expression::{ClosureCompiler, InterpretingCompiler};
use expr_bench::services::DEFAULT_OPERATION_COUNT;
use expr_bench::strategies::StrategyFactory;
use std::time::Duration;

/// 4方式の比較（引数バッファ再利用）
fn benchmark_call_strategies(c: &mut Criterion) {
    bench_with_mode(c, "Call Strategies", ArgumentMode::Reuse, &StrategyKind::ALL);
}

/// 遅延束縛呼び出しの引数バッファ扱いの比較
fn benchmark_reflective_argument_modes(c: &mut Criterion) {
    bench_with_mode(
        c,
        "Reflective Fresh Arguments",
        ArgumentMode::Fresh,
        &[StrategyKind::Reflective],
    );
}

fn bench_with_mode(c: &mut Criterion, name: &str, mode: ArgumentMode, kinds: &[StrategyKind]) {
    let mut group = c.benchmark_group(name);
    group.measurement_time(Duration::from_secs(5));
    group.throughput(Throughput::Elements(DEFAULT_OPERATION_COUNT as u64));

    let baseline = InterpretingCompiler::new();
    let fast = ClosureCompiler::new();
    let factory = StrategyFactory::new(DEFAULT_OPERATION_COUNT, mode, &baseline, &fast);

    for &kind in kinds {
        let mut strategy = factory.build(kind).expect("strategy setup failed");
        let mut counter = CallCounter::new();

        group.bench_function(kind.label(), |b| {
            b.iter(|| {
                let before = counter.get();
                strategy.execute(&mut counter).expect("strategy execution failed");
                assert_eq!(
                    counter.delta_since(before),
                    DEFAULT_OPERATION_COUNT as u64,
                    "{kind} did not call the operation exactly N times"
                );
                std::hint::black_box(counter.get())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_call_strategies,
    benchmark_reflective_argument_modes
);
criterion_main!(benches);
