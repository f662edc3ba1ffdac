//! Benchmarks for the derived-state presenter.
//!
//! Run with: cargo bench -p slidekit-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use slidekit_core::direction::Direction;
use slidekit_widgets::{DerivedState, IndicatorMode, PresenterInput};
use std::hint::black_box;

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("presenter/derive");

    for count in [4usize, 32, 256] {
        for show_pagination in [false, true] {
            let input = PresenterInput {
                active_index: count / 2,
                slide_count: count,
                loop_enabled: false,
                show_controls: true,
                show_pagination,
                direction: Direction::Ltr,
            };
            let name = if show_pagination { "with_pagination" } else { "controls_only" };
            group.bench_with_input(BenchmarkId::new(name, count), &input, |b, input| {
                b.iter(|| black_box(DerivedState::derive(black_box(*input))));
            });
        }
    }

    group.finish();
}

fn bench_indicator(c: &mut Criterion) {
    let mut group = c.benchmark_group("presenter/indicator");
    let state = DerivedState::derive(PresenterInput {
        active_index: 7,
        slide_count: 24,
        ..PresenterInput::default()
    });

    for mode in [IndicatorMode::Dots, IndicatorMode::Compact, IndicatorMode::Slide] {
        group.bench_with_input(
            BenchmarkId::new("format", format!("{mode:?}")),
            &mode,
            |b, mode| b.iter(|| black_box(state.indicator(*mode, 40))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_derive, bench_indicator);
criterion_main!(benches);
