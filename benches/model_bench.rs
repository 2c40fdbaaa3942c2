//! Benchmarks for segment model construction

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use segment_model::prelude::*;

fn create_segment(transitions: usize) -> SegmentData {
    let length = 150.0;
    let mut segment = SegmentData::new(length, SectionProperties::rectangular(1.5, 6.0), 4700.0)
        .with_uniform_self_weight(0.9);

    for i in 1..transitions {
        let x = length * i as f64 / transitions as f64;
        segment =
            segment.with_transition(TransitionMarker::new(x, PointAttributes::SECTION_CHANGE));
    }
    for i in 0..=10 {
        let x = length * i as f64 / 10.0;
        segment = segment.with_deck_station(DeckLoadStation::new(x, 1.2, 0.1, 0.05));
    }
    segment
}

fn create_request(length: f64, pois: u64) -> AnalysisRequest {
    AnalysisRequest::new(0, SupportLocations::from_overhangs(length, 2.0, 2.0))
        .with_pois((0..=pois).map(|i| PointOfInterest::new(i, length * i as f64 / pois as f64)))
}

fn benchmark_self_weight(c: &mut Criterion) {
    let segment = create_segment(10);
    let request = create_request(segment.length, 20);
    c.bench_function("segment_10_transitions_self_weight", |b| {
        b.iter(|| {
            let mut context = AnalysisContext::default();
            let analysis = context
                .build(&segment, &request, &SelfWeightLoads::default())
                .unwrap();
            black_box(&analysis);
        })
    });
}

fn benchmark_dense_segment(c: &mut Criterion) {
    let segment = create_segment(100);
    let request = create_request(segment.length, 100);
    c.bench_function("segment_100_transitions_self_weight", |b| {
        b.iter(|| {
            let mut context = AnalysisContext::default();
            let analysis = context
                .build(&segment, &request, &SelfWeightLoads::default())
                .unwrap();
            black_box(&analysis);
        })
    });
}

fn benchmark_deck(c: &mut Criterion) {
    let segment = create_segment(20);
    let request = create_request(segment.length, 20);
    c.bench_function("segment_20_transitions_deck", |b| {
        b.iter(|| {
            let mut context = AnalysisContext::new(ModelOptions::default().with_cantilevers(false));
            let analysis = context
                .build(&segment, &request, &DeckLoads::default())
                .unwrap();
            black_box(&analysis);
        })
    });
}

fn benchmark_hauling(c: &mut Criterion) {
    let segment = create_segment(20);
    let supports = SupportLocations::from_overhangs(segment.length, 15.0, 15.0);
    let request = AnalysisRequest::new(0, supports);
    c.bench_function("segment_20_transitions_hauling", |b| {
        b.iter(|| {
            let mut context = AnalysisContext::default();
            let analysis = context
                .build(&segment, &request, &HaulingLoads::new(1.2, 0.8))
                .unwrap();
            black_box(&analysis);
        })
    });
}

criterion_group!(
    benches,
    benchmark_self_weight,
    benchmark_dense_segment,
    benchmark_deck,
    benchmark_hauling,
);

criterion_main!(benches);
