//! Segment Model Example - build a beam model for one precast segment
//!
//! Usage: `segment-example [segment.json] [hauling]`
//!
//! Without a file a built-in 120 ft segment is used. With `hauling` the
//! self-weight is factored for transport instead of the casting-bed case.

use anyhow::{Context, Result};
use segment_model::prelude::*;

fn builtin_segment() -> SegmentData {
    // Units: ft, kip
    SegmentData::new(120.0, SectionProperties::new(5.5, 7.2, 2.1, 0.0), 576_000.0)
        .with_transition(TransitionMarker::new(4.0, PointAttributes::SECTION_CHANGE))
        .with_transition(TransitionMarker::new(116.0, PointAttributes::SECTION_CHANGE))
        .with_transition(TransitionMarker::new(60.0, PointAttributes::LEFT_FACE))
        .with_self_weight(LinearLoad::new(0.0, 4.0, 0.92, 0.92))
        .with_self_weight(LinearLoad::new(4.0, 116.0, 0.86, 0.86))
        .with_self_weight(LinearLoad::new(116.0, 120.0, 0.92, 0.92))
        .with_diaphragm(ConcentratedLoad::force(60.0, 3.4))
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let hauling = args.iter().any(|a| a == "hauling");

    let segment = match args.iter().find(|a| *a != "hauling") {
        Some(path) => SegmentData::from_file(path)
            .with_context(|| format!("Failed to load segment from {path}"))?,
        None => builtin_segment(),
    };

    let length = segment.length;
    let (supports, distributor): (SupportLocations, Box<dyn LoadDistributor>) = if hauling {
        (
            SupportLocations::from_overhangs(length, 0.1 * length, 0.1 * length),
            Box::new(HaulingLoads::new(1.2, 1.2)),
        )
    } else {
        (
            SupportLocations::from_overhangs(length, 0.01 * length, 0.01 * length),
            Box::new(SelfWeightLoads::default()),
        )
    };

    let request = AnalysisRequest::new(0, supports)
        .with_pois((0..=10).map(|i| PointOfInterest::new(i, length * i as f64 / 10.0)));

    let mut context = AnalysisContext::new(ModelOptions::default());
    let analysis = context
        .build(&segment, &request, distributor.as_ref())
        .context("Failed to build segment model")?;

    eprintln!(
        "=== Segment Model: {} joints, {} members, cantilevers left={} right={} ===",
        analysis.model.joints().len(),
        analysis.model.members().len(),
        analysis.cantilevers.left,
        analysis.cantilevers.right
    );
    for (case, loading) in analysis.model.loadings() {
        eprintln!(
            "  Load case {case}: total transverse load {:.3}",
            loading.total_transverse_force()
        );
    }

    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
