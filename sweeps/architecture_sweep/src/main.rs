use namap_bench_runner::prelude::*;

/// Compare the gate-based, shuttling-based and hybrid rubidium architectures under every initial
/// coordinate mapping.
fn main() -> SweepResult<()> {
    let builder = SweepDefinitionBuilder::new_with_init(env!("CARGO_PKG_NAME"))
        .with_input_dir("circuits")
        .with_output_dir("output")
        .with_architectures(vec![
            ArchitectureVariant::new(
                ArchitectureKind::Gate,
                "architectures/rubidium_gate.json",
            ),
            ArchitectureVariant::new(
                ArchitectureKind::Shuttling,
                "architectures/rubidium_shuttling.json",
            ),
            ArchitectureVariant::new(
                ArchitectureKind::Hybrid,
                "architectures/rubidium_hybrid.json",
            ),
        ])
        .with_coordinate_mappings(vec![
            CoordinateMapping::Trivial,
            CoordinateMapping::Random,
            CoordinateMapping::Graph,
        ])
        .with_weights(vec![WeightPair::new(1.0, 1.0)])
        .with_report_layout(ReportLayout::GateBased)
        .with_timestamped_results();

    run(builder)?;

    Ok(())
}
