use namap_bench_runner::prelude::*;

fn main() -> SweepResult<()> {
    let builder = SweepDefinitionBuilder::new_with_init(env!("CARGO_PKG_NAME"))
        .with_input_dir("benchmarks")
        .with_output_dir("output_circuit/mixedHW/0.99_1")
        .with_architectures(vec![ArchitectureVariant::new(
            ArchitectureKind::Hybrid,
            "json/rubidium_mixed.json",
        )])
        .with_coordinate_mappings(vec![CoordinateMapping::Trivial])
        .with_weights(vec![WeightPair::new(0.99, 1.0)])
        .with_report_layout(ReportLayout::CzCount)
        .with_timestamped_results();

    run(builder)?;

    Ok(())
}
