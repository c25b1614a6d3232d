use mast_model::prelude::FeaOutput;

/// Print the displacement of one node and the internal forces of one member
/// for one load case of an FEA output document.
///
/// Usage: read_results [output.json] [load_case_id] [node] [member]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let arg = |i: usize, default: &'static str| args.get(i).map(|s| s.as_str()).unwrap_or(default);

    let output_path = arg(1, "01-examples-nils/04_fea_output_B1.json");
    let load_case_id = arg(2, "C37");
    let node_number = arg(3, "94");
    let member_number = arg(4, "1");

    let output = FeaOutput::load(output_path)?;
    tracing::info!(
        "Loaded {} load case results from {}",
        output.fea_load_case_results.len(),
        output_path
    );

    match output.node_displacement(load_case_id, node_number)? {
        Some(displacement) => println!("{}", displacement),
        None => tracing::warn!("No displacement for node {} in {}", node_number, load_case_id),
    }
    match output.internal_forces(load_case_id, member_number)? {
        Some(forces) => println!("{}", forces),
        None => tracing::warn!("No internal forces for member {} in {}", member_number, load_case_id),
    }
    Ok(())
}
