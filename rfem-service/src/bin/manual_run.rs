#[path = "../executor.rs"]
mod executor;
#[path = "../models.rs"]
mod models;
#[path = "../settings.rs"]
mod settings;

use executor::{plan_build, RemoteExecutor};
use mast_model::prelude::{BuilderConfig, FeaInput, ModelBuilder};

/// Build one document and submit it to the gateway, like the original batch
/// scripts: begin modification, create everything, calculate, finish.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let input_path = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or("01-examples-nils/03_fea_input_B1.json");

    let input = FeaInput::load(input_path)?;
    let config = settings::load_builder_config(BuilderConfig::guyed_mast())?;
    let builder = ModelBuilder::new(config);
    let (summary, commands) = plan_build(&builder, &input)?;

    let executor = RemoteExecutor::from_env()?;
    let report = executor.submit_plan(&commands).await?;
    tracing::info!("Submitted {} commands as job {}", report.submitted, report.job_id);

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
