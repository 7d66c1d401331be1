//! Deploy a model, run one inference and wait for the job to finish.
//! Run with: cargo run -p quantlix-client --example quickstart

use quantlix_client::{DeployOptions, QuantlixClient, DEFAULT_BASE_URL};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("quantlix_client=debug")
        .init();

    dotenvy::dotenv().ok();

    let api_key = std::env::var("QUANTLIX_API_KEY")?;
    let base_url =
        std::env::var("QUANTLIX_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let model_id = std::env::var("QUANTLIX_MODEL").unwrap_or_else(|_| "qwen-0.5b".to_string());

    println!("Base URL: {}", base_url);

    let client = QuantlixClient::with_timeout(api_key, &base_url, Duration::from_secs(30))?;

    let deployment = client.deploy(&model_id, DeployOptions::default()).await?;
    println!(
        "Deployment {} is {}",
        deployment.deployment_id, deployment.status
    );

    let job = client
        .run(
            &deployment.deployment_id,
            serde_json::json!({"prompt": "Say hello in one word."}),
        )
        .await?;
    println!("Job {} queued", job.job_id);

    for _ in 0..30 {
        let status = client.status(&job.job_id).await?;
        match status.status.as_str() {
            "completed" | "failed" => {
                println!("Job finished: {}", status.status);
                if let Some(output) = status.output_data {
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                if let Some(error) = status.error_message {
                    println!("Error: {}", error);
                }
                return Ok(());
            }
            other => println!("Job is {}", other),
        }
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    println!("Gave up waiting for job {}", job.job_id);
    Ok(())
}
