use clap::Parser;
use fresco::cli::{Cli, Commands};
use fresco::config::FrescoConfig;
use fresco::fixtures::seed_demo_store;
use fresco::observability::{ObservabilityConfig, init_observability};
use fresco_core::MonthKey;
use fresco_error::FrescoResult;
use fresco_models::{AnthropicClient, OpenAiClient};
use fresco_pipeline::{GenerationPipeline, GenerationRequest, StrategyPlanner};
use std::sync::Arc;

#[tokio::main]
async fn main() -> FrescoResult<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let config = FrescoConfig::load()?;

    init_observability(
        &ObservabilityConfig::default()
            .with_log_level(&config.log.level)
            .with_json_logs(config.log.json || cli.json_logs),
    );

    match cli.command {
        Commands::Plan { category, posts } => {
            let strategy = StrategyPlanner::plan(category, posts);
            println!("Content mix for {} ({} posts):", category, posts);
            for (content_type, count) in strategy.iter() {
                println!("  {:>3}  {}", count, content_type);
            }
        }
        Commands::Generate {
            owner,
            month,
            posts,
        } => {
            let target = month.unwrap_or_else(|| MonthKey::from_date(&chrono::Utc::now()));
            let timeout = config.providers.call_timeout();

            let narrative = Arc::new(AnthropicClient::from_env(
                config.providers.anthropic_model.clone(),
                timeout,
            )?);
            let structured = Arc::new(OpenAiClient::from_env(
                config.providers.openai_model.clone(),
                timeout,
            )?);

            let store = Arc::new(seed_demo_store(&owner, target).await);
            let pipeline = GenerationPipeline::new(store, narrative, structured)
                .with_call_timeout(timeout);

            let outcome = pipeline
                .run(&GenerationRequest {
                    owner,
                    target_month: target,
                    num_posts: posts,
                })
                .await?;

            match serde_json::to_string_pretty(&outcome) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!(error = %e, "Failed to render outcome"),
            }
        }
    }

    Ok(())
}
