use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{calculator_router, chatbot_router};
use medcalc_core::config::{
    knowledge_base_path_from_env_value, max_batch_from_env_value, max_magnitude_from_env_value,
    reports_dir_from_env_value,
};
use medcalc_core::CoreConfig;

/// Main entry point for medcalc
///
/// Starts both HTTP services concurrently:
/// - medical chatbot on port 8000 (configurable via CHATBOT_ADDR)
/// - number calculator on port 5000 (configurable via CALCULATOR_ADDR)
///
/// # Environment Variables
/// - `CHATBOT_ADDR`: chatbot listen address (default: "0.0.0.0:8000")
/// - `CALCULATOR_ADDR`: calculator listen address (default: "0.0.0.0:5000")
/// - `REPORTS_DIR`: directory saved reports are written to (default: "reports")
/// - `MEDCALC_KNOWLEDGE_BASE`: YAML knowledge base replacing the built-in one
/// - `MEDCALC_MAX_MAGNITUDE`: largest absolute value `/analyze` accepts (default: 10000000)
/// - `MEDCALC_MAX_BATCH`: most numbers one `/analyze` request may carry (default: 1000)
///
/// # Returns
/// * `Ok(())` - If both servers start and run successfully
/// * `Err(anyhow::Error)` - If configuration, knowledge base loading or a server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medcalc=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let chatbot_addr = std::env::var("CHATBOT_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let calculator_addr =
        std::env::var("CALCULATOR_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());

    let cfg = CoreConfig::new(
        reports_dir_from_env_value(std::env::var("REPORTS_DIR").ok()),
        knowledge_base_path_from_env_value(std::env::var("MEDCALC_KNOWLEDGE_BASE").ok()),
        max_magnitude_from_env_value(std::env::var("MEDCALC_MAX_MAGNITUDE").ok())?,
    )?
    .with_max_batch(max_batch_from_env_value(
        std::env::var("MEDCALC_MAX_BATCH").ok(),
    )?)?;

    let knowledge = Arc::new(cfg.load_knowledge_base()?);
    tracing::info!("loaded {} conditions", knowledge.len());

    let chatbot = chatbot_router(knowledge);
    let calculator = calculator_router(&cfg);

    tracing::info!("-- Starting medcalc chatbot on {}", chatbot_addr);
    tracing::info!("-- Starting medcalc calculator on {}", calculator_addr);
    tracing::info!("-- Saving reports under {}", cfg.reports_dir().display());

    let chatbot_listener = tokio::net::TcpListener::bind(&chatbot_addr).await?;
    let calculator_listener = tokio::net::TcpListener::bind(&calculator_addr).await?;

    let chatbot_server = async { axum::serve(chatbot_listener, chatbot).await };
    let calculator_server = async { axum::serve(calculator_listener, calculator).await };

    tokio::try_join!(chatbot_server, calculator_server)?;

    Ok(())
}
