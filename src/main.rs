use anyhow::Context;
use recall_chat::{
    AppState,
    api::routes::create_router,
    cli::{Cli, Commands, session},
    llm::OpenAIClient,
    memory::RecallioClient,
    orchestrator::Orchestrator,
    utils::config::Config,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let default_filter = if cli.verbose {
        "recall_chat=debug,tower_http=debug"
    } else {
        "recall_chat=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    let memory = Arc::new(
        RecallioClient::new(
            config.recallio.api_base.clone(),
            config.recallio.api_key.clone(),
        )
        .context("failed to build memory service client")?,
    );
    let completion = Arc::new(OpenAIClient::new(
        config.openai.api_key.clone(),
        config.openai.api_base.clone(),
        config.openai.model.clone(),
    ));
    let orchestrator = Arc::new(Orchestrator::new(memory, completion, config.recall_limit()));

    match cli.command {
        Some(Commands::Chat) => {
            let output = session::Output::new(!cli.no_color);
            session::run(
                &orchestrator,
                &config.recallio.user_id,
                &config.recallio.project_id,
                &config.openai.model,
                &output,
            )
            .await
            .context("chat session failed")?;
        }
        None => {
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState {
                config: Arc::new(config),
                orchestrator,
            };
            let app = create_router(state);

            tracing::info!(%addr, "starting HTTP server");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            axum::serve(listener, app).await.context("server error")?;
        }
    }

    Ok(())
}
