//! Business Tuner backend entry point.
//!
//! Loads configuration, builds the Postgres pool and LLM gateway, wires the
//! application handlers, and serves the axum router.

use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use business_tuner::adapters::http::{
    app_router, AuthState, BotHandlers, CronHandlers, InsightHandlers, InterviewHandlers,
    OrganizationHandlers,
};
use business_tuner::adapters::llm::{OpenAiGateway, OpenAiGatewayConfig};
use business_tuner::adapters::postgres::{
    PostgresBotRepository, PostgresConversationReader, PostgresInterviewRepository,
    PostgresKnowledgeBase, PostgresOrganizationRepository, PostgresPlanRepository,
    PostgresSessionValidator, PostgresTranscriptSource,
};
use business_tuner::adapters::sources::{WoocommerceSource, WordpressSource};
use business_tuner::application::handlers::bots::{
    CreateBotHandler, DeleteBotHandler, GetBotHandler, ListBotsHandler, UpdateBotHandler,
};
use business_tuner::application::handlers::insights::GetProjectInsightsHandler;
use business_tuner::application::handlers::interview::{
    GetInterviewHandler, SendMessageHandler, StartInterviewHandler,
};
use business_tuner::application::handlers::kb_growth::RunKbGrowthHandler;
use business_tuner::application::handlers::organizations::{
    CreateOrganizationHandler, GetOrganizationHandler, ListOrganizationsHandler,
};
use business_tuner::application::handlers::plans::{
    GeneratePlanHandler, GetEffectivePlanHandler, UpdatePlanOverridesHandler,
};
use business_tuner::config::AppConfig;
use business_tuner::ports::{
    BotRepository, ConversationReader, InterviewRepository, KnowledgeBaseStore, KnowledgeSource,
    LlmGateway, OrganizationRepository, PlanRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!("connected to database");

    let api_key = config
        .llm
        .api_key
        .as_ref()
        .map(|k| k.expose_secret().clone())
        .unwrap_or_default();
    let gateway: Arc<dyn LlmGateway> = Arc::new(OpenAiGateway::new(
        OpenAiGatewayConfig::new(api_key)
            .with_base_url(config.llm.base_url.clone())
            .with_timeout(config.llm.timeout()),
    )?);

    let bots: Arc<dyn BotRepository> = Arc::new(PostgresBotRepository::new(pool.clone()));
    let organizations: Arc<dyn OrganizationRepository> =
        Arc::new(PostgresOrganizationRepository::new(pool.clone()));
    let interviews: Arc<dyn InterviewRepository> =
        Arc::new(PostgresInterviewRepository::new(pool.clone()));
    let plans: Arc<dyn PlanRepository> = Arc::new(PostgresPlanRepository::new(pool.clone()));
    let conversations: Arc<dyn ConversationReader> =
        Arc::new(PostgresConversationReader::new(pool.clone()));
    let knowledge_base: Arc<dyn KnowledgeBaseStore> =
        Arc::new(PostgresKnowledgeBase::new(pool.clone()));

    let sources: Vec<Arc<dyn KnowledgeSource>> = vec![
        Arc::new(PostgresTranscriptSource::chatbot(pool.clone())),
        Arc::new(PostgresTranscriptSource::interview(pool.clone())),
        Arc::new(WordpressSource::new()?),
        Arc::new(WoocommerceSource::new()?),
    ];

    let bot_handlers = BotHandlers::new(
        Arc::new(CreateBotHandler::new(bots.clone())),
        Arc::new(GetBotHandler::new(bots.clone())),
        Arc::new(ListBotsHandler::new(bots.clone())),
        Arc::new(UpdateBotHandler::new(bots.clone())),
        Arc::new(DeleteBotHandler::new(bots.clone())),
        Arc::new(GeneratePlanHandler::new(bots.clone(), plans.clone())),
        Arc::new(GetEffectivePlanHandler::new(plans.clone())),
        Arc::new(UpdatePlanOverridesHandler::new(plans.clone())),
    );

    let interview_handlers = InterviewHandlers::new(
        Arc::new(StartInterviewHandler::new(
            bots.clone(),
            plans.clone(),
            interviews.clone(),
        )),
        Arc::new(SendMessageHandler::new(
            interviews.clone(),
            gateway.clone(),
            config.llm.generation_model.clone(),
            config.llm.classification_model.clone(),
        )),
        Arc::new(GetInterviewHandler::new(interviews.clone())),
    );

    let insight_handlers =
        InsightHandlers::new(Arc::new(GetProjectInsightsHandler::new(conversations)));

    let organization_handlers = OrganizationHandlers::new(
        Arc::new(CreateOrganizationHandler::new(organizations.clone())),
        Arc::new(GetOrganizationHandler::new(organizations.clone())),
        Arc::new(ListOrganizationsHandler::new(organizations)),
    );

    let cron_handlers = CronHandlers::new(
        Arc::new(RunKbGrowthHandler::new(bots, sources, knowledge_base)),
        config.cron.secret.clone(),
        config.cron.kb_lookback_days,
    );

    let auth: AuthState = Arc::new(PostgresSessionValidator::new(pool));

    let cors = {
        let origins = config.server.cors_origins_list();
        if origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins = origins
                .iter()
                .map(|o| o.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?;
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = app_router(
        bot_handlers,
        interview_handlers,
        insight_handlers,
        organization_handlers,
        cron_handlers,
        auth,
    )
    .layer(TraceLayer::new_for_http())
    .layer(TimeoutLayer::new(config.server.request_timeout()))
    .layer(cors);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
