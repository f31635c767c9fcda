use std::sync::Arc;

use actix_files::Files;
use actix_session::{config::PersistentSession, storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::{time::Duration, Key}, middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::{error, info};

use email_reply_assistant::config::{self, Settings};
use email_reply_assistant::models::session_manager::SessionManager;
use email_reply_assistant::routes::{api_routes, page_routes};
use email_reply_assistant::routes::app_state::{AppState, PipelineInfo};
use email_reply_assistant::services::model_loader::{HubPipelineFactory, ModelLoader};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    config::init_logging();

    let settings = Settings::from_env().context("Invalid configuration")?;
    let pipeline_info = PipelineInfo::from_settings(&settings);
    let loader = Arc::new(ModelLoader::new(Arc::new(HubPipelineFactory::new(settings.clone()))));

    // Nothing is served until all three pipelines are ready.
    if let Err(e) = loader.get().await {
        error!("Model loading error: {}", e);
        return Err(e).context("Failed to load pipelines");
    }

    let state = AppState {
        loader,
        session_manager: SessionManager::new(),
        pipeline_info,
    };
    let key = Key::generate();

    info!("Starting server on http://{}:{}", settings.host, settings.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .session_lifecycle(
                        PersistentSession::default().session_ttl(Duration::seconds(config::SESSION_TTL_SECS as i64)),
                    )
                    .build(),
            )
            .app_data(web::Data::new(state.clone()))
            .configure(page_routes::init_routes)
            .configure(api_routes::init_routes)
            .service(Files::new("/static", "./static"))
    })
        .bind((settings.host.as_str(), settings.port))?
        .run()
        .await?;

    Ok(())
}
