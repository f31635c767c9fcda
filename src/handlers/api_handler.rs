use actix_session::Session;
use actix_web::{web, HttpResponse};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::json;

use crate::handlers::session_handler::session_id;
use crate::routes::app_state::AppState;
use crate::services::workflow_service;

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub email: String,
}

async fn run_for_session(data: &AppState, session_id: &str, email: &str) -> HttpResponse {
    let pipelines = match data.loader.get().await {
        Ok(pipelines) => pipelines,
        Err(e) => {
            error!("Pipelines unavailable: {}", e);
            return HttpResponse::ServiceUnavailable().json(json!({"error": e.to_string()}));
        }
    };

    info!("Running pipelines for session {}", session_id);
    match workflow_service::run_workflow(email, &pipelines).await {
        Ok(result) => HttpResponse::Ok().json(json!({"state": "processed", "result": result})),
        Err(e) => {
            error!("Workflow failed for session {} at {}: {}", session_id, e.stage(), e);
            HttpResponse::BadGateway().json(json!({"error": e.to_string(), "stage": e.stage()}))
        }
    }
}

pub async fn process(
    data: web::Data<AppState>,
    session: Session,
    req_body: web::Json<ProcessRequest>,
) -> HttpResponse {
    let session_id = session_id(&session);
    let mut state = data.session_manager.get(&session_id);

    if let Err(e) = state.submit(&req_body.email) {
        warn!("Session {} submitted an empty email", session_id);
        return HttpResponse::BadRequest().json(json!({"error": e.to_string()}));
    }
    data.session_manager.insert(session_id.clone(), state);

    run_for_session(&data, &session_id, &req_body.email).await
}

pub async fn result(data: web::Data<AppState>, session: Session) -> HttpResponse {
    let session_id = session_id(&session);
    let state = data.session_manager.get(&session_id);

    match state.raw_email() {
        Some(email) => run_for_session(&data, &session_id, email).await,
        None => HttpResponse::Ok().json(json!({"state": "idle"})),
    }
}

pub async fn clear(data: web::Data<AppState>, session: Session) -> HttpResponse {
    let session_id = session_id(&session);
    data.session_manager.remove(&session_id);
    info!("Cleared session {}", session_id);
    HttpResponse::Ok().json(json!({"state": "idle"}))
}

pub async fn status(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "loaded": data.loader.is_loaded(),
        "pipelines": data.pipeline_info,
    }))
}
