use actix_session::Session;
use actix_web::{http::header, http::StatusCode, web, HttpResponse};
use log::{error, info, warn};
use serde::Deserialize;

use crate::handlers::session_handler::session_id;
use crate::models::session_state::SessionState;
use crate::routes::app_state::AppState;
use crate::services::workflow_service;
use crate::views::page::{self, Outcome, PageView};

#[derive(Debug, Deserialize)]
pub struct ProcessForm {
    #[serde(default)]
    pub email: String,
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn redirect_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header((header::LOCATION, "/"))
        .finish()
}

/// Renders the page for `state`. A processed session re-runs all three pipelines.
async fn render_state(
    data: &AppState,
    session_id: &str,
    state: &SessionState,
    email: &str,
    notice: Option<&str>,
    status: StatusCode,
) -> HttpResponse {
    let pipelines = match data.loader.get().await {
        Ok(pipelines) => pipelines,
        Err(e) => {
            error!("Pipelines unavailable for session {}: {}", session_id, e);
            return html(StatusCode::INTERNAL_SERVER_ERROR, page::render_fatal(&e.to_string()));
        }
    };

    let result = match state.raw_email() {
        Some(raw_email) => {
            info!("Running pipelines for session {}", session_id);
            Some(workflow_service::run_workflow(raw_email, &pipelines).await)
        }
        None => None,
    };

    let outcome = match &result {
        None => Outcome::Idle,
        Some(Ok(result)) => Outcome::Ready(result),
        Some(Err(e)) => {
            error!("Workflow failed for session {} at {}: {}", session_id, e.stage(), e);
            Outcome::Failed(e.to_string())
        }
    };

    let body = page::render(&PageView {
        pipelines: &data.pipeline_info,
        email,
        notice,
        outcome,
    });
    html(status, body)
}

pub async fn render_page(data: web::Data<AppState>, session: Session) -> HttpResponse {
    let session_id = session_id(&session);
    let state = data.session_manager.get(&session_id);
    let email = state.raw_email().unwrap_or_default();
    render_state(&data, &session_id, &state, email, None, StatusCode::OK).await
}

pub async fn process_email(
    data: web::Data<AppState>,
    session: Session,
    form: web::Form<ProcessForm>,
) -> HttpResponse {
    let session_id = session_id(&session);
    let mut state = data.session_manager.get(&session_id);

    // A blank submit leaves the stored state untouched, results included.
    match state.submit(&form.email) {
        Ok(()) => {
            info!("Session {} submitted an email ({} chars)", session_id, form.email.chars().count());
            data.session_manager.insert(session_id, state);
            redirect_home()
        }
        Err(e) => {
            warn!("Session {} submitted an empty email", session_id);
            let notice = e.to_string();
            render_state(&data, &session_id, &state, &form.email, Some(&notice), StatusCode::BAD_REQUEST).await
        }
    }
}

pub async fn clear(data: web::Data<AppState>, session: Session) -> HttpResponse {
    let session_id = session_id(&session);
    data.session_manager.remove(&session_id);
    info!("Cleared session {}", session_id);
    redirect_home()
}
