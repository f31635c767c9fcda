use actix_web::{get, post, web, Responder};
use actix_session::Session;
use crate::handlers::api_handler::{self, ProcessRequest};
use crate::config::MAX_EMAIL_BYTES;
use crate::routes::app_state::AppState;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().limit(MAX_EMAIL_BYTES))
            .service(process)
            .service(result)
            .service(clear)
            .service(status),
    );
}

#[post("/process")]
async fn process(
    data: web::Data<AppState>,
    session: Session,
    req_body: web::Json<ProcessRequest>,
) -> impl Responder {
    api_handler::process(data, session, req_body).await
}

#[get("/result")]
async fn result(data: web::Data<AppState>, session: Session) -> impl Responder {
    api_handler::result(data, session).await
}

#[post("/clear")]
async fn clear(data: web::Data<AppState>, session: Session) -> impl Responder {
    api_handler::clear(data, session).await
}

#[get("/status")]
async fn status(data: web::Data<AppState>) -> impl Responder {
    api_handler::status(data).await
}
