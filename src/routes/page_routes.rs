use actix_web::{get, post, web, Responder};
use actix_session::Session;
use crate::handlers::page_handler::{self, ProcessForm};
use crate::config::MAX_EMAIL_BYTES;
use crate::routes::app_state::AppState;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().limit(MAX_EMAIL_BYTES))
        .service(index)
        .service(process)
        .service(clear);
}

#[get("/")]
async fn index(data: web::Data<AppState>, session: Session) -> impl Responder {
    page_handler::render_page(data, session).await
}

#[post("/process")]
async fn process(data: web::Data<AppState>, session: Session, form: web::Form<ProcessForm>) -> impl Responder {
    page_handler::process_email(data, session, form).await
}

#[post("/clear")]
async fn clear(data: web::Data<AppState>, session: Session) -> impl Responder {
    page_handler::clear(data, session).await
}
