pub mod api_routes;
pub mod app_state;
pub mod page_routes;
