pub mod api_handler;
pub mod page_handler;
pub mod session_handler;
