pub mod classification;
pub mod session_manager;
pub mod session_state;
pub mod workflow_result;
