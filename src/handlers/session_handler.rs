use actix_session::Session;
use log::{error, info, warn};
use uuid::Uuid;

const SESSION_KEY: &str = "session_id";

/// Returns the session id stored in the cookie, minting a new one on first contact.
pub fn session_id(session: &Session) -> String {
    match session.get::<String>(SESSION_KEY) {
        Ok(Some(id)) => return id,
        Ok(None) => {}
        Err(e) => warn!("Unreadable session cookie, starting a new session: {:?}", e),
    }

    let session_id = Uuid::new_v4().to_string();
    if let Err(e) = session.insert(SESSION_KEY, session_id.clone()) {
        error!("Failed to insert session_id into cookie: {:?}", e);
    } else {
        info!("Stored session_id {} in cookie", session_id);
    }
    session_id
}
