use crate::store::Slot;
use crate::types::{AuthError, Session};

pub const ADMIN_EMAIL: &str = "admin@seguridad.com";
pub const ADMIN_PASSWORD: &str = "Admin123!";
pub const ADMIN_ID: &str = "admin_1";

pub fn login(
    session: &mut Slot<Option<Session>>,
    email: &str,
    password: &str,
) -> Result<Session, AuthError> {
    if email != ADMIN_EMAIL || password != ADMIN_PASSWORD {
        tracing::info!("rejected admin login");
        return Err(AuthError::InvalidCredentials);
    }

    let user = Session {
        email: email.to_string(),
        id: ADMIN_ID.to_string(),
        is_admin: true,
    };
    session.set(Some(user.clone()));
    tracing::info!(id = ADMIN_ID, "admin logged in");
    Ok(user)
}

pub fn logout(session: &mut Slot<Option<Session>>) {
    session.set(None);
}

/// Returns the current session if it belongs to an administrator.
pub fn require_admin(session: Option<&Session>) -> Result<&Session, AuthError> {
    match session {
        Some(s) if s.is_admin => Ok(s),
        _ => Err(AuthError::NotAdmin),
    }
}
