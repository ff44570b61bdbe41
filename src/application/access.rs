use crate::domain::customer::{Role, UserView};
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;

/// Looks up the user behind the session email, if any.
pub fn resolve_user<U: UserRepository>(
    users: &U,
    identity: Option<&str>,
) -> Result<Option<UserView>, DomainError> {
    match identity {
        Some(email) => users.find_by_email(email),
        None => Ok(None),
    }
}

pub fn require_user<U: UserRepository>(
    users: &U,
    identity: Option<&str>,
) -> Result<UserView, DomainError> {
    resolve_user(users, identity)?.ok_or(DomainError::Unauthorized)
}

pub fn require_admin<U: UserRepository>(
    users: &U,
    identity: Option<&str>,
) -> Result<UserView, DomainError> {
    let user = require_user(users, identity)?;
    if user.role != Role::Admin {
        log::warn!("User {} attempted an admin operation", user.id);
        return Err(DomainError::Unauthorized);
    }
    Ok(user)
}
