use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

/// Header the upstream auth layer sets to the signed-in user's email.
pub const SESSION_EMAIL_HEADER: &str = "x-authenticated-email";

/// Optional session identity for the current request.
///
/// Credential checks happen upstream; this only carries the resolved email
/// through to the services, which decide whether it is sufficient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session(Option<String>);

impl Session {
    pub fn email(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let email = req
            .headers()
            .get(SESSION_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_owned);
        ready(Ok(Session(email)))
    }
}
