//! Driving port for the identity provider.
//!
//! Inbound adapters call [`LoginService`] to turn credentials into an identity
//! key; they never see how the provider stores accounts.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{Error, LoginCredentials, UserId};

/// Sign-in use-case.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Single-account provider configured at start-up.
///
/// Accepts exactly one email/password pair and maps it to a fixed identity.
#[derive(Debug, Clone)]
pub struct FixtureLoginService {
    email: String,
    password: Zeroizing<String>,
    user_id: UserId,
}

impl FixtureLoginService {
    /// Default account email.
    pub const DEFAULT_EMAIL: &'static str = "admin@avmoto.test";
    /// Default account password.
    pub const DEFAULT_PASSWORD: &'static str = "password";
    /// Identity returned for the default account.
    pub const DEFAULT_USER_ID: &'static str = "123e4567-e89b-12d3-a456-426614174000";

    /// Accept `email`/`password` and authenticate them as `user_id`.
    pub fn new(email: impl Into<String>, password: impl Into<String>, user_id: UserId) -> Self {
        Self {
            email: email.into().trim().to_lowercase(),
            password: Zeroizing::new(password.into()),
            user_id,
        }
    }

    /// Identity this provider authenticates.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl Default for FixtureLoginService {
    fn default() -> Self {
        let user_id = UserId::new(Self::DEFAULT_USER_ID).unwrap_or_else(|_| UserId::random());
        Self::new(Self::DEFAULT_EMAIL, Self::DEFAULT_PASSWORD, user_id)
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.email() == self.email && credentials.password() == self.password.as_str() {
            Ok(self.user_id)
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("admin@avmoto.test", "password", true)]
    #[case("ADMIN@avmoto.test", "password", true)]
    #[case("admin@avmoto.test", "wrong", false)]
    #[case("other@avmoto.test", "password", false)]
    #[tokio::test]
    async fn default_account_authenticates(
        #[case] email: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let service = FixtureLoginService::default();
        let creds = LoginCredentials::try_from_parts(email, password).expect("credentials shape");
        match (should_succeed, service.authenticate(&creds).await) {
            (true, Ok(id)) => assert_eq!(id.to_string(), FixtureLoginService::DEFAULT_USER_ID),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(id)) => panic!("expected failure, got success: {id}"),
        }
    }

    #[tokio::test]
    async fn configured_account_replaces_default() {
        let user_id = UserId::random();
        let service = FixtureLoginService::new("desk@shop.test", "s3cret", user_id);
        let creds = LoginCredentials::try_from_parts("desk@shop.test", "s3cret").expect("shape");
        assert_eq!(service.authenticate(&creds).await.ok(), Some(user_id));
    }
}
