//! Account handlers: signup and login.
//!
//! Signup reports validation failures per-field. Login deliberately
//! collapses "unknown email" and "wrong password" into one
//! `InvalidCredentials` error so accounts cannot be enumerated.

use std::sync::Arc;

use crate::domain::credentials::{validate_signup, SignupForm};
use crate::domain::foundation::{AuthError, DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

/// Public view of an account, safe to return to the client.
#[derive(Debug, Clone)]
pub struct AccountView {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for AccountView {
    fn from(user: &User) -> Self {
        Self {
            user_id: *user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Result of a successful signup or login.
#[derive(Debug, Clone)]
pub struct SignupResult {
    pub account: AccountView,
    pub token: String,
}

/// Command to create an account.
#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Handler creating an account and issuing a session token.
pub struct SignupHandler {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl SignupHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: SignupCommand) -> Result<SignupResult, DomainError> {
        let form = SignupForm {
            name: cmd.name.trim().to_string(),
            email: cmd.email.trim().to_lowercase(),
            password: cmd.password,
        };
        validate_signup(&form).map_err(DomainError::validation)?;

        if self.users.find_by_email(&form.email).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                "An account with this email already exists",
            )
            .with_detail("field", "email"));
        }

        let hash = self.passwords.hash(&form.password)?;
        let user = User::new(UserId::new(), form.name, form.email, hash);
        // The unique index on email closes the check-then-insert race; the
        // repository maps that violation to EmailTaken as well.
        self.users.save(&user).await?;

        let token = self.tokens.issue(&user).await.map_err(auth_to_domain)?;
        Ok(SignupResult {
            account: AccountView::from(&user),
            token,
        })
    }
}

/// Command to log into an existing account.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Handler verifying credentials and issuing a session token.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<SignupResult, DomainError> {
        let email = cmd.email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let matches = self.passwords.verify(&cmd.password, user.password_hash())?;
        if !matches {
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(&user).await.map_err(auth_to_domain)?;
        Ok(SignupResult {
            account: AccountView::from(&user),
            token,
        })
    }
}

fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::InvalidCredentials, "Invalid email or password")
}

fn auth_to_domain(err: AuthError) -> DomainError {
    DomainError::new(ErrorCode::InternalError, format!("Token issue failed: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockUserRepository {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn save(&self, user: &User) -> Result<(), DomainError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email() == user.email()) {
                return Err(DomainError::new(ErrorCode::EmailTaken, "email taken"));
            }
            users.push(user.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id() == id)
                .cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email() == email)
                .cloned())
        }
    }

    /// Reversible fake; real hashing lives in the argon2 adapter.
    struct FakeHasher;

    impl PasswordHasher for FakeHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("hashed:{}", password))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
            Ok(hash == format!("hashed:{}", password))
        }
    }

    struct FakeIssuer;

    #[async_trait]
    impl TokenIssuer for FakeIssuer {
        async fn issue(&self, user: &User) -> Result<String, AuthError> {
            Ok(format!("token-for-{}", user.id()))
        }
    }

    fn signup_handler(users: Arc<MockUserRepository>) -> SignupHandler {
        SignupHandler::new(users, Arc::new(FakeHasher), Arc::new(FakeIssuer))
    }

    fn login_handler(users: Arc<MockUserRepository>) -> LoginHandler {
        LoginHandler::new(users, Arc::new(FakeHasher), Arc::new(FakeIssuer))
    }

    fn valid_signup() -> SignupCommand {
        SignupCommand {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Abcdefg1".to_string(),
        }
    }

    #[tokio::test]
    async fn signup_creates_account_and_issues_token() {
        let users = Arc::new(MockUserRepository::default());
        let handler = signup_handler(users.clone());

        let result = handler.handle(valid_signup()).await.unwrap();

        assert_eq!(result.account.email, "alice@example.com");
        assert!(result.token.starts_with("token-for-"));
        assert_eq!(users.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn signup_normalizes_email_case() {
        let users = Arc::new(MockUserRepository::default());
        let handler = signup_handler(users);

        let mut cmd = valid_signup();
        cmd.email = "Alice@Example.COM".to_string();
        let result = handler.handle(cmd).await.unwrap();

        assert_eq!(result.account.email, "alice@example.com");
    }

    #[tokio::test]
    async fn signup_rejects_weak_password_with_field_error() {
        let users = Arc::new(MockUserRepository::default());
        let handler = signup_handler(users.clone());

        let mut cmd = valid_signup();
        cmd.password = "abcdefgh".to_string();
        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.details.contains_key("password"));
        assert!(users.users.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email() {
        let users = Arc::new(MockUserRepository::default());
        let handler = signup_handler(users);

        handler.handle(valid_signup()).await.unwrap();
        let err = handler.handle(valid_signup()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EmailTaken);
    }

    #[tokio::test]
    async fn login_succeeds_with_correct_credentials() {
        let users = Arc::new(MockUserRepository::default());
        signup_handler(users.clone())
            .handle(valid_signup())
            .await
            .unwrap();

        let result = login_handler(users)
            .handle(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "Abcdefg1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.account.name, "Alice");
    }

    #[tokio::test]
    async fn login_wrong_password_and_unknown_email_are_indistinguishable() {
        let users = Arc::new(MockUserRepository::default());
        signup_handler(users.clone())
            .handle(valid_signup())
            .await
            .unwrap();
        let handler = login_handler(users);

        let wrong_password = handler
            .handle(LoginCommand {
                email: "alice@example.com".to_string(),
                password: "Wrong1234".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_email = handler
            .handle(LoginCommand {
                email: "nobody@example.com".to_string(),
                password: "Abcdefg1".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.code, ErrorCode::InvalidCredentials);
        assert_eq!(unknown_email.code, ErrorCode::InvalidCredentials);
        assert_eq!(wrong_password.message, unknown_email.message);
    }
}
