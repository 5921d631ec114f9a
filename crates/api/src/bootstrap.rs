//! Startup creation of the first admin account.

use voyago_core::password::{validate_password_strength, HashedPassword, MIN_PASSWORD_LENGTH};
use voyago_db::models::admin::CreateAdmin;
use voyago_db::Repositories;

use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured admin unless that username already exists.
///
/// Returns `true` when an account was created.
pub async fn ensure_bootstrap_admin(
    repos: &Repositories,
    admin: &BootstrapAdmin,
) -> AppResult<bool> {
    if repos.admins.find_by_username(&admin.username).await?.is_some() {
        tracing::debug!(username = %admin.username, "Bootstrap admin already exists");
        return Ok(false);
    }

    validate_password_strength(&admin.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;
    let password = HashedPassword::from_plaintext(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let created = repos
        .admins
        .create(&CreateAdmin {
            username: admin.username.clone(),
            password,
        })
        .await?;
    tracing::info!(admin_id = created.id, username = %created.username, "Bootstrap admin created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn creds(password: &str) -> BootstrapAdmin {
        BootstrapAdmin {
            username: "root".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn creates_once() {
        let repos = Repositories::in_memory();
        assert!(ensure_bootstrap_admin(&repos, &creds("correct-horse")).await.unwrap());
        assert!(!ensure_bootstrap_admin(&repos, &creds("correct-horse")).await.unwrap());

        let admin = repos.admins.find_by_username("root").await.unwrap().unwrap();
        assert!(admin.password().verify("correct-horse").unwrap());
    }

    #[tokio::test]
    async fn short_password_is_refused() {
        let repos = Repositories::in_memory();
        assert_matches!(
            ensure_bootstrap_admin(&repos, &creds("short")).await,
            Err(AppError::BadRequest(_))
        );
    }
}
