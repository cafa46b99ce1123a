//! Account repository.
//!
//! All OTP mutations are single UPDATE statements so the clear-and-commit
//! of a one-time code is atomic at the row level. Concurrent OTP issuance
//! for the same account is last-writer-wins by design.
//!
//! Uses `sqlx::query` with explicit binds (not the `query!` macro) so the
//! crate builds without offline query metadata.

use crate::{DbError, Result as DbErrorResult};

use tf_core::Account;

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account. A unique-constraint violation on the email
    /// column is reported as `DbError::DuplicateEmail`.
    pub async fn create(&self, account: &Account) -> DbErrorResult<()> {
        let id = account.id.to_string();
        let is_verified = account.is_verified as i64;
        let login_otp_expires_at = account.login_otp_expires_at.map(|dt| dt.timestamp());
        let reset_otp_expires_at = account.reset_otp_expires_at.map(|dt| dt.timestamp());
        let created_at = account.created_at.timestamp();
        let updated_at = account.updated_at.timestamp();

        sqlx::query(
            r#"
                INSERT INTO accounts (
                    id, name, email, password_hash, is_verified,
                    login_otp, login_otp_expires_at,
                    reset_otp, reset_otp_expires_at,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(is_verified)
        .bind(&account.login_otp)
        .bind(login_otp_expires_at)
        .bind(&account.reset_otp)
        .bind(reset_otp_expires_at)
        .bind(created_at)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DbError::DuplicateEmail {
                email: account.email.clone(),
                location: ErrorLocation::from(Location::caller()),
            },
            _ => DbError::from(e),
        })?;

        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<Account>> {
        let row = sqlx::query(
            r#"
                SELECT id, name, email, password_hash, is_verified,
                    login_otp, login_otp_expires_at,
                    reset_otp, reset_otp_expires_at,
                    created_at, updated_at
                FROM accounts
                WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_account(&r)).transpose()
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Account>> {
        let id_str = id.to_string();

        let row = sqlx::query(
            r#"
                SELECT id, name, email, password_hash, is_verified,
                    login_otp, login_otp_expires_at,
                    reset_otp, reset_otp_expires_at,
                    created_at, updated_at
                FROM accounts
                WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_account(&r)).transpose()
    }

    /// Store a fresh login OTP, overwriting any outstanding one.
    pub async fn set_login_otp(
        &self,
        id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> DbErrorResult<()> {
        let id_str = id.to_string();
        let expires_at = expires_at.timestamp();
        let now = Utc::now().timestamp();

        sqlx::query(
            r#"
                UPDATE accounts
                SET login_otp = ?, login_otp_expires_at = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(code)
        .bind(expires_at)
        .bind(now)
        .bind(id_str)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Clear the login OTP and mark the account verified in one statement,
    /// making the code single-use.
    pub async fn consume_login_otp(&self, id: Uuid) -> DbErrorResult<()> {
        let id_str = id.to_string();
        let now = Utc::now().timestamp();

        sqlx::query(
            r#"
                UPDATE accounts
                SET login_otp = NULL, login_otp_expires_at = NULL,
                    is_verified = 1, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(now)
        .bind(id_str)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store a fresh reset OTP, independent of any outstanding login OTP.
    pub async fn set_reset_otp(
        &self,
        id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> DbErrorResult<()> {
        let id_str = id.to_string();
        let expires_at = expires_at.timestamp();
        let now = Utc::now().timestamp();

        sqlx::query(
            r#"
                UPDATE accounts
                SET reset_otp = ?, reset_otp_expires_at = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(code)
        .bind(expires_at)
        .bind(now)
        .bind(id_str)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replace the password hash and clear the reset OTP in one statement.
    pub async fn reset_password(&self, id: Uuid, password_hash: &str) -> DbErrorResult<()> {
        let id_str = id.to_string();
        let now = Utc::now().timestamp();

        sqlx::query(
            r#"
                UPDATE accounts
                SET password_hash = ?, reset_otp = NULL, reset_otp_expires_at = NULL,
                    updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(password_hash)
        .bind(now)
        .bind(id_str)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn row_to_account(row: &SqliteRow) -> DbErrorResult<Account> {
    let id: String = row.try_get("id")?;
    let is_verified: i64 = row.try_get("is_verified")?;
    let login_otp_expires_at: Option<i64> = row.try_get("login_otp_expires_at")?;
    let reset_otp_expires_at: Option<i64> = row.try_get("reset_otp_expires_at")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(Account {
        id: Uuid::parse_str(&id).map_err(|e| DbError::Initialization {
            message: format!("Invalid UUID in account.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        is_verified: is_verified != 0,
        login_otp: row.try_get("login_otp")?,
        login_otp_expires_at: login_otp_expires_at.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        reset_otp: row.try_get("reset_otp")?,
        reset_otp_expires_at: reset_otp_expires_at.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in account.created_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        updated_at: DateTime::from_timestamp(updated_at, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in account.updated_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
    })
}
