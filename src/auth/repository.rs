// Database repository for accounts

use rand::Rng;
use sqlx::PgPool;

use crate::auth::error::AuthError;
use crate::auth::models::Account;

const ACCOUNT_COLUMNS: &str = "id, email, staff_id, password_hash, role, employee_id, created_at";

/// Staff-id allocation gives up after this many collisions; the space is
/// 10 000 ids, so hitting the cap means the tenant has outgrown the format
const MAX_STAFF_ID_ATTEMPTS: u32 = 32;

/// Account repository for database operations
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new AccountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by login key: email (case-insensitive) or staff id
    pub async fn find_by_login_key(&self, login_key: &str) -> Result<Option<Account>, AuthError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM accounts WHERE LOWER(email) = LOWER($1) OR staff_id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(login_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(account)
    }

    /// Find an account by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Account>, AuthError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM accounts WHERE id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(account)
    }

    /// Check if an email is already registered (case-insensitive)
    pub async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM accounts WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(exists.0)
    }

    /// Total number of accounts; used by first-run bootstrap
    pub async fn count_accounts(&self) -> Result<i64, AuthError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(count.0)
    }

    /// Create an admin account (no linked employee record)
    pub async fn create_admin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, AuthError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO accounts (email, password_hash, role) VALUES ($1, $2, 'admin') RETURNING {}",
            ACCOUNT_COLUMNS
        ))
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::map_insert_error)?;

        Ok(account)
    }

    /// Create an employee account together with its employee record
    ///
    /// Runs as one transaction: the employee row, the generated staff id,
    /// and the account row either all commit or none do. The staff id is
    /// regenerated until a collision-free value is found; the unique index
    /// remains the backstop for concurrent races.
    pub async fn create_employee_account(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<Account, AuthError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let employee_id: (i32,) =
            sqlx::query_as("INSERT INTO employees (name) VALUES ($1) RETURNING id")
                .bind(name)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let staff_id = Self::allocate_staff_id(&mut tx).await?;

        let account = sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO accounts (email, staff_id, password_hash, role, employee_id) \
             VALUES ($1, $2, $3, 'employee', $4) RETURNING {}",
            ACCOUNT_COLUMNS
        ))
        .bind(email)
        .bind(&staff_id)
        .bind(password_hash)
        .bind(employee_id.0)
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::map_insert_error)?;

        tx.commit()
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(account)
    }

    /// Generate staff-id candidates until one is free
    async fn allocate_staff_id(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<String, AuthError> {
        for _ in 0..MAX_STAFF_ID_ATTEMPTS {
            let candidate = Self::generate_staff_id();

            let taken: (bool,) =
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM accounts WHERE staff_id = $1)")
                    .bind(&candidate)
                    .fetch_one(&mut **tx)
                    .await
                    .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

            if !taken.0 {
                return Ok(candidate);
            }

            tracing::debug!("Staff id collision on {}, regenerating", candidate);
        }

        Err(AuthError::DatabaseError(
            "Could not allocate a unique staff id".to_string(),
        ))
    }

    /// Random staff id of the form EMP-NNNN
    fn generate_staff_id() -> String {
        let n: u32 = rand::thread_rng().gen_range(0..10_000);
        format!("EMP-{:04}", n)
    }

    /// Map an insert failure, turning unique violations into Conflict
    fn map_insert_error(e: sqlx::Error) -> AuthError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AuthError::AccountAlreadyExists;
            }
        }
        AuthError::DatabaseError(e.to_string())
    }
}
