//! Employee service: registration, password verification and lookup.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sqlx::PgPool;
use uuid::Uuid;

use shipdesk_common::error::{AppError, FormErrors};
use shipdesk_common::types::Employee;

use crate::validation;

/// Message returned for any failed login, whether the user exists or not.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

const USERNAME_TAKEN: &str = "This username is already taken. Please choose another.";
const EMAIL_TAKEN: &str = "This email is already registered. Please choose another.";

/// Service layer for employee accounts.
pub struct EmployeeService;

/// Registration form.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct RegisterEmployeeParams {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl RegisterEmployeeParams {
    /// Field checks that need no database access.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        if validation::require(&mut errors, "username", &self.username) {
            validation::length(&mut errors, "username", self.username.trim(), 4, 20);
        }
        if validation::require(&mut errors, "email", &self.email) {
            validation::email(&mut errors, "email", &self.email);
        }
        if validation::require(&mut errors, "phone", &self.phone) {
            validation::length(&mut errors, "phone", self.phone.trim(), 10, 20);
        }
        if validation::require(&mut errors, "password", &self.password) {
            // Hashed as typed, so surrounding spaces count.
            validation::length(&mut errors, "password", &self.password, 6, usize::MAX);
        }

        errors
    }
}

impl EmployeeService {
    /// Validate the form, check username/email uniqueness and create the account.
    pub async fn register(
        pool: &PgPool,
        params: &RegisterEmployeeParams,
    ) -> Result<Employee, AppError> {
        let mut errors = params.validate();

        let username = params.username.trim();
        let email = params.email.trim().to_lowercase();

        if !errors.has("username") && Self::username_taken(pool, username).await? {
            errors.add("username", USERNAME_TAKEN);
        }
        if !errors.has("email") && Self::email_taken(pool, &email).await? {
            errors.add("email", EMAIL_TAKEN);
        }
        errors.into_result()?;

        let password_hash = hash_password(&params.password)?;

        let employee: Employee = sqlx::query_as(
            r#"
            INSERT INTO employees (id, username, email, phone, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(&email)
        .bind(params.phone.trim())
        .bind(&password_hash)
        .fetch_one(pool)
        .await
        .map_err(unique_violation_to_form_error)?;

        tracing::info!(
            employee_id = %employee.id,
            username = %employee.username,
            "Employee registered"
        );

        Ok(employee)
    }

    /// Look up an employee by username and check the password.
    pub async fn authenticate(
        pool: &PgPool,
        username: &str,
        password: &str,
    ) -> Result<Employee, AppError> {
        let employee: Option<Employee> =
            sqlx::query_as("SELECT * FROM employees WHERE username = $1")
                .bind(username.trim())
                .fetch_optional(pool)
                .await?;

        match employee {
            Some(employee) if verify_password(password, &employee.password_hash) => {
                tracing::info!(employee_id = %employee.id, "Employee logged in");
                Ok(employee)
            }
            _ => {
                tracing::debug!(username = %username, "Login rejected");
                Err(AppError::Auth(INVALID_CREDENTIALS.to_string()))
            }
        }
    }

    pub async fn get(pool: &PgPool, employee_id: Uuid) -> Result<Employee, AppError> {
        sqlx::query_as("SELECT * FROM employees WHERE id = $1")
            .bind(employee_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", employee_id)))
    }

    async fn username_taken(pool: &PgPool, username: &str) -> Result<bool, AppError> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE username = $1)")
                .bind(username)
                .fetch_one(pool)
                .await?;
        Ok(taken)
    }

    async fn email_taken(pool: &PgPool, email: &str) -> Result<bool, AppError> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE email = $1)")
                .bind(email)
                .fetch_one(pool)
                .await?;
        Ok(taken)
    }
}

/// A concurrent registration can pass the uniqueness checks and still lose the
/// insert; report it the same way as the pre-check would.
fn unique_violation_to_form_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err
        && db.is_unique_violation()
    {
        let mut errors = FormErrors::new();
        match db.constraint() {
            Some("employees_username_key") => errors.add("username", USERNAME_TAKEN),
            Some("employees_email_key") => errors.add("email", EMAIL_TAKEN),
            _ => return AppError::Database(err),
        }
        return AppError::InvalidForm(errors);
    }
    AppError::Database(err)
}

/// Hash a password into an Argon2id PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            false
        }
    }
}
