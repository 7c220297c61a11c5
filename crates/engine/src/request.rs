//! Shipping request service: submission, lookup and status updates.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use shipdesk_common::error::{AppError, FormErrors};
use shipdesk_common::types::{DeliveryType, RequestStatus, ShippingRequest};

use crate::validation;

/// Service layer for shipping requests.
pub struct RequestService;

/// Public submission form.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct CreateRequestParams {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    /// `astana` or `regions`
    pub delivery_type: String,
    pub cargo_description: String,
    pub cargo_weight: Option<f64>,
    pub cargo_volume: Option<f64>,
    pub special_instructions: Option<String>,
    pub preferred_delivery_date: Option<NaiveDate>,
}

impl CreateRequestParams {
    /// Field checks; returns the parsed delivery type when the form is valid.
    pub fn validate(&self) -> Result<DeliveryType, FormErrors> {
        let mut errors = FormErrors::new();

        if validation::require(&mut errors, "customer_name", &self.customer_name) {
            validation::length(&mut errors, "customer_name", self.customer_name.trim(), 0, 100);
        }
        if validation::require(&mut errors, "customer_phone", &self.customer_phone) {
            validation::length(&mut errors, "customer_phone", self.customer_phone.trim(), 0, 20);
        }
        validation::require(&mut errors, "customer_address", &self.customer_address);
        validation::require(&mut errors, "cargo_description", &self.cargo_description);

        let delivery_type = DeliveryType::parse(self.delivery_type.trim());
        if delivery_type.is_none()
            && validation::require(&mut errors, "delivery_type", &self.delivery_type)
        {
            errors.add("delivery_type", "Not a valid choice.");
        }

        validation::non_negative(&mut errors, "cargo_weight", self.cargo_weight);
        validation::non_negative(&mut errors, "cargo_volume", self.cargo_volume);

        match delivery_type {
            Some(t) if errors.is_empty() => Ok(t),
            _ => Err(errors),
        }
    }
}

impl RequestService {
    /// Validate and store a new request with status `pending`.
    ///
    /// `employee_id` is set when the submitter is a logged-in employee.
    pub async fn create(
        pool: &PgPool,
        params: &CreateRequestParams,
        employee_id: Option<Uuid>,
    ) -> Result<ShippingRequest, AppError> {
        let delivery_type = params.validate().map_err(AppError::InvalidForm)?;

        let request: ShippingRequest = sqlx::query_as(
            r#"
            INSERT INTO shipping_requests (
                customer_name, customer_phone, customer_address, delivery_type,
                cargo_description, cargo_weight, cargo_volume, special_instructions,
                preferred_delivery_date, status, employee_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(params.customer_name.trim())
        .bind(params.customer_phone.trim())
        .bind(params.customer_address.trim())
        .bind(delivery_type)
        .bind(params.cargo_description.trim())
        .bind(params.cargo_weight)
        .bind(params.cargo_volume)
        .bind(validation::optional_text(params.special_instructions.as_deref()))
        .bind(params.preferred_delivery_date)
        .bind(RequestStatus::Pending)
        .bind(employee_id)
        .fetch_one(pool)
        .await?;

        tracing::info!(
            request_id = request.id,
            delivery_type = %request.delivery_type,
            employee_id = ?employee_id,
            "Shipping request created"
        );

        Ok(request)
    }

    pub async fn get(pool: &PgPool, request_id: i64) -> Result<ShippingRequest, AppError> {
        sqlx::query_as("SELECT * FROM shipping_requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", request_id)))
    }

    /// Requests owned by an employee, newest first.
    pub async fn list_by_employee(
        pool: &PgPool,
        employee_id: Uuid,
    ) -> Result<Vec<ShippingRequest>, AppError> {
        let requests: Vec<ShippingRequest> = sqlx::query_as(
            "SELECT * FROM shipping_requests WHERE employee_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(employee_id)
        .fetch_all(pool)
        .await?;

        Ok(requests)
    }

    /// Requests placed with a customer phone number, newest first.
    pub async fn track_by_phone(
        pool: &PgPool,
        customer_phone: &str,
    ) -> Result<Vec<ShippingRequest>, AppError> {
        let phone = customer_phone.trim();
        if phone.is_empty() {
            return Err(AppError::Validation("Customer phone is required".to_string()));
        }
        if phone.chars().count() > 20 {
            return Err(AppError::Validation(
                "Customer phone cannot be longer than 20 characters".to_string(),
            ));
        }

        let requests: Vec<ShippingRequest> = sqlx::query_as(
            "SELECT * FROM shipping_requests WHERE customer_phone = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(phone)
        .fetch_all(pool)
        .await?;

        if requests.is_empty() {
            tracing::debug!(phone = %phone, "No requests found for phone");
        }

        Ok(requests)
    }

    /// Change the status of a request owned by `employee_id`.
    pub async fn update_status(
        pool: &PgPool,
        request_id: i64,
        employee_id: Uuid,
        status: &str,
    ) -> Result<ShippingRequest, AppError> {
        let status = RequestStatus::parse(status).ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid status '{}'. Valid statuses: {}",
                status,
                RequestStatus::ALL.map(|s| s.as_str()).join(", ")
            ))
        })?;

        let existing = Self::get(pool, request_id).await?;
        if existing.employee_id != Some(employee_id) {
            return Err(AppError::Forbidden(
                "You can only change the status of your own requests".to_string(),
            ));
        }

        let request: ShippingRequest = sqlx::query_as(
            "UPDATE shipping_requests SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(request_id)
        .fetch_one(pool)
        .await?;

        tracing::info!(
            request_id,
            from = %existing.status,
            to = %request.status,
            "Request status updated"
        );

        Ok(request)
    }
}
