use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display format for calendar dates in notifications (`15.08.2025`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Display format for timestamps in notifications (`15.08.2025 14:30`).
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Shipment routing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    /// Deliveries within Astana
    Astana,
    /// Deliveries to the regions
    Regions,
}

impl DeliveryType {
    pub const ALL: [DeliveryType; 2] = [DeliveryType::Astana, DeliveryType::Regions];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Astana => "astana",
            DeliveryType::Regions => "regions",
        }
    }

    /// Parse a delivery-type tag. Returns `None` for anything unrecognized.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl std::fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing status of a shipping request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::Processing,
        RequestStatus::Shipped,
        RequestStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Processing => "processing",
            RequestStatus::Shipped => "shipped",
            RequestStatus::Delivered => "delivered",
        }
    }

    /// Human-readable name shown to employees.
    pub fn display_name(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Processing => "Processing",
            RequestStatus::Shipped => "Shipped",
            RequestStatus::Delivered => "Delivered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered employee.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A persisted shipping request.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShippingRequest {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub delivery_type: DeliveryType,
    pub cargo_description: String,
    pub cargo_weight: Option<f64>,
    pub cargo_volume: Option<f64>,
    pub special_instructions: Option<String>,
    pub preferred_delivery_date: Option<NaiveDate>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub employee_id: Option<Uuid>,
}

impl ShippingRequest {
    /// Snapshot this request for a notification.
    pub fn to_record(&self) -> RequestRecord {
        RequestRecord {
            request_id: RequestId::Number(self.id),
            customer_name: Some(self.customer_name.clone()),
            customer_phone: Some(self.customer_phone.clone()),
            customer_address: Some(self.customer_address.clone()),
            cargo_description: Some(self.cargo_description.clone()),
            cargo_weight: self.cargo_weight,
            cargo_volume: self.cargo_volume,
            preferred_delivery_date: self
                .preferred_delivery_date
                .map(|d| d.format(DATE_FORMAT).to_string()),
            special_instructions: self.special_instructions.clone(),
            created_at: Some(self.created_at.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

/// Identifier shown in a notification: a database id or a label like `TEST`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    Label(String),
}

impl Default for RequestId {
    fn default() -> Self {
        RequestId::Label(String::new())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::Label(s) => f.write_str(s),
        }
    }
}

/// Read-only view of a shipping request, as handed to the notifier.
///
/// Every attribute is optional so that partially filled records (test
/// notifications, legacy rows) can still be rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub request_id: RequestId,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub cargo_description: Option<String>,
    pub cargo_weight: Option<f64>,
    pub cargo_volume: Option<f64>,
    /// Already formatted as `dd.mm.yyyy`
    pub preferred_delivery_date: Option<String>,
    pub special_instructions: Option<String>,
    /// Already formatted as `dd.mm.yyyy HH:MM`
    pub created_at: Option<String>,
}

impl RequestRecord {
    /// Fixed record used by the "send test notification" admin action.
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self {
            request_id: RequestId::Label("TEST".to_string()),
            customer_name: Some("Test Customer".to_string()),
            customer_phone: Some("+7 (777) 123-45-67".to_string()),
            customer_address: Some("Astana, 123 Test Street".to_string()),
            cargo_description: Some("Test cargo for notification check".to_string()),
            cargo_weight: Some(10.5),
            cargo_volume: Some(0.5),
            preferred_delivery_date: Some("15.08.2025".to_string()),
            special_instructions: Some("Test notification".to_string()),
            created_at: Some(now.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}
