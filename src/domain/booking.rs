use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    /// Owner of the booking. Always the authenticated identity, never
    /// taken from client input.
    pub user_id: String,
    pub vehicle_id: Option<String>,
    pub from_date: Option<String>,
    pub from_time: Option<String>,
    pub to_date: Option<String>,
    pub to_time: Option<String>,
    pub total_price: Option<String>,
    pub payment_id: Option<String>,
    pub status: Option<String>,
    pub booking_date: DateTime<Utc>,
}

/// Client-supplied booking fields. A `userId` field in the request body is
/// not part of this shape and is dropped during deserialization.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub vehicle_id: Option<String>,
    pub from_date: Option<String>,
    pub from_time: Option<String>,
    pub to_date: Option<String>,
    pub to_time: Option<String>,
    pub total_price: Option<String>,
    pub payment_id: Option<String>,
    pub status: Option<String>,
}
