use crate::domain::booking::{Booking, CreateBooking};
use crate::domain::error::DomainError;
use crate::domain::repository::BookingRepository;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub struct BookingService<R: BookingRepository> {
    booking_repository: Arc<R>,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(booking_repository: Arc<R>) -> Self {
        Self { booking_repository }
    }

    /// Persists a booking for the authenticated identity. The owner comes
    /// from the guard, never from the request body.
    #[instrument(skip(self, req), fields(user_id = owner_user_id))]
    pub async fn create_booking(&self, owner_user_id: &str, req: CreateBooking) -> Result<Booking> {
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            user_id: owner_user_id.to_string(),
            vehicle_id: req.vehicle_id,
            from_date: req.from_date,
            from_time: req.from_time,
            to_date: req.to_date,
            to_time: req.to_time,
            total_price: req.total_price,
            payment_id: req.payment_id,
            status: req.status,
            booking_date: Utc::now(),
        };

        self.booking_repository.save_booking(booking.clone()).await?;

        info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            "Booking created"
        );
        Ok(booking)
    }

    /// Returns all bookings owned by `target_user_id`, but only when the
    /// caller is that owner.
    #[instrument(skip(self), fields(user_id = auth_user_id, target_user_id = target_user_id))]
    pub async fn list_bookings(
        &self,
        auth_user_id: &str,
        target_user_id: &str,
    ) -> Result<Vec<Booking>> {
        if auth_user_id != target_user_id {
            warn!(
                user_id = auth_user_id,
                target_user_id = target_user_id,
                "Cross-owner booking list rejected"
            );
            return Err(DomainError::Forbidden.into());
        }

        self.booking_repository.find_by_owner(target_user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::booking_repository::InMemoryBookingRepository;

    fn service() -> BookingService<InMemoryBookingRepository> {
        BookingService::new(Arc::new(InMemoryBookingRepository::new()))
    }

    #[tokio::test]
    async fn test_create_booking_stamps_owner_and_id() {
        let service = service();
        let booking = service
            .create_booking(
                "u1",
                CreateBooking {
                    vehicle_id: Some("v1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(booking.user_id, "u1");
        assert!(!booking.id.is_empty());
        assert_eq!(booking.vehicle_id.as_deref(), Some("v1"));
    }

    #[tokio::test]
    async fn test_list_own_bookings_returns_created_records() {
        let service = service();
        service
            .create_booking("u1", CreateBooking::default())
            .await
            .unwrap();
        service
            .create_booking("u1", CreateBooking::default())
            .await
            .unwrap();
        service
            .create_booking("u2", CreateBooking::default())
            .await
            .unwrap();

        let bookings = service.list_bookings("u1", "u1").await.unwrap();
        assert_eq!(bookings.len(), 2);
        assert!(bookings.iter().all(|b| b.user_id == "u1"));
    }

    #[tokio::test]
    async fn test_list_other_owners_bookings_is_forbidden() {
        let service = service();
        service
            .create_booking("u2", CreateBooking::default())
            .await
            .unwrap();

        let err = service.list_bookings("u1", "u2").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Forbidden)
        ));
    }
}
