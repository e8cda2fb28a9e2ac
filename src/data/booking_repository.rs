use crate::domain::booking::Booking;
use crate::domain::repository::BookingRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct InMemoryBookingRepository {
    storage: Arc<RwLock<HashMap<String, Booking>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    #[instrument(skip(self), fields(booking_id = %booking.id, user_id = %booking.user_id))]
    async fn save_booking(&self, booking: Booking) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(booking.id.clone(), booking.clone());
        debug!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            "Booking saved to memory storage"
        );
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = user_id))]
    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<Booking>> {
        let storage = self.storage.read().await;
        let bookings: Vec<Booking> = storage
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        debug!(
            user_id = user_id,
            count = bookings.len(),
            "Bookings fetched for owner"
        );
        Ok(bookings)
    }
}
