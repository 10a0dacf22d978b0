//! Read-side handlers: ride search and dashboard listings.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{
    BookedRideSummary, PublishedRideSummary, RideReader, RideSearchQuery, RideSearchResult,
};

/// Handler for public ride search.
pub struct SearchRidesHandler {
    reader: Arc<dyn RideReader>,
}

impl SearchRidesHandler {
    pub fn new(reader: Arc<dyn RideReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: RideSearchQuery,
    ) -> Result<Vec<RideSearchResult>, DomainError> {
        self.reader.search(&query, Timestamp::now()).await
    }
}

/// Handler for "my published rides".
pub struct ListPublishedRidesHandler {
    reader: Arc<dyn RideReader>,
}

impl ListPublishedRidesHandler {
    pub fn new(reader: Arc<dyn RideReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        driver_id: UserId,
    ) -> Result<Vec<PublishedRideSummary>, DomainError> {
        self.reader.published_by_driver(&driver_id).await
    }
}

/// Handler for "my booked rides".
pub struct ListBookedRidesHandler {
    reader: Arc<dyn RideReader>,
}

impl ListBookedRidesHandler {
    pub fn new(reader: Arc<dyn RideReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        passenger_id: UserId,
    ) -> Result<Vec<BookedRideSummary>, DomainError> {
        self.reader.booked_by_passenger(&passenger_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Reader that records what it was asked for.
    #[derive(Default)]
    struct RecordingReader {
        queries: Mutex<Vec<RideSearchQuery>>,
    }

    #[async_trait]
    impl RideReader for RecordingReader {
        async fn search(
            &self,
            query: &RideSearchQuery,
            _now: Timestamp,
        ) -> Result<Vec<RideSearchResult>, DomainError> {
            self.queries.lock().unwrap().push(query.clone());
            Ok(vec![])
        }

        async fn published_by_driver(
            &self,
            _driver_id: &UserId,
        ) -> Result<Vec<PublishedRideSummary>, DomainError> {
            Ok(vec![])
        }

        async fn booked_by_passenger(
            &self,
            _passenger_id: &UserId,
        ) -> Result<Vec<BookedRideSummary>, DomainError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn search_passes_filters_through() {
        let reader = Arc::new(RecordingReader::default());
        let handler = SearchRidesHandler::new(reader.clone());

        handler
            .handle(RideSearchQuery {
                origin: Some("Pune".to_string()),
                destination: Some("Mumbai".to_string()),
            })
            .await
            .unwrap();

        let queries = reader.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].origin.as_deref(), Some("Pune"));
    }
}
