//! Domain error types.
//!
//! These errors represent structural problems with itineraries assembled
//! from schedule legs. They are distinct from feed I/O errors.

use super::City;

/// Domain-level errors for itinerary construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// Consecutive legs don't meet at the same city
    #[error("legs do not connect: arrives at {0} but next departs from {1}")]
    LegsNotConnected(City, City),

    /// A city appears twice along the itinerary
    #[error("itinerary visits {0} more than once")]
    RepeatedCity(City),
}
