//! Typed identifiers for every entity in the marketplace.
//!
//! Embedded items (portfolio, pricing, availability, time slots) carry
//! stable generated ids so callers address them by id rather than by
//! positional index, which would drift under concurrent edits.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random id.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`crate::model::User`].
    UserId
);
define_id!(
    /// Identifier of a [`crate::model::Photographer`] profile.
    PhotographerId
);
define_id!(
    /// Identifier of a [`crate::model::Booking`].
    BookingId
);
define_id!(
    /// Identifier of a [`crate::model::Review`].
    ReviewId
);
define_id!(
    /// Identifier of a [`crate::model::Testimonial`].
    TestimonialId
);
define_id!(
    /// Identifier of a [`crate::model::PhotoEditRequest`].
    EditRequestId
);
define_id!(
    /// Identifier of an embedded portfolio item.
    PortfolioItemId
);
define_id!(
    /// Identifier of an embedded pricing entry.
    PricingEntryId
);
define_id!(
    /// Identifier of an embedded availability entry (one calendar date).
    AvailabilityEntryId
);
define_id!(
    /// Identifier of a time slot within an availability entry.
    TimeSlotId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct() {
        assert_ne!(UserId::new(), UserId::new());
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = BookingId::new();
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, format!("\"{id}\""));
    }
}
