//! Photographer profiles with embedded portfolio, pricing and availability.

use crate::ids::{
    AvailabilityEntryId, PhotographerId, PortfolioItemId, PricingEntryId, TimeSlotId, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The services a photographer can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    /// Wedding coverage.
    #[serde(rename = "Wedding Photography")]
    Wedding,
    /// Studio or on-location portraits.
    #[serde(rename = "Portrait Photography")]
    Portrait,
    /// Parties, conferences and similar events.
    #[serde(rename = "Event Photography")]
    Event,
    /// Product and brand shoots.
    #[serde(rename = "Commercial Photography")]
    Commercial,
    /// Landscape and wildlife.
    #[serde(rename = "Nature Photography")]
    Nature,
    /// Editorial and runway.
    #[serde(rename = "Fashion Photography")]
    Fashion,
    /// Post-production editing.
    #[serde(rename = "Photo Editing")]
    PhotoEditing,
    /// Video recording.
    #[serde(rename = "Videography")]
    Videography,
    /// Video post-production.
    #[serde(rename = "Video Editing")]
    VideoEditing,
    /// Retouching of shoot output.
    #[serde(rename = "Photo Shoot Retouching")]
    Retouching,
    /// Studio lighting rental and setup.
    #[serde(rename = "Studio Lighting Services")]
    StudioLighting,
    /// Underwater shoots.
    #[serde(rename = "Underwater Photography")]
    Underwater,
    /// Engagement sessions.
    #[serde(rename = "Engagement Photography")]
    Engagement,
}

impl ServiceKind {
    /// Wire name of the service.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wedding => "Wedding Photography",
            Self::Portrait => "Portrait Photography",
            Self::Event => "Event Photography",
            Self::Commercial => "Commercial Photography",
            Self::Nature => "Nature Photography",
            Self::Fashion => "Fashion Photography",
            Self::PhotoEditing => "Photo Editing",
            Self::Videography => "Videography",
            Self::VideoEditing => "Video Editing",
            Self::Retouching => "Photo Shoot Retouching",
            Self::StudioLighting => "Studio Lighting Services",
            Self::Underwater => "Underwater Photography",
            Self::Engagement => "Engagement Photography",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Wedding Photography" => Ok(Self::Wedding),
            "Portrait Photography" => Ok(Self::Portrait),
            "Event Photography" => Ok(Self::Event),
            "Commercial Photography" => Ok(Self::Commercial),
            "Nature Photography" => Ok(Self::Nature),
            "Fashion Photography" => Ok(Self::Fashion),
            "Photo Editing" => Ok(Self::PhotoEditing),
            "Videography" => Ok(Self::Videography),
            "Video Editing" => Ok(Self::VideoEditing),
            "Photo Shoot Retouching" => Ok(Self::Retouching),
            "Studio Lighting Services" => Ok(Self::StudioLighting),
            "Underwater Photography" => Ok(Self::Underwater),
            "Engagement Photography" => Ok(Self::Engagement),
            other => Err(format!("unknown service: {other}")),
        }
    }
}

/// A published sample of the photographer's work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    /// Stable id used to address this item.
    #[serde(default)]
    pub id: PortfolioItemId,
    /// Item title.
    pub title: String,
    /// Item description.
    #[serde(default)]
    pub description: String,
    /// Image URL.
    #[serde(default)]
    pub image_url: String,
    /// Display category.
    #[serde(default)]
    pub category: String,
}

/// A priced package offered by the photographer.
///
/// The price is a 2-hour base rate; booking creation scales it by
/// `duration / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingEntry {
    /// Stable id used to address this entry.
    #[serde(default)]
    pub id: PricingEntryId,
    /// Service name, matched by exact string against booking requests.
    pub service: String,
    /// Base price.
    pub price: f64,
    /// Package description.
    #[serde(default)]
    pub description: String,
}

/// A bookable window within an availability entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Stable id used to address this slot.
    #[serde(default)]
    pub id: TimeSlotId,
    /// Start time, `"HH:MM"`.
    pub start: String,
    /// End time, `"HH:MM"`.
    pub end: String,
    /// Whether an active booking occupies this slot. Maintained
    /// imperatively by booking status transitions, not derived.
    #[serde(default)]
    pub is_booked: bool,
}

/// One calendar date of bookable windows.
///
/// At most one entry per calendar date per photographer, enforced at
/// creation time only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityEntry {
    /// Stable id used to address this entry.
    #[serde(default)]
    pub id: AvailabilityEntryId,
    /// The calendar date.
    pub date: NaiveDate,
    /// Bookable windows on that date.
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

/// A photographer's extended profile, paired one-to-one with a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photographer {
    /// Unique id of the profile (distinct from the user id).
    pub id: PhotographerId,
    /// The owning user account.
    pub user_id: UserId,
    /// Main specialization, free text.
    pub specialization: String,
    /// Offered services.
    pub services: Vec<ServiceKind>,
    /// Public description.
    pub description: String,
    /// Years of experience.
    pub experience: i32,
    /// Published work samples.
    pub portfolio: Vec<PortfolioItem>,
    /// Priced packages.
    pub pricing: Vec<PricingEntry>,
    /// Bookable windows per calendar date.
    pub availability: Vec<AvailabilityEntry>,
    /// Denormalized mean review rating, one decimal place.
    pub rating: f64,
    /// Denormalized review count.
    pub review_count: i64,
    /// Whether an admin has featured this profile.
    pub featured: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Photographer {
    /// Build a fresh profile with the registration defaults: a single
    /// "Basic Package" pricing entry and empty portfolio/availability.
    #[must_use]
    pub fn with_defaults(
        user_id: UserId,
        specialization: String,
        services: Vec<ServiceKind>,
        experience: i32,
        description: String,
    ) -> Self {
        Self {
            id: PhotographerId::new(),
            user_id,
            specialization,
            services,
            description,
            experience,
            portfolio: Vec::new(),
            pricing: vec![PricingEntry {
                id: PricingEntryId::new(),
                service: "Basic Package".to_string(),
                price: 100.0,
                description: "Basic photography package".to_string(),
            }],
            availability: Vec::new(),
            rating: 0.0,
            review_count: 0,
            featured: false,
            created_at: Utc::now(),
        }
    }

    /// Find the availability entry for a calendar date.
    #[must_use]
    pub fn availability_on(&self, date: NaiveDate) -> Option<&AvailabilityEntry> {
        self.availability.iter().find(|entry| entry.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_serde_uses_wire_names() {
        let json = serde_json::to_string(&ServiceKind::Wedding).unwrap_or_default();
        assert_eq!(json, "\"Wedding Photography\"");
    }

    #[test]
    fn test_defaults_include_basic_package() {
        let profile = Photographer::with_defaults(
            UserId::new(),
            "General Photography".to_string(),
            vec![ServiceKind::Portrait],
            3,
            String::new(),
        );
        assert_eq!(profile.pricing.len(), 1);
        assert_eq!(profile.pricing[0].service, "Basic Package");
        assert!((profile.pricing[0].price - 100.0).abs() < f64::EPSILON);
        assert_eq!(profile.rating, 0.0);
    }
}
