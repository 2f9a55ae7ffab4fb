//! Site-wide settings, stored as a singleton row.

use serde::{Deserialize, Serialize};

/// Public social media links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub twitter: String,
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            facebook: "https://facebook.com/lumenstudio".to_string(),
            instagram: "https://instagram.com/lumenstudio".to_string(),
            twitter: "https://twitter.com/lumenstudio".to_string(),
        }
    }
}

/// Advance-booking and cancellation windows, advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPolicy {
    pub min_advance_hours: i32,
    pub max_advance_days: i32,
    pub cancellation_hours: i32,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            min_advance_hours: 24,
            max_advance_days: 60,
            cancellation_hours: 48,
        }
    }
}

/// Site configuration edited by admins. A single row, auto-created
/// with defaults on first read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    #[serde(default)]
    pub social_media: SocialLinks,
    #[serde(default)]
    pub booking_settings: BookingPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_name: "Lumen Studio".to_string(),
            site_description: "Professional Photography Studio".to_string(),
            contact_email: "contact@lumenstudio.com".to_string(),
            contact_phone: "+1234567890".to_string(),
            address: "123 Photography St, Studio City".to_string(),
            social_media: SocialLinks::default(),
            booking_settings: BookingPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_booking_policy() {
        let settings = Settings::default();
        assert_eq!(settings.booking_settings.min_advance_hours, 24);
        assert_eq!(settings.booking_settings.max_advance_days, 60);
        assert_eq!(settings.booking_settings.cancellation_hours, 48);
    }
}
