//! Photographer profiles: scalar updates plus the embedded portfolio
//! and availability ledgers, addressed by stable item ids.

use crate::error::{Result, StudioError};
use crate::ids::{
    AvailabilityEntryId, PhotographerId, PortfolioItemId, TimeSlotId, UserId,
};
use crate::model::{
    AvailabilityEntry, Photographer, PortfolioItem, PricingEntry, ServiceKind, TimeSlot,
};
use crate::repository::PhotographerRepository;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// Input for [`PhotographerService::create`].
#[derive(Debug, Clone)]
pub struct NewPhotographer {
    pub user_id: UserId,
    pub specialization: String,
    pub services: Vec<ServiceKind>,
    pub description: String,
    pub experience: i32,
    pub pricing: Vec<PricingEntry>,
}

/// Shallow profile update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct PhotographerPatch {
    pub specialization: Option<String>,
    pub services: Option<Vec<ServiceKind>>,
    pub description: Option<String>,
    pub experience: Option<i32>,
    pub pricing: Option<Vec<PricingEntry>>,
}

/// Input for adding a portfolio item.
#[derive(Debug, Clone)]
pub struct PortfolioItemInput {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
}

/// Shallow portfolio item update.
#[derive(Debug, Clone, Default)]
pub struct PortfolioItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// Input for adding one calendar date of availability.
#[derive(Debug, Clone)]
pub struct NewAvailability {
    pub date: NaiveDate,
    /// `(start, end)` windows; slots start out free.
    pub time_slots: Vec<(String, String)>,
}

/// Shallow availability entry update.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityPatch {
    pub date: Option<NaiveDate>,
    /// Replaces the whole slot list when present.
    pub time_slots: Option<Vec<(String, String)>>,
}

/// Photographer profile management.
#[derive(Clone)]
pub struct PhotographerService {
    photographers: Arc<dyn PhotographerRepository>,
}

impl PhotographerService {
    /// Wire the service to its repository.
    #[must_use]
    pub fn new(photographers: Arc<dyn PhotographerRepository>) -> Self {
        Self { photographers }
    }

    /// Create a profile with the provided fields and empty portfolio
    /// and availability.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    pub async fn create(&self, input: NewPhotographer) -> Result<Photographer> {
        let photographer = Photographer {
            id: PhotographerId::new(),
            user_id: input.user_id,
            specialization: input.specialization,
            services: input.services,
            description: input.description,
            experience: input.experience,
            portfolio: Vec::new(),
            pricing: input.pricing,
            availability: Vec::new(),
            rating: 0.0,
            review_count: 0,
            featured: false,
            created_at: Utc::now(),
        };
        self.photographers.create(&photographer).await
    }

    /// Shallow update of the profile's scalar fields and pricing.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such profile exists.
    pub async fn update(
        &self,
        id: PhotographerId,
        patch: PhotographerPatch,
    ) -> Result<Photographer> {
        let mut photographer = self.photographers.get(id).await?;
        if let Some(specialization) = patch.specialization {
            photographer.specialization = specialization;
        }
        if let Some(services) = patch.services {
            photographer.services = services;
        }
        if let Some(description) = patch.description {
            photographer.description = description;
        }
        if let Some(experience) = patch.experience {
            photographer.experience = experience;
        }
        if let Some(pricing) = patch.pricing {
            photographer.pricing = pricing;
        }
        self.photographers.update(&photographer).await
    }

    /// Set or clear the admin featured flag.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such profile exists.
    pub async fn set_featured(&self, id: PhotographerId, featured: bool) -> Result<Photographer> {
        let mut photographer = self.photographers.get(id).await?;
        photographer.featured = featured;
        self.photographers.update(&photographer).await
    }

    /// Profiles with a rating of at least 4, best first, at most six.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Database` on storage failure.
    pub async fn featured(&self) -> Result<Vec<Photographer>> {
        let mut photographers: Vec<_> = self
            .photographers
            .list()
            .await?
            .into_iter()
            .filter(|p| p.rating >= 4.0)
            .collect();
        photographers.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        photographers.truncate(6);
        Ok(photographers)
    }

    /// Append a portfolio item. Returns the full portfolio.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such profile exists.
    pub async fn add_portfolio_item(
        &self,
        id: PhotographerId,
        input: PortfolioItemInput,
    ) -> Result<Vec<PortfolioItem>> {
        let mut photographer = self.photographers.get(id).await?;
        photographer.portfolio.push(PortfolioItem {
            id: PortfolioItemId::new(),
            title: input.title,
            description: input.description,
            image_url: input.image_url,
            category: input.category,
        });
        let photographer = self.photographers.update(&photographer).await?;
        Ok(photographer.portfolio)
    }

    /// Shallow update of one portfolio item. Returns the full
    /// portfolio.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when the profile or the item
    /// does not exist.
    pub async fn update_portfolio_item(
        &self,
        id: PhotographerId,
        item_id: PortfolioItemId,
        patch: PortfolioItemPatch,
    ) -> Result<Vec<PortfolioItem>> {
        let mut photographer = self.photographers.get(id).await?;
        let item = photographer
            .portfolio
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(StudioError::NotFound("Portfolio item"))?;
        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(image_url) = patch.image_url {
            item.image_url = image_url;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        let photographer = self.photographers.update(&photographer).await?;
        Ok(photographer.portfolio)
    }

    /// Remove one portfolio item. Returns the remaining portfolio.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when the profile or the item
    /// does not exist.
    pub async fn remove_portfolio_item(
        &self,
        id: PhotographerId,
        item_id: PortfolioItemId,
    ) -> Result<Vec<PortfolioItem>> {
        let mut photographer = self.photographers.get(id).await?;
        let before = photographer.portfolio.len();
        photographer.portfolio.retain(|item| item.id != item_id);
        if photographer.portfolio.len() == before {
            return Err(StudioError::NotFound("Portfolio item"));
        }
        let photographer = self.photographers.update(&photographer).await?;
        Ok(photographer.portfolio)
    }

    /// Add availability for one calendar date. Slots start out free.
    /// Returns the full availability list.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such profile exists,
    /// `StudioError::Validation` when an entry for that date already
    /// exists.
    pub async fn add_availability(
        &self,
        id: PhotographerId,
        input: NewAvailability,
    ) -> Result<Vec<AvailabilityEntry>> {
        let mut photographer = self.photographers.get(id).await?;
        if photographer.availability_on(input.date).is_some() {
            return Err(StudioError::validation(
                "Availability for this date already exists",
            ));
        }
        photographer.availability.push(AvailabilityEntry {
            id: AvailabilityEntryId::new(),
            date: input.date,
            time_slots: fresh_slots(input.time_slots),
        });
        let photographer = self.photographers.update(&photographer).await?;
        Ok(photographer.availability)
    }

    /// Shallow update of one availability entry; a provided slot list
    /// replaces the old one wholesale. Returns the full availability
    /// list.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when the profile or the entry
    /// does not exist.
    pub async fn update_availability(
        &self,
        id: PhotographerId,
        entry_id: AvailabilityEntryId,
        patch: AvailabilityPatch,
    ) -> Result<Vec<AvailabilityEntry>> {
        let mut photographer = self.photographers.get(id).await?;
        let entry = photographer
            .availability
            .iter_mut()
            .find(|entry| entry.id == entry_id)
            .ok_or(StudioError::NotFound("Availability"))?;
        if let Some(date) = patch.date {
            entry.date = date;
        }
        if let Some(time_slots) = patch.time_slots {
            entry.time_slots = fresh_slots(time_slots);
        }
        let photographer = self.photographers.update(&photographer).await?;
        Ok(photographer.availability)
    }

    /// Remove one availability entry. Returns the remaining list.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when the profile or the entry
    /// does not exist.
    pub async fn remove_availability(
        &self,
        id: PhotographerId,
        entry_id: AvailabilityEntryId,
    ) -> Result<Vec<AvailabilityEntry>> {
        let mut photographer = self.photographers.get(id).await?;
        let before = photographer.availability.len();
        photographer.availability.retain(|entry| entry.id != entry_id);
        if photographer.availability.len() == before {
            return Err(StudioError::NotFound("Availability"));
        }
        let photographer = self.photographers.update(&photographer).await?;
        Ok(photographer.availability)
    }
}

fn fresh_slots(windows: Vec<(String, String)>) -> Vec<TimeSlot> {
    windows
        .into_iter()
        .map(|(start, end)| TimeSlot {
            id: TimeSlotId::new(),
            start,
            end,
            is_booked: false,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::mocks::MockPhotographerRepository;

    async fn service_with_profile() -> (PhotographerService, PhotographerId) {
        let repo = Arc::new(MockPhotographerRepository::new());
        let service = PhotographerService::new(Arc::clone(&repo) as Arc<dyn PhotographerRepository>);
        let profile = service
            .create(NewPhotographer {
                user_id: UserId::new(),
                specialization: "Portraits".to_string(),
                services: vec![ServiceKind::Portrait],
                description: String::new(),
                experience: 4,
                pricing: Vec::new(),
            })
            .await
            .unwrap();
        (service, profile.id)
    }

    #[tokio::test]
    async fn test_duplicate_availability_date_is_rejected() {
        let (service, id) = service_with_profile().await;
        let date = NaiveDate::from_ymd_opt(2026, 9, 12).unwrap();
        service
            .add_availability(
                id,
                NewAvailability {
                    date,
                    time_slots: vec![("10:00".to_string(), "12:00".to_string())],
                },
            )
            .await
            .unwrap();

        let err = service
            .add_availability(
                id,
                NewAvailability {
                    date,
                    time_slots: Vec::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_availability_is_addressed_by_id() {
        let (service, id) = service_with_profile().await;
        let date = NaiveDate::from_ymd_opt(2026, 9, 12).unwrap();
        let availability = service
            .add_availability(
                id,
                NewAvailability {
                    date,
                    time_slots: vec![("10:00".to_string(), "12:00".to_string())],
                },
            )
            .await
            .unwrap();
        let entry_id = availability[0].id;

        let updated = service
            .update_availability(
                id,
                entry_id,
                AvailabilityPatch {
                    date: NaiveDate::from_ymd_opt(2026, 9, 13),
                    time_slots: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(
            updated[0].date,
            NaiveDate::from_ymd_opt(2026, 9, 13).unwrap()
        );
        // Untouched slots survive a date-only patch.
        assert_eq!(updated[0].time_slots.len(), 1);

        let err = service
            .update_availability(id, AvailabilityEntryId::new(), AvailabilityPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err, StudioError::NotFound("Availability"));
    }

    #[tokio::test]
    async fn test_portfolio_item_lifecycle() {
        let (service, id) = service_with_profile().await;
        let portfolio = service
            .add_portfolio_item(
                id,
                PortfolioItemInput {
                    title: "Sunset".to_string(),
                    description: String::new(),
                    image_url: "/img/sunset.jpg".to_string(),
                    category: "Nature".to_string(),
                },
            )
            .await
            .unwrap();
        let item_id = portfolio[0].id;

        let portfolio = service
            .update_portfolio_item(
                id,
                item_id,
                PortfolioItemPatch {
                    title: Some("Golden Hour".to_string()),
                    ..PortfolioItemPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(portfolio[0].title, "Golden Hour");

        let portfolio = service.remove_portfolio_item(id, item_id).await.unwrap();
        assert!(portfolio.is_empty());

        let err = service.remove_portfolio_item(id, item_id).await.unwrap_err();
        assert_eq!(err, StudioError::NotFound("Portfolio item"));
    }

    #[tokio::test]
    async fn test_featured_filters_and_sorts_by_rating() {
        let repo = Arc::new(MockPhotographerRepository::new());
        let service = PhotographerService::new(Arc::clone(&repo) as Arc<dyn PhotographerRepository>);
        for rating in [3.9, 4.2, 4.8, 4.0] {
            let mut profile = Photographer::with_defaults(
                UserId::new(),
                "General Photography".to_string(),
                Vec::new(),
                1,
                String::new(),
            );
            profile.rating = rating;
            repo.create(&profile).await.unwrap();
        }

        let featured = service.featured().await.unwrap();
        assert_eq!(featured.len(), 3);
        assert!((featured[0].rating - 4.8).abs() < f64::EPSILON);
    }
}
