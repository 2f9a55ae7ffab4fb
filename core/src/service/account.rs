//! Registration, login and account cascade deletes.

use crate::error::{Result, StudioError};
use crate::ids::{PhotographerId, UserId};
use crate::model::{Photographer, Role, ServiceKind, User};
use crate::repository::{
    BookingRepository, PhotographerRepository, ReviewRepository, UserRepository,
};
use std::sync::Arc;

/// Input for [`AccountService::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to [`Role::Client`] when absent.
    pub role: Option<Role>,
    /// Photographer-only profile fields, ignored for other roles.
    pub specialization: Option<String>,
    pub services: Vec<String>,
    pub experience: Option<i32>,
    pub description: Option<String>,
}

/// Accounts: registration, login and the admin cascade deletes that
/// keep cross-entity references from dangling.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    photographers: Arc<dyn PhotographerRepository>,
    bookings: Arc<dyn BookingRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl AccountService {
    /// Wire the service to its repositories.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        photographers: Arc<dyn PhotographerRepository>,
        bookings: Arc<dyn BookingRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            users,
            photographers,
            bookings,
            reviews,
        }
    }

    /// Register a new account. Photographer registrations also create
    /// the profile with its defaults.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Validation` when the username or email is
    /// taken or a service name is unknown.
    pub async fn register(&self, input: Registration) -> Result<User> {
        let username_taken = self
            .users
            .find_by_username(&input.username)
            .await?
            .is_some();
        let email_taken = self.users.find_by_email(&input.email).await?.is_some();
        if username_taken || email_taken {
            return Err(StudioError::validation(
                "User with this email or username already exists",
            ));
        }

        let role = input.role.unwrap_or(Role::Client);
        let user = User::new(input.username, input.email, input.password, role);
        let user = self.users.create(&user).await?;

        if role == Role::Photographer {
            let services = input
                .services
                .iter()
                .map(|s| s.parse::<ServiceKind>().map_err(StudioError::Validation))
                .collect::<Result<Vec<_>>>()?;
            let profile = Photographer::with_defaults(
                user.id,
                input
                    .specialization
                    .unwrap_or_else(|| "General Photography".to_string()),
                services,
                input.experience.unwrap_or(0),
                input.description.unwrap_or_default(),
            );
            self.photographers.create(&profile).await?;
        }

        Ok(user)
    }

    /// Authenticate by username and password.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::InvalidCredentials` for an unknown
    /// username or a wrong password, indistinguishably.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(StudioError::InvalidCredentials)?;
        if user.password != password {
            return Err(StudioError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Delete a user and everything that references them: the
    /// photographer profile if one exists, bookings on either side,
    /// authored reviews, and reviews about their profile. Not
    /// transactional.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such user exists.
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        let user = self.users.get(id).await?;

        if let Some(profile) = self.photographers.find_by_user(user.id).await? {
            self.bookings.delete_by_photographer(profile.id).await?;
            self.reviews.delete_by_photographer(profile.id).await?;
            self.photographers.delete(profile.id).await?;
        }
        self.bookings.delete_by_client(user.id).await?;
        self.reviews.delete_by_client(user.id).await?;
        self.users.delete(user.id).await
    }

    /// Delete a photographer profile, its bookings and reviews, and
    /// the paired user account. Not transactional.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::NotFound` when no such profile exists.
    pub async fn delete_photographer(&self, id: PhotographerId) -> Result<()> {
        let profile = self.photographers.get(id).await?;

        self.bookings.delete_by_photographer(profile.id).await?;
        self.reviews.delete_by_photographer(profile.id).await?;
        self.photographers.delete(profile.id).await?;
        self.users.delete(profile.user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::mocks::{
        MockBookingRepository, MockPhotographerRepository, MockReviewRepository,
        MockUserRepository,
    };

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockPhotographerRepository::new()),
            Arc::new(MockBookingRepository::new()),
            Arc::new(MockReviewRepository::new()),
        )
    }

    fn registration(username: &str, email: &str, role: Option<Role>) -> Registration {
        Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role,
            specialization: None,
            services: Vec::new(),
            experience: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_register_defaults_to_client() {
        let service = service();
        let user = service
            .register(registration("alice", "alice@example.com", None))
            .await
            .unwrap();
        assert_eq!(user.role, Role::Client);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let service = service();
        service
            .register(registration("alice", "alice@example.com", None))
            .await
            .unwrap();
        let err = service
            .register(registration("alice", "other@example.com", None))
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_photographer_registration_creates_profile_with_basic_package() {
        let users = Arc::new(MockUserRepository::new());
        let photographers = Arc::new(MockPhotographerRepository::new());
        let service = AccountService::new(
            users,
            Arc::clone(&photographers) as Arc<dyn PhotographerRepository>,
            Arc::new(MockBookingRepository::new()),
            Arc::new(MockReviewRepository::new()),
        );

        let mut input = registration("bob", "bob@example.com", Some(Role::Photographer));
        input.services = vec!["Portrait Photography".to_string()];
        let user = service.register(input).await.unwrap();

        let profile = photographers.find_by_user(user.id).await.unwrap().unwrap();
        assert_eq!(profile.specialization, "General Photography");
        assert_eq!(profile.pricing[0].service, "Basic Package");
        assert!((profile.pricing[0].price - 100.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_login_same_error_for_unknown_user_and_bad_password() {
        let service = service();
        service
            .register(registration("alice", "alice@example.com", None))
            .await
            .unwrap();

        let unknown = service.login("nobody", "secret").await.unwrap_err();
        let wrong = service.login("alice", "wrong").await.unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let users = Arc::new(MockUserRepository::new());
        let photographers = Arc::new(MockPhotographerRepository::new());
        let bookings = Arc::new(MockBookingRepository::new());
        let reviews = Arc::new(MockReviewRepository::new());
        let service = AccountService::new(
            Arc::clone(&users) as Arc<dyn UserRepository>,
            Arc::clone(&photographers) as Arc<dyn PhotographerRepository>,
            Arc::clone(&bookings) as Arc<dyn BookingRepository>,
            Arc::clone(&reviews) as Arc<dyn ReviewRepository>,
        );

        let mut input = registration("bob", "bob@example.com", Some(Role::Photographer));
        input.services = vec!["Portrait Photography".to_string()];
        let user = service.register(input).await.unwrap();

        service.delete_user(user.id).await.unwrap();
        assert!(users.get(user.id).await.is_err());
        assert!(photographers.find_by_user(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_photographer_user_removes_reviews_about_them() {
        let users = Arc::new(MockUserRepository::new());
        let photographers = Arc::new(MockPhotographerRepository::new());
        let reviews = Arc::new(MockReviewRepository::new());
        let service = AccountService::new(
            Arc::clone(&users) as Arc<dyn UserRepository>,
            Arc::clone(&photographers) as Arc<dyn PhotographerRepository>,
            Arc::new(MockBookingRepository::new()),
            Arc::clone(&reviews) as Arc<dyn ReviewRepository>,
        );

        let client = service
            .register(registration("alice", "alice@example.com", None))
            .await
            .unwrap();
        let mut input = registration("bob", "bob@example.com", Some(Role::Photographer));
        input.services = vec!["Portrait Photography".to_string()];
        let user = service.register(input).await.unwrap();
        let profile = photographers.find_by_user(user.id).await.unwrap().unwrap();

        let now = chrono::Utc::now();
        reviews
            .create(&crate::model::Review {
                id: crate::ids::ReviewId::new(),
                client_id: client.id,
                photographer_id: profile.id,
                booking_id: None,
                rating: 5,
                title: "Great".to_string(),
                comment: "Loved it".to_string(),
                service_type: "Portrait Photography".to_string(),
                helpful_votes: 0,
                is_verified: false,
                photographer_response: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        service.delete_user(user.id).await.unwrap();
        let remaining = reviews.list_by_photographer(profile.id).await.unwrap();
        assert!(remaining.is_empty());
    }
}
