use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{timestamp, Difficulty, User, UserProfile},
        dto::{request::UpdateProfileRequest, response::ProfileDto},
    },
    repositories::{UserProfileRepository, UserRepository},
};

pub struct ProfileService {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn UserProfileRepository>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepository>, profiles: Arc<dyn UserProfileRepository>) -> Self {
        Self { users, profiles }
    }

    pub async fn get_or_create(&self, user_id: &str) -> AppResult<UserProfile> {
        if let Some(profile) = self.profiles.find_by_user(user_id).await? {
            return Ok(profile);
        }
        self.profiles.upsert(UserProfile::default_for(user_id)).await
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<ProfileDto> {
        let user = self.get_user(user_id).await?;
        let profile = self.get_or_create(user_id).await?;
        Ok(ProfileDto::new(user, profile))
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> AppResult<ProfileDto> {
        request.validate()?;

        let user = self.get_user(user_id).await?;
        let mut profile = self.get_or_create(user_id).await?;

        if let Some(style) = request.learning_style {
            profile.learning_style = style;
        }
        if let Some(level) = request.preferred_difficulty {
            profile.preferred_difficulty = Difficulty::new(level).ok_or_else(|| {
                AppError::ValidationError("Difficulty must be between 1 and 3".to_string())
            })?;
        }
        profile.updated_at = timestamp::now();

        let profile = self.profiles.upsert(profile).await?;
        Ok(ProfileDto::new(user, profile))
    }

    pub async fn set_preferred_difficulty(
        &self,
        user_id: &str,
        difficulty: Difficulty,
    ) -> AppResult<UserProfile> {
        let mut profile = self.get_or_create(user_id).await?;
        if profile.preferred_difficulty == difficulty {
            return Ok(profile);
        }
        profile.preferred_difficulty = difficulty;
        profile.updated_at = timestamp::now();
        self.profiles.upsert(profile).await
    }

    async fn get_user(&self, user_id: &str) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::domain::LearningStyle, repositories::Repositories, test_utils::fixtures};

    #[tokio::test]
    async fn get_profile_creates_default_profile() {
        let store = Repositories::in_memory();
        let user = store.users.create(fixtures::test_user()).await.unwrap();
        let service = ProfileService::new(store.users.clone(), store.profiles.clone());

        let profile = service.get_profile(&user.id).await.unwrap();

        assert_eq!(profile.learning_style, LearningStyle::Visual);
        assert_eq!(profile.preferred_difficulty, Difficulty::BEGINNER);
        assert!(store.profiles.find_by_user(&user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_profile_changes_only_supplied_fields() {
        let store = Repositories::in_memory();
        let user = store.users.create(fixtures::test_user()).await.unwrap();
        let service = ProfileService::new(store.users.clone(), store.profiles.clone());

        let updated = service
            .update_profile(
                &user.id,
                UpdateProfileRequest {
                    learning_style: Some(LearningStyle::Auditory),
                    preferred_difficulty: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.learning_style, LearningStyle::Auditory);
        assert_eq!(updated.preferred_difficulty, Difficulty::BEGINNER);

        let err = service
            .update_profile(
                &user.id,
                UpdateProfileRequest {
                    learning_style: None,
                    preferred_difficulty: Some(4),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let store = Repositories::in_memory();
        let service = ProfileService::new(store.users.clone(), store.profiles.clone());
        let err = service.get_profile("ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
