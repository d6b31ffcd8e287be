use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{
        password::{hash_password, verify_password},
        JwtService,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{hash_token, Difficulty, RefreshToken, User, UserProfile},
        dto::{
            request::{LoginRequest, RegisterRequest},
            response::{AuthResponse, TokenPair},
        },
    },
    repositories::{RefreshTokenRepository, UserProfileRepository, UserRepository},
};

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn UserProfileRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    jwt: JwtService,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn UserProfileRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        jwt: JwtService,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            profiles,
            refresh_tokens,
            jwt,
            bcrypt_cost,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        if request.username.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.is_empty()
        {
            return Err(AppError::ValidationError(
                "Username, email, and password are required".to_string(),
            ));
        }

        if let Some(confirm) = &request.password_confirm {
            if confirm != &request.password {
                return Err(AppError::ValidationError(
                    "Passwords do not match".to_string(),
                ));
            }
        }

        request.validate()?;

        let username = request.username.trim();
        let email = request.email.trim();

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::ValidationError(
                "Username already exists".to_string(),
            ));
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::ValidationError("Email already exists".to_string()));
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost).await?;
        let user = User::new(
            username,
            email,
            request.first_name.as_deref().unwrap_or_default().trim(),
            request.last_name.as_deref().unwrap_or_default().trim(),
            password_hash,
        );
        let user = self.users.create(user).await?;

        let difficulty = request
            .preferred_difficulty
            .and_then(Difficulty::new)
            .unwrap_or_default();
        let profile = UserProfile::new(
            &user.id,
            request.learning_style.unwrap_or_default(),
            difficulty,
        );
        self.profiles.upsert(profile).await?;

        log::info!("Registered user '{}'", user.username);

        let tokens = self.issue_tokens(&user).await?;
        Ok(AuthResponse {
            message: "User registered successfully".to_string(),
            user: user.into(),
            tokens,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        if request.username.trim().is_empty() || request.password.is_empty() {
            return Err(AppError::ValidationError(
                "Username and password are required".to_string(),
            ));
        }

        let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

        let user = self
            .users
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&request.password, &user.password_hash).await? {
            return Err(invalid());
        }

        let tokens = self.issue_tokens(&user).await?;
        Ok(AuthResponse {
            message: "Login successful".to_string(),
            user: user.into(),
            tokens,
        })
    }

    /// Exchanges a live refresh token for a new pair and revokes the old one.
    pub async fn refresh(&self, raw_token: &str) -> AppResult<TokenPair> {
        let raw_token = require_refresh_token(raw_token)?;
        let claims = self.jwt.validate_refresh_token(raw_token)?;

        let stored = self
            .refresh_tokens
            .consume(&hash_token(raw_token), &claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("Refresh token has been revoked".to_string())
            })?;

        let user = self
            .users
            .find_by_id(&stored.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

        self.issue_tokens(&user).await
    }

    pub async fn logout(&self, raw_token: &str) -> AppResult<()> {
        let raw_token = require_refresh_token(raw_token)?;
        self.jwt.validate_refresh_token(raw_token)?;

        let revoked = self.refresh_tokens.revoke(&hash_token(raw_token)).await?;
        if !revoked {
            log::debug!("Logout for a refresh token that was never stored");
        }
        Ok(())
    }

    async fn issue_tokens(&self, user: &User) -> AppResult<TokenPair> {
        let access = self.jwt.create_token(user)?;
        let refresh = self.jwt.create_refresh_token(&user.id)?;

        self.refresh_tokens
            .create(RefreshToken::new(
                &user.id,
                &refresh,
                self.jwt.refresh_expires_at(),
            ))
            .await?;

        Ok(TokenPair { access, refresh })
    }
}

fn require_refresh_token(raw_token: &str) -> AppResult<&str> {
    let raw_token = raw_token.trim();
    if raw_token.is_empty() {
        return Err(AppError::ValidationError(
            "Refresh token is required".to_string(),
        ));
    }
    Ok(raw_token)
}
