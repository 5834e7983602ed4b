use actix_web::{Error as ActixError, FromRequest, HttpRequest, dev::Payload, web::Data};
use anyhow::Result;
use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

use crate::config::Config;
use crate::database::models::{AuthResponse, LoginInput, User, UserRole};
use crate::database::repositories::UserRepository;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64, // user id
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub exp: usize, // expiration time
}

impl Claims {
    pub fn user_id(&self) -> i64 {
        self.sub
    }

    pub fn is_manager(&self) -> bool {
        self.role == UserRole::Manager
    }

    pub fn require_manager(&self) -> Result<(), AppError> {
        if self.is_manager() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Access denied. Manager role required.".to_string(),
            ))
        }
    }
}

/// Verifies an HS256 bearer token and returns its claims.
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(token_data.claims)
}

impl FromRequest for Claims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<Data<Config>>() else {
            log::error!("Config missing from app data; cannot verify tokens");
            return ready(Err(AppError::internal_server_error().into()));
        };

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty());

        let result: Result<Self, ActixError> = match token {
            Some(token) => decode_claims(token, &config.jwt_secret).map_err(|e| {
                log::debug!("Rejected bearer token: {}", e);
                AppError::access_token_required().into()
            }),
            None => Err(AppError::access_token_required().into()),
        };

        ready(result)
    }
}

#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    config: Config,
}

impl AuthService {
    pub fn new(user_repository: UserRepository, config: Config) -> Self {
        Self {
            user_repository,
            config,
        }
    }

    /// Returns `None` when the email is unknown or the password does not match.
    pub async fn login(&self, request: LoginInput) -> Result<Option<AuthResponse>> {
        let Some(user) = self.user_repository.find_by_email(&request.email).await? else {
            return Ok(None);
        };

        if !verify(&request.password, &user.password_hash)? {
            return Ok(None);
        }

        let token = self.generate_token(&user)?;

        Ok(Some(AuthResponse {
            token,
            user: user.into(),
        }))
    }

    pub fn generate_token(&self, user: &User) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(self.config.jwt_expiration_hours))
            .ok_or_else(|| anyhow::anyhow!("Token expiration out of range"))?
            .timestamp() as usize;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            exp: expiration,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )?;

        Ok(token)
    }
}
