// src/services/auth.rs

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User},
};

// Ponte de identidade: o login troca um e-mail conhecido por um token
// assinado, e cada requisição resolve o token de volta para um usuário
// fresco do banco. O motor de workflow nunca enxerga headers.
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    // Login de demonstração: sem senha, mas a identidade circula assinada.
    pub async fn login_user(&self, email: &str) -> Result<(String, User), AppError> {
        let user = self
            .user_repo
            .find_active_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let token = issue_token(&self.jwt_secret, user.id)?;
        Ok((token, user))
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        // Recarrega do banco: papel e ativação valem por requisição,
        // não pelo que estava no token.
        self.user_repo
            .find_active_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}

fn issue_token(jwt_secret: &str, user_id: Uuid) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(7);

    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let user_id = Uuid::new_v4();
        let token = issue_token("segredo-de-teste", user_id).unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("segredo-de-teste".as_ref()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, user_id);
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn token_fails_with_wrong_secret() {
        let token = issue_token("segredo-a", Uuid::new_v4()).unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("segredo-b".as_ref()),
            &Validation::default(),
        );

        assert!(result.is_err());
    }
}
