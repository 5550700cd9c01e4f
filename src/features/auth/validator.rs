use super::model::{AuthenticatedUser, CustomClaims};
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use super::jwks::JwksClient;

pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
    claims_namespace: String,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    /// Everything else, including the namespaced custom claims
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl JwtValidator {
    pub fn new(jwks_client: Arc<JwksClient>, config: &AuthConfig) -> Self {
        Self {
            jwks_client,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            leeway: config.jwt_leeway.as_secs(),
            claims_namespace: config.claims_namespace.clone(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Unauthorized(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::Unauthorized(format!(
                "Unsupported algorithm: {:?}. Only RS256 is allowed",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AppError::Unauthorized("Missing kid in token header".to_string()))?;

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let claims = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?
            .claims;

        Ok(self.into_user(claims))
    }

    fn into_user(&self, claims: Claims) -> AuthenticatedUser {
        let custom: CustomClaims = claims
            .extra
            .get(&self.claims_namespace)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        AuthenticatedUser {
            sub: claims.sub,
            email: claims.email,
            name: claims.name,
            roles: custom.roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn validator() -> JwtValidator {
        let config = AuthConfig {
            issuer: "https://id.example.com".to_string(),
            audience: "civic-api".to_string(),
            jwks_cache_ttl: Duration::from_secs(60),
            jwt_leeway: Duration::from_secs(0),
            claims_namespace: "https://civic-report.app/claims".to_string(),
        };
        JwtValidator::new(
            Arc::new(JwksClient::new(&config.issuer, config.jwks_cache_ttl)),
            &config,
        )
    }

    #[test]
    fn test_claims_map_to_user_with_namespaced_roles() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "user-42",
            "email": "dana@example.com",
            "name": "Dana",
            "https://civic-report.app/claims": { "roles": ["admin"] }
        }))
        .unwrap();

        let user = validator().into_user(claims);
        assert_eq!(user.sub, "user-42");
        assert_eq!(user.email.as_deref(), Some("dana@example.com"));
        assert!(user.is_admin());
    }

    #[test]
    fn test_missing_custom_claims_yield_no_roles() {
        let claims: Claims =
            serde_json::from_value(serde_json::json!({ "sub": "user-7" })).unwrap();

        let user = validator().into_user(claims);
        assert!(user.roles.is_empty());
        assert_eq!(user.display_name(), "Anonymous");
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let err = validator().validate_token("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
