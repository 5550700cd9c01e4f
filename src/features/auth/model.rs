use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ANONYMOUS_AUTHOR, ROLE_ADMIN};

/// Identity of the caller, taken from a validated access token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Stable subject id; used as the report owner id
    pub sub: String,
    pub email: Option<String>,
    /// Display name, when the identity provider has one
    pub name: Option<String>,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Staff who triage and update any report
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Name used to prefix notes: display name, then the email local part, then "Anonymous"
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .map(str::trim)
            .filter(|local| !local.is_empty())
            .map(String::from)
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string())
    }
}

/// Custom claims object published by the identity provider under a namespaced key
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomClaims {
    #[serde(default)]
    pub roles: Vec<String>,
}
