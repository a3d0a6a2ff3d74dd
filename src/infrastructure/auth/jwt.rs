//! Signed team tokens (HS256 JWT)

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::auth::{Principal, RoleSet};
use crate::domain::DomainError;

/// Minimum signing secret length in bytes (256 bits)
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime (one year)
pub const MAX_EXPIRATION_MINUTES: u64 = 365 * 24 * 60;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,
    pub aud: String,
    /// Subject (team tag)
    pub sub: String,
    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,
    #[serde(rename = "teamId")]
    pub team_id: Option<i64>,
    #[serde(rename = "teamTag")]
    pub team_tag: String,
    /// Unknown authority names fail deserialization
    pub roles: RoleSet,
}

/// Configuration for the token service
#[derive(Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    pub secret: String,
    pub expiration_minutes: u64,
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("secret", &"[hidden]")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        secret: impl Into<String>,
        expiration_minutes: u64,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            secret: secret.into(),
            expiration_minutes,
        }
    }
}

/// A freshly issued token and the instant it stops being accepted
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies stateless team tokens
pub trait TokenService: Send + Sync + Debug {
    /// Sign a token for the principal, valid for the configured TTL
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, DomainError>;

    /// Check signature, issuer, audience and expiry and rebuild the principal
    fn verify(&self, token: &str) -> Result<Principal, DomainError>;

    fn expiration_minutes(&self) -> u64;
}

/// HMAC-SHA256 token service with a fixed secret
#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtTokenService {
    /// Create the service, rejecting a secret shorter than 256 bits
    pub fn new(config: JwtConfig) -> Result<Self, DomainError> {
        if config.secret.len() < MIN_SECRET_BYTES {
            return Err(DomainError::configuration(format!(
                "Token signing secret must be at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }

        if config.expiration_minutes == 0 || config.expiration_minutes > MAX_EXPIRATION_MINUTES {
            return Err(DomainError::configuration(format!(
                "Token expiration must be between 1 and {} minutes",
                MAX_EXPIRATION_MINUTES
            )));
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, DomainError> {
        if principal.team_tag().trim().is_empty() {
            return Err(DomainError::validation(
                "Cannot issue a token without a team tag",
            ));
        }

        let expires_at = i64::try_from(self.config.expiration_minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| DomainError::internal("Token expiry is out of range"))?;
        let claims = TokenClaims {
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            sub: principal.team_tag().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            team_id: principal.team_id(),
            team_tag: principal.team_tag().to_string(),
            roles: principal.roles(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken {
            token,
            // whole-second precision, matching the exp claim
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or(expires_at),
        })
    }

    /// Decode and validate the raw claims
    pub fn decode_claims(&self, token: &str) -> Result<TokenClaims, DomainError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| DomainError::invalid_token(e.to_string()))?;

        if data.claims.sub != data.claims.team_tag {
            return Err(DomainError::invalid_token("Subject does not match team tag"));
        }

        Ok(data.claims)
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, DomainError> {
        self.issue_at(principal, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<Principal, DomainError> {
        let claims = self.decode_claims(token)?;

        Ok(Principal::new(claims.team_tag, claims.team_id, claims.roles))
    }

    fn expiration_minutes(&self) -> u64 {
        self.config.expiration_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::Role;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn config(secret: &str) -> JwtConfig {
        JwtConfig::new("telemetry-gateway", "telemetry-clients", secret, 120)
    }

    fn create_service() -> JwtTokenService {
        JwtTokenService::new(config(SECRET)).unwrap()
    }

    fn ia_principal() -> Principal {
        Principal::new("IA", Some(2), RoleSet::of(&[Role::Ia]))
    }

    #[test]
    fn test_issue_and_verify() {
        let service = create_service();
        let principal = ia_principal();

        let issued = service.issue(&principal).unwrap();
        assert!(!issued.token.is_empty());

        let verified = service.verify(&issued.token).unwrap();
        assert_eq!(verified, principal);
    }

    #[test]
    fn test_round_trip_without_team_id() {
        let service = create_service();
        let principal = Principal::new("JAVA", None, RoleSet::of(&[Role::Java, Role::Iot]));

        let issued = service.issue(&principal).unwrap();
        assert_eq!(service.verify(&issued.token).unwrap(), principal);
    }

    #[test]
    fn test_claims_content() {
        let service = create_service();
        let now = Utc::now();

        let issued = service.issue_at(&ia_principal(), now).unwrap();
        let claims = service.decode_claims(&issued.token).unwrap();

        assert_eq!(claims.iss, "telemetry-gateway");
        assert_eq!(claims.aud, "telemetry-clients");
        assert_eq!(claims.sub, "IA");
        assert_eq!(claims.team_id, Some(2));
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 120 * 60);
        assert_eq!(issued.expires_at.timestamp(), claims.exp);
    }

    #[test]
    fn test_claims_wire_names() {
        let service = create_service();
        let issued = service.issue(&ia_principal()).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&["telemetry-clients"]);
        let raw = decode::<serde_json::Value>(
            &issued.token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        )
        .unwrap()
        .claims;

        assert_eq!(raw["teamTag"], "IA");
        assert_eq!(raw["teamId"], 2);
        assert_eq!(raw["roles"], serde_json::json!(["ROLE_IA"]));
    }

    #[test]
    fn test_expired_token() {
        let service = create_service();
        let issued_at = Utc::now() - TimeDelta::minutes(121);

        let issued = service.issue_at(&ia_principal(), issued_at).unwrap();

        let result = service.verify(&issued.token);
        assert!(matches!(result, Err(DomainError::InvalidToken { .. })));
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = create_service();
        let service2 =
            JwtTokenService::new(config("fedcba9876543210fedcba9876543210")).unwrap();

        let issued = service1.issue(&ia_principal()).unwrap();

        let result = service2.verify(&issued.token);
        assert!(matches!(result, Err(DomainError::InvalidToken { .. })));
    }

    #[test]
    fn test_wrong_audience_and_issuer() {
        let service = create_service();
        let other_audience = JwtTokenService::new(JwtConfig::new(
            "telemetry-gateway",
            "someone-else",
            SECRET,
            120,
        ))
        .unwrap();
        let other_issuer = JwtTokenService::new(JwtConfig::new(
            "another-gateway",
            "telemetry-clients",
            SECRET,
            120,
        ))
        .unwrap();

        let token = service.issue(&ia_principal()).unwrap().token;

        assert!(other_audience.verify(&token).is_err());
        assert!(other_issuer.verify(&token).is_err());
    }

    #[test]
    fn test_malformed_token() {
        let service = create_service();

        assert!(matches!(
            service.verify("invalid-token"),
            Err(DomainError::InvalidToken { .. })
        ));
        assert!(service.verify("").is_err());
    }

    #[test]
    fn test_unknown_role_claim_is_rejected() {
        let service = create_service();
        let now = Utc::now().timestamp();
        let claims = serde_json::json!({
            "iss": "telemetry-gateway",
            "aud": "telemetry-clients",
            "sub": "IA",
            "iat": now,
            "exp": now + 600,
            "teamId": 2,
            "teamTag": "IA",
            "roles": ["ROLE_ROOT"],
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(DomainError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = JwtTokenService::new(config("too-short"));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_expiration_bounds() {
        let ttl = |minutes| {
            JwtTokenService::new(JwtConfig::new(
                "telemetry-gateway",
                "telemetry-clients",
                SECRET,
                minutes,
            ))
        };

        assert!(matches!(ttl(0), Err(DomainError::Configuration { .. })));
        assert!(matches!(
            ttl(MAX_EXPIRATION_MINUTES + 1),
            Err(DomainError::Configuration { .. })
        ));
        assert!(matches!(ttl(u64::MAX / 2), Err(DomainError::Configuration { .. })));

        let service = ttl(MAX_EXPIRATION_MINUTES).unwrap();
        let now = Utc::now();
        let issued = service.issue_at(&ia_principal(), now).unwrap();
        assert_eq!(
            issued.expires_at.timestamp(),
            now.timestamp() + MAX_EXPIRATION_MINUTES as i64 * 60
        );
        assert!(service.verify(&issued.token).is_ok());
    }

    #[test]
    fn test_blank_team_tag_rejected() {
        let service = create_service();
        let principal = Principal::new(" ", None, RoleSet::empty());

        assert!(service.issue(&principal).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", create_service());
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("[hidden]"));
    }
}
