use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use contracts::system::auth::SessionClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

pub const STAFF_SUBJECT: &str = "staff";

/// Issue a staff session token valid for `hours`
pub fn generate_access_token(secret: &str, hours: i64) -> Result<(String, DateTime<Utc>)> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(hours);

    let claims = SessionClaims {
        sub: STAFF_SUBJECT.to_string(),
        sid: uuid::Uuid::new_v4().to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")?;

    Ok((token, expires_at))
}

/// Validate signature and expiry, returning the claims
pub fn validate_token(secret: &str, token: &str) -> Result<SessionClaims> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    if token_data.claims.sub != STAFF_SUBJECT {
        anyhow::bail!("Unexpected token subject: {}", token_data.claims.sub);
    }
    Ok(token_data.claims)
}

/// 256 random bits, base64
pub fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let (token, expires_at) = generate_access_token("s3cret", 12).unwrap();
        let claims = validate_token("s3cret", &token).unwrap();
        assert_eq!(claims.sub, STAFF_SUBJECT);
        assert_eq!(claims.exp, expires_at.timestamp() as usize);
        assert!(uuid::Uuid::parse_str(&claims.sid).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (token, _) = generate_access_token("one", 1).unwrap();
        assert!(validate_token("two", &token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Past the default 60 s leeway
        let (token, _) = generate_access_token("s3cret", -1).unwrap();
        assert!(validate_token("s3cret", &token).is_err());
    }

    #[test]
    fn test_secret_is_256_bits() {
        use base64::{engine::general_purpose, Engine as _};
        let secret = generate_jwt_secret();
        assert_eq!(general_purpose::STANDARD.decode(secret).unwrap().len(), 32);
    }
}
