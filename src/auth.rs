use crate::error::{AppError, AppResult};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// JWT claims carried by every bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: usize,  // Expiration timestamp
    pub iat: usize,  // Issued at timestamp
}

/// Create a signed bearer token for a user
pub fn create_token(user_id: Uuid, secret: &str, expiry_secs: u64) -> AppResult<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + expiry_secs as i64) as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Message(format!("Token creation error: {}", e)))
}

/// Validate a bearer token and return its claims
pub fn validate_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token expired".to_string())
        }
        _ => AppError::Unauthorized("Invalid token".to_string()),
    })
}

/// Extract the token from an `Authorization: Bearer ...` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").map(str::trim)
}

/// Parse the user id out of validated claims
pub fn user_id_from_claims(claims: &Claims) -> AppResult<Uuid> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
}

/// Generate a random per-user password salt
pub fn generate_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Salted SHA-256 password digest, hex encoded
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify a password against a stored digest
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    hash_password(password, salt) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-material";

    #[test]
    fn test_token_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, SECRET, 3600).unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(user_id_from_claims(&claims).unwrap(), user_id);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = create_token(Uuid::new_v4(), SECRET, 3600).unwrap();
        assert!(validate_token(&token, "some-other-secret-value").is_err());
    }

    #[test]
    fn test_bearer_extraction() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_password_hashing() {
        let salt = generate_salt();
        let hash = hash_password("hunter42", &salt);

        assert!(verify_password("hunter42", &salt, &hash));
        assert!(!verify_password("hunter43", &salt, &hash));

        // Same password, different salt, different digest
        let other_salt = generate_salt();
        assert_ne!(hash, hash_password("hunter42", &other_salt));
    }
}
