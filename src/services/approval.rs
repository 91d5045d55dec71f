//! One-click approval token codec.
//!
//! Tokens are a capability embedded in approval emails: holding a valid
//! token for a visitor lets an unauthenticated staff member approve that
//! visitor. The payload is `"{visitor_id}:{staff_email}:{expiry_unix}"`,
//! signed with HMAC-SHA256 so the three fields cannot be forged, and
//! encoded as `base64url(payload).base64url(mac)`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// A validated token payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalClaim {
    pub visitor_id: i32,
    pub staff_email: String,
}

#[derive(Clone)]
pub struct ApprovalTokenCodec {
    secret: String,
    ttl: Duration,
}

impl ApprovalTokenCodec {
    pub fn new(secret: impl Into<String>, ttl_days: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Configured validity window, surfaced in approval emails
    pub fn ttl_days(&self) -> i64 {
        self.ttl.num_days()
    }

    fn sign(&self, payload: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Issue a token approving `visitor_id`, attributed to `staff_email`,
    /// valid for the configured TTL from `now`
    pub fn issue(&self, visitor_id: i32, staff_email: &str, now: DateTime<Utc>) -> String {
        let expiry = (now + self.ttl).timestamp();
        let payload = format!("{}:{}:{}", visitor_id, staff_email, expiry);
        let mac = self.sign(&payload);
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            URL_SAFE_NO_PAD.encode(mac)
        )
    }

    /// Validate a token against the visitor id from the URL path.
    /// Error ladder: malformed or mis-signed input -> InvalidToken,
    /// visitor id disagreement -> TokenMismatch, past expiry ->
    /// TokenExpired. Staff resolution happens at the service layer.
    pub fn validate(
        &self,
        token: &str,
        visitor_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<ApprovalClaim> {
        let (payload_b64, mac_b64) = token
            .split_once('.')
            .ok_or_else(|| AppError::InvalidToken("Malformed approval token".to_string()))?;

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AppError::InvalidToken("Malformed approval token".to_string()))?;
        let mac_bytes = URL_SAFE_NO_PAD
            .decode(mac_b64)
            .map_err(|_| AppError::InvalidToken("Malformed approval token".to_string()))?;

        let payload = String::from_utf8(payload_bytes)
            .map_err(|_| AppError::InvalidToken("Malformed approval token".to_string()))?;

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(payload.as_bytes());
        mac.verify_slice(&mac_bytes)
            .map_err(|_| AppError::InvalidToken("Invalid token signature".to_string()))?;

        let parts: Vec<&str> = payload.splitn(3, ':').collect();
        if parts.len() < 3 {
            return Err(AppError::InvalidToken("Malformed approval token".to_string()));
        }

        let token_visitor_id: i32 = parts[0]
            .parse()
            .map_err(|_| AppError::InvalidToken("Malformed approval token".to_string()))?;
        if token_visitor_id != visitor_id {
            return Err(AppError::TokenMismatch(format!(
                "Token was issued for visitor {}",
                token_visitor_id
            )));
        }

        let expiry: i64 = parts[2]
            .parse()
            .map_err(|_| AppError::InvalidToken("Malformed approval token".to_string()))?;
        if now.timestamp() > expiry {
            return Err(AppError::TokenExpired);
        }

        Ok(ApprovalClaim {
            visitor_id: token_visitor_id,
            staff_email: parts[1].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> ApprovalTokenCodec {
        ApprovalTokenCodec::new("test-secret", 7)
    }

    #[test]
    fn ttl_days_reflects_configuration() {
        assert_eq!(ApprovalTokenCodec::new("s", 14).ttl_days(), 14);
        assert_eq!(codec().ttl_days(), 7);
    }

    #[test]
    fn round_trip_validates() {
        let now = Utc::now();
        let token = codec().issue(42, "staff@example.com", now);
        let claim = codec().validate(&token, 42, now).unwrap();
        assert_eq!(claim.visitor_id, 42);
        assert_eq!(claim.staff_email, "staff@example.com");
    }

    #[test]
    fn garbage_input_is_invalid() {
        let now = Utc::now();
        assert!(matches!(
            codec().validate("not-a-token", 42, now),
            Err(AppError::InvalidToken(_))
        ));
        assert!(matches!(
            codec().validate("!!!.???", 42, now),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn tampered_payload_fails_signature() {
        let now = Utc::now();
        let token = codec().issue(42, "staff@example.com", now);
        let (_, mac) = token.split_once('.').unwrap();
        let forged_payload =
            URL_SAFE_NO_PAD.encode(format!("43:staff@example.com:{}", (now + Duration::days(7)).timestamp()));
        let forged = format!("{}.{}", forged_payload, mac);
        assert!(matches!(
            codec().validate(&forged, 43, now),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn wrong_visitor_is_a_mismatch() {
        let now = Utc::now();
        let token = codec().issue(42, "staff@example.com", now);
        assert!(matches!(
            codec().validate(&token, 43, now),
            Err(AppError::TokenMismatch(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issued = Utc::now() - Duration::days(8);
        let token = codec().issue(42, "staff@example.com", issued);
        assert!(matches!(
            codec().validate(&token, 42, Utc::now()),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn mismatch_wins_over_expiry() {
        // The id check runs before the expiry check, matching the
        // documented validation order
        let issued = Utc::now() - Duration::days(8);
        let token = codec().issue(42, "staff@example.com", issued);
        assert!(matches!(
            codec().validate(&token, 43, Utc::now()),
            Err(AppError::TokenMismatch(_))
        ));
    }

    #[test]
    fn email_with_colon_still_parses() {
        // splitn(3) keeps the expiry as the final field even if the email
        // somehow contains a colon
        let now = Utc::now();
        let token = codec().issue(7, "odd:name@example.com", now);
        // The expiry lands inside part 2 instead; such an address makes the
        // expiry unparseable and the token invalid rather than panicking
        assert!(codec().validate(&token, 7, now).is_err());
    }
}
