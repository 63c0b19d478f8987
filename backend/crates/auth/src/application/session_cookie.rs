//! Session Cookie Codec
//!
//! Cookie value format: `<session-uuid>.<base64url(HMAC-SHA256(session-uuid))>`

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::value_object::SessionId;
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &[u8]) -> AuthResult<HmacSha256> {
    HmacSha256::new_from_slice(secret).map_err(|e| AuthError::Internal(e.to_string()))
}

/// Build the signed cookie value for a session
pub fn sign(session_id: &SessionId, secret: &[u8]) -> AuthResult<String> {
    let session_id = session_id.to_string();

    let mut mac = mac(secret)?;
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    Ok(format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature)))
}

/// Check the signature and recover the session ID
///
/// Any malformed or forged value is `SessionInvalid`.
pub fn verify(cookie_value: &str, secret: &[u8]) -> AuthResult<SessionId> {
    let (session_id_str, signature_b64) = cookie_value
        .split_once('.')
        .ok_or(AuthError::SessionInvalid)?;

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AuthError::SessionInvalid)?;

    let mut mac = mac(secret)?;
    mac.update(session_id_str.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| AuthError::SessionInvalid)?;

    SessionId::parse_str(session_id_str).map_err(|_| AuthError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn test_sign_then_verify() {
        let id = SessionId::new();
        let cookie = sign(&id, SECRET).unwrap();
        assert!(cookie.starts_with(&id.to_string()));
        assert_eq!(verify(&cookie, SECRET).unwrap(), id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let cookie = sign(&SessionId::new(), SECRET).unwrap();
        assert!(matches!(
            verify(&cookie, b"another-secret-another-secret-xx"),
            Err(AuthError::SessionInvalid)
        ));
    }

    #[test]
    fn test_swapped_session_id_rejected() {
        let cookie = sign(&SessionId::new(), SECRET).unwrap();
        let (_, signature) = cookie.split_once('.').unwrap();
        let forged = format!("{}.{}", SessionId::new(), signature);
        assert!(matches!(verify(&forged, SECRET), Err(AuthError::SessionInvalid)));
    }

    #[test]
    fn test_malformed_values_rejected() {
        for value in ["", "no-dot", "a.b.c", "not-a-uuid.AAAA", ".", "x.!!!"] {
            assert!(
                matches!(verify(value, SECRET), Err(AuthError::SessionInvalid)),
                "{value:?} should be rejected"
            );
        }
    }
}
