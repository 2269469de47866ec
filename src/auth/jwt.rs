use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};

use crate::error::{ClientError, ClientResult};
use crate::models::Claims;

/// Read the claims of an access token issued by the API.
///
/// The client never holds the signing secret, so the signature is not
/// verified here; the server remains the authority on every request.
pub fn read_claims(token: &str) -> ClientResult<Claims> {
    let header = decode_header(token).map_err(|e| ClientError::Session(e.to_string()))?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation.algorithms = vec![
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
        Algorithm::ES256,
    ];

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| ClientError::Session(e.to_string()))
}

#[cfg(test)]
pub(crate) fn issue_test_token(claims: &Claims) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .expect("encode test token")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn claims_are_read_without_secret() {
        let employee_id = Uuid::new_v4();
        let token = issue_test_token(&Claims {
            sub: "dewi@example.com".into(),
            exp: 4_102_444_800,
            role: "hr".into(),
            user_id: None,
            employee_id: Some(employee_id),
            company_id: None,
        });

        let claims = read_claims(&token).unwrap();
        assert_eq!(claims.sub, "dewi@example.com");
        assert_eq!(claims.employee_id, Some(employee_id));
    }

    #[test]
    fn garbage_token_is_a_session_error() {
        assert!(matches!(read_claims("not-a-jwt"), Err(ClientError::Session(_))));
    }
}
