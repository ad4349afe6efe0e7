use crate::error::DispoError;
use actix_web::HttpRequest;
use chrono::{DateTime, Duration, Utc};
use dispo_domain::{User, ID};
use dispo_infra::DispoContext;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

const TOKEN_VALIDITY_HOURS: i64 = 24;
const CREATE_USER_SECRET_HEADER: &str = "dispo-create-user-secret";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Id of the admin `User`
    sub: String,
    /// Expiry as unix timestamp in seconds
    exp: i64,
    iat: i64,
}

/// Issues the bearer token handed out to an admin after signing in
pub fn create_token(user: &User, now: DateTime<Utc>, secret: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user.id.as_string(),
        exp: (now + Duration::hours(TOKEN_VALIDITY_HOURS)).timestamp(),
        iat: now.timestamp(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

fn parse_authtoken_header(token_header_value: &str) -> Option<&str> {
    let mut parts = token_header_value.splitn(2, ' ');
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => {
            Some(token.trim())
        }
        _ => None,
    }
}

fn decode_token(token: &str, secret: &str, now: DateTime<Utc>) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked against the context clock below
    validation.validate_exp = false;
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        warn!("Unable to decode admin token: {:?}", e);
    })
    .ok()?
    .claims;
    if claims.exp < now.timestamp() {
        return None;
    }
    Some(claims)
}

/// Resolves the admin `User` behind the `Authorization: Bearer` header
pub async fn protect_admin_route(
    req: &HttpRequest,
    ctx: &DispoContext,
) -> Result<User, DispoError> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(parse_authtoken_header)
        .ok_or_else(|| {
            DispoError::Unauthorized(
                "Expected a bearer token in the `Authorization` header".into(),
            )
        })?;
    let claims = decode_token(token, &ctx.config.jwt_secret, ctx.sys.now())
        .ok_or_else(|| DispoError::Unauthorized("Malformed or expired token".into()))?;
    let user_id: ID = claims
        .sub
        .parse()
        .map_err(|_| DispoError::Unauthorized("Malformed token subject".into()))?;
    ctx.repos
        .users
        .find(&user_id)
        .await
        .ok_or_else(|| DispoError::Unauthorized("The admin behind this token no longer exists".into()))
}

/// Registering admins requires the secret code from the configuration
pub fn protect_create_user_route(req: &HttpRequest, ctx: &DispoContext) -> Result<(), DispoError> {
    let code = req
        .headers()
        .get(CREATE_USER_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());
    match code {
        Some(code) if code == ctx.config.create_user_secret_code => Ok(()),
        _ => Err(DispoError::Unauthorized(format!(
            "Invalid or missing `{}` header",
            CREATE_USER_SECRET_HEADER
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;

    fn admin(ctx: &DispoContext) -> User {
        User::new("admin@example.com".into(), None, "password", ctx.sys.now()).unwrap()
    }

    #[actix_web::test]
    async fn it_accepts_valid_tokens() {
        let ctx = DispoContext::create_inmemory();
        let user = admin(&ctx);
        ctx.repos.users.insert(&user).await.unwrap();

        let token = create_token(&user, ctx.sys.now(), &ctx.config.jwt_secret).unwrap();
        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        let res = protect_admin_route(&req, &ctx).await;
        assert_eq!(res.unwrap().id, user.id);
    }

    #[actix_web::test]
    async fn it_rejects_expired_and_forged_tokens() {
        let ctx = DispoContext::create_inmemory();
        let user = admin(&ctx);
        ctx.repos.users.insert(&user).await.unwrap();

        let issued = ctx.sys.now() - Duration::hours(TOKEN_VALIDITY_HOURS + 1);
        let expired = create_token(&user, issued, &ctx.config.jwt_secret).unwrap();
        let forged = create_token(&user, ctx.sys.now(), "not-the-secret").unwrap();
        for token in vec![expired, forged, "garbage".to_string()] {
            let req = TestRequest::default()
                .insert_header(("Authorization", format!("Bearer {}", token)))
                .to_http_request();
            let res = protect_admin_route(&req, &ctx).await;
            assert!(matches!(res, Err(DispoError::Unauthorized(_))));
        }

        let req = TestRequest::default().to_http_request();
        assert!(protect_admin_route(&req, &ctx).await.is_err());
    }

    #[actix_web::test]
    async fn it_checks_create_user_secret() {
        let ctx = DispoContext::create_inmemory();
        let req = TestRequest::default()
            .insert_header((
                CREATE_USER_SECRET_HEADER,
                ctx.config.create_user_secret_code.clone(),
            ))
            .to_http_request();
        assert!(protect_create_user_route(&req, &ctx).is_ok());

        let req = TestRequest::default()
            .insert_header((CREATE_USER_SECRET_HEADER, "wrong"))
            .to_http_request();
        assert!(protect_create_user_route(&req, &ctx).is_err());
    }

    #[test]
    fn it_parses_bearer_header() {
        assert_eq!(parse_authtoken_header("Bearer abc"), Some("abc"));
        assert_eq!(parse_authtoken_header("bearer abc "), Some("abc"));
        assert_eq!(parse_authtoken_header("Basic abc"), None);
        assert_eq!(parse_authtoken_header("Bearer"), None);
    }
}
