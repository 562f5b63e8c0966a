//! JWT 토큰 관리 서비스 구현
//!
//! HS256 서명의 액세스/리프레시 토큰을 발급하고 검증합니다.
//! 두 토큰은 같은 클레임 구조를 쓰며 `token_type`으로 구분되므로,
//! 액세스 토큰 자리에 리프레시 토큰을 넣는 요청은 거부됩니다.
//!
//! ```text
//! 로그인 ──► sid 생성 ──► session:{user_id}:{sid} 저장 ──► TokenPair { access, refresh }
//! 갱신   ──► refresh 검증 ──► 세션 마커 확인/폐기 ──► 새 sid로 재발급
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use crate::config::JwtConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::User;
use crate::domain::models::token::{TokenClaims, TokenPair, TokenType};

pub struct TokenService;

crate::register_service!(TokenService, || TokenService);

impl TokenService {
    /// 새 리프레시 세션 ID
    pub fn new_session_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn generate_token(&self, user: &User, session_id: &str, token_type: TokenType) -> AppResult<String> {
        let now = Utc::now();
        let expiration = match token_type {
            TokenType::Access => now + Duration::hours(JwtConfig::expiration_hours()),
            TokenType::Refresh => now + Duration::days(JwtConfig::refresh_expiration_days()),
        };

        let claims = TokenClaims {
            sub: user.id.to_string(),
            sid: session_id.to_string(),
            roles: user.roles.clone(),
            auth_provider: user.auth_provider,
            token_type,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(JwtConfig::secret().as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    pub fn generate_token_pair(&self, user: &User, session_id: &str) -> AppResult<TokenPair> {
        let access_token = self.generate_token(user, session_id, TokenType::Access)?;
        let refresh_token = self.generate_token(user, session_id, TokenType::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: JwtConfig::expiration_hours() * 3600,
        })
    }

    /// 서명과 만료를 검증하고, 토큰 종류가 `expected`와 같은지 확인합니다.
    pub fn verify_token(&self, token: &str, expected: TokenType) -> AppResult<TokenClaims> {
        let decoding_key = DecodingKey::from_secret(JwtConfig::secret().as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        let claims = decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::AuthenticationError("토큰이 만료되었습니다".to_string()),
                _ => AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()),
            })?;

        if claims.token_type != expected {
            return Err(AppError::AuthenticationError("토큰 종류가 올바르지 않습니다".to_string()));
        }
        if claims.user_id().is_none() {
            return Err(AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()));
        }

        Ok(claims)
    }

    /// `Authorization: Bearer <token>` 헤더에서 토큰을 꺼냅니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        let (scheme, token) = auth_header
            .trim()
            .split_once(' ')
            .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))?;

        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()));
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;

    fn user() -> User {
        User {
            id: 42,
            email: "yogi@example.com".to_string(),
            password_hash: None,
            name: "요기".to_string(),
            phone_number: None,
            auth_provider: AuthProvider::Local,
            social_key: None,
            roles: vec!["user".to_string(), "academy".to_string()],
            profile_image_url: None,
            is_email_verified: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_token_pair_round_trip() {
        let service = TokenService;
        let sid = service.new_session_id();
        let pair = service.generate_token_pair(&user(), &sid).unwrap();

        let access = service.verify_token(&pair.access_token, TokenType::Access).unwrap();
        assert_eq!(access.user_id(), Some(42));
        assert_eq!(access.sid, sid);
        assert_eq!(access.roles, vec!["user", "academy"]);
        assert_eq!(access.auth_provider, AuthProvider::Local);

        let refresh = service.verify_token(&pair.refresh_token, TokenType::Refresh).unwrap();
        assert_eq!(refresh.sid, sid);
        assert!(refresh.exp > access.exp);
        assert_eq!(pair.token_type, "Bearer");
    }

    #[test]
    fn test_token_type_mismatch_is_rejected() {
        let service = TokenService;
        let pair = service.generate_token_pair(&user(), "sid").unwrap();

        let err = service.verify_token(&pair.refresh_token, TokenType::Access).unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));
        assert!(service.verify_token(&pair.access_token, TokenType::Refresh).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = TokenService;
        let pair = service.generate_token_pair(&user(), "sid").unwrap();
        let tampered = format!("{}x", pair.access_token);

        let err = service.verify_token(&tampered, TokenType::Access).unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));
        assert!(service.verify_token("not.a.jwt", TokenType::Access).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = TokenService;
        assert_eq!(service.extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(service.extract_bearer_token("bearer  abc").unwrap(), "abc");
        assert!(service.extract_bearer_token("Basic dXNlcjpwYXNz").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
        assert!(service.extract_bearer_token("abc.def.ghi").is_err());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let service = TokenService;
        assert_ne!(service.new_session_id(), service.new_session_id());
    }
}
