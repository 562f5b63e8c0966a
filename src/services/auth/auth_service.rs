//! # 인증 서비스
//!
//! 로컬 가입/로그인, 소셜 로그인, 토큰 갱신, 로그아웃과 이메일 인증 코드를 담당합니다.
//!
//! ## 로컬 가입 흐름
//!
//! ```text
//! POST /auth/email/code    ─► 6자리 코드 저장 (300초) + 메일 발송
//! POST /auth/email/verify  ─► 코드 확인, 인증 완료 표시 (1800초)
//! POST /auth/signup        ─► 인증 완료 표시 확인 ─► bcrypt 해시 ─► 사용자 생성 ─► 토큰 쌍
//! ```
//!
//! ## 소셜 로그인 계정 정책
//!
//! | 상황 | 결과 |
//! |------|------|
//! | (제공자, 소셜 키) 사용자가 있음 | 로그인 |
//! | 같은 이메일의 다른 방식 계정이 있음 | `ConflictError` (자동 연동하지 않음) |
//! | 그 외 | 신규 가입 (`is_new_user = true`) |

use std::sync::Arc;
use uuid::Uuid;
use crate::clients::mail::{verification_mail_body, MailClient};
use crate::clients::social::SocialClient;
use crate::config::{AuthProvider, PasswordConfig, VerificationConfig};
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::tokens::AuthResponse;
use crate::domain::dto::users::{LoginRequest, SignupRequest, UserResponse};
use crate::domain::entities::users::{NewUser, User};
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenType;
use crate::repositories::sessions::SessionRepository;
use crate::repositories::users::UserRepository;
use crate::services::auth::TokenService;

pub struct AuthService {
    user_repo: Arc<UserRepository>,
    session_repo: Arc<SessionRepository>,
    token_service: Arc<TokenService>,
    social_client: Arc<SocialClient>,
    mail_client: Arc<MailClient>,
}

crate::register_service!(AuthService {
    user_repo,
    session_repo,
    token_service,
    social_client,
    mail_client,
});

/// 6자리 숫자 인증 코드 (앞자리 0 포함)
pub fn generate_verification_code() -> String {
    format!("{:06}", Uuid::new_v4().as_u128() % 1_000_000)
}

/// 누적 오입력 횟수로 남은 시도 횟수를 계산합니다. 다 소진했으면 `None`입니다.
pub fn remaining_code_attempts(failures: u64, max_attempts: u64) -> Option<u64> {
    max_attempts.checked_sub(failures).filter(|left| *left > 0)
}

impl AuthService {
    pub async fn send_email_code(&self, email: &str) -> AppResult<()> {
        let email = email.trim().to_lowercase();

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AppError::ConflictError("이미 가입된 이메일입니다".to_string()));
        }

        let code = generate_verification_code();
        self.session_repo.save_email_code(&email, &code).await?;
        self.mail_client
            .send(
                &email,
                "[요가 마켓플레이스] 이메일 인증 코드",
                verification_mail_body(&code, VerificationConfig::code_ttl_secs()),
            )
            .await?;

        log::info!("이메일 인증 코드 발송 - email: {}", email);
        Ok(())
    }

    pub async fn verify_email_code(&self, email: &str, code: &str) -> AppResult<()> {
        let stored = self
            .session_repo
            .find_email_code(email)
            .await?
            .ok_or_else(|| AppError::ValidationError("인증 코드가 만료되었거나 존재하지 않습니다".to_string()))?;

        if stored != code.trim() {
            let failures = self.session_repo.record_email_code_failure(email).await?;
            return match remaining_code_attempts(failures, VerificationConfig::max_code_attempts()) {
                Some(left) => {
                    log::warn!("이메일 인증 코드 불일치 - email: {}, failures: {}", email, failures);
                    Err(AppError::ValidationError(format!(
                        "인증 코드가 일치하지 않습니다 (남은 시도 {}회)",
                        left
                    )))
                }
                None => {
                    self.session_repo.discard_email_code(email).await?;
                    log::warn!("이메일 인증 코드 시도 초과로 폐기 - email: {}", email);
                    Err(AppError::ValidationError(
                        "인증 시도 횟수를 초과했습니다. 인증 코드를 다시 요청해주세요".to_string(),
                    ))
                }
            };
        }

        self.session_repo.mark_email_verified(email).await?;
        log::info!("이메일 인증 완료 - email: {}", email);
        Ok(())
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        if VerificationConfig::email_verification_required() && !self.session_repo.is_email_verified(&email).await? {
            return Err(AppError::ValidationError("이메일 인증을 먼저 완료해주세요".to_string()));
        }

        let password_hash = bcrypt::hash(&request.password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        let user = self
            .user_repo
            .create(NewUser::local(&email, &request.name, request.phone_number, password_hash))
            .await?;

        if let Err(e) = self.session_repo.consume_email_verified(&email).await {
            log::warn!("인증 완료 표시 삭제 실패 - email: {}, error: {}", email, e);
        }

        log::info!("로컬 회원가입 완료 - user_id: {}", user.id);
        self.issue(user, true).await
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let invalid = || AppError::AuthenticationError("잘못된 이메일 또는 비밀번호입니다".to_string());

        let user = self.user_repo.find_by_email(&request.email).await?.ok_or_else(invalid)?;

        let Some(password_hash) = user.password_hash.as_deref().filter(|_| user.is_local()) else {
            log::warn!("소셜 계정 비밀번호 로그인 시도 - user_id: {}", user.id);
            return Err(AppError::AuthenticationError(format!(
                "{} 계정입니다. 해당 소셜 로그인을 이용해주세요",
                user.auth_provider
            )));
        };

        let is_valid = bcrypt::verify(&request.password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;
        if !is_valid {
            log::warn!("로그인 실패 - user_id: {}", user.id);
            return Err(invalid());
        }

        self.user_repo.touch_last_login(user.id).await?;
        log::info!("로그인 성공 - user_id: {}", user.id);
        self.issue(user, false).await
    }

    pub async fn social_login(&self, provider: AuthProvider, access_token: &str) -> AppResult<AuthResponse> {
        if !provider.is_social() {
            return Err(AppError::ValidationError(format!("지원하지 않는 소셜 로그인입니다: {}", provider)));
        }

        let profile = self.social_client.fetch_profile(provider, access_token).await?;

        if let Some(user) = self.user_repo.find_by_social_key(provider, &profile.social_key).await? {
            self.user_repo.touch_last_login(user.id).await?;
            log::info!("소셜 로그인 성공 - provider: {}, user_id: {}", provider, user.id);
            return self.issue(user, false).await;
        }

        if let Some(ref email) = profile.email {
            if let Some(existing) = self.user_repo.find_by_email(email).await? {
                log::warn!(
                    "소셜 가입 이메일 충돌 - provider: {}, existing_provider: {}",
                    provider,
                    existing.auth_provider
                );
                return Err(AppError::ConflictError(format!(
                    "이미 {} 방식으로 가입된 이메일입니다",
                    existing.auth_provider
                )));
            }
        }

        let user = self.user_repo.create(NewUser::social(&profile)).await?;
        log::info!("소셜 회원가입 완료 - provider: {}, user_id: {}", provider, user.id);
        self.issue(user, true).await
    }

    /// 리프레시 토큰으로 토큰 쌍을 교체합니다.
    ///
    /// 기존 세션 마커는 삭제되고 새 세션 ID로 재발급되므로 같은 리프레시 토큰은
    /// 한 번만 쓸 수 있습니다. 역할이 바뀌었으면 새 토큰에 반영됩니다.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.token_service.verify_token(refresh_token, TokenType::Refresh)?;
        let user_id = claims
            .user_id()
            .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()))?;

        if !self.session_repo.revoke_session(user_id, &claims.sid).await? {
            log::warn!("폐기된 세션으로 갱신 시도 - user_id: {}, sid: {}", user_id, claims.sid);
            return Err(AppError::AuthenticationError("만료되었거나 폐기된 세션입니다".to_string()));
        }

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("사용자를 찾을 수 없습니다".to_string()))?;

        self.issue(user, false).await
    }

    pub async fn logout(&self, user: &AuthenticatedUser) -> AppResult<()> {
        self.session_repo.revoke_session(user.user_id, &user.session_id).await?;
        log::info!("로그아웃 - user_id: {}", user.user_id);
        Ok(())
    }

    async fn issue(&self, user: User, is_new_user: bool) -> AppResult<AuthResponse> {
        let session_id = self.token_service.new_session_id();
        self.session_repo
            .create_session(user.id, &session_id, user.auth_provider)
            .await?;
        let tokens = self.token_service.generate_token_pair(&user, &session_id)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            tokens,
            is_new_user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_verification_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_remaining_code_attempts_counts_down() {
        assert_eq!(remaining_code_attempts(1, 5), Some(4));
        assert_eq!(remaining_code_attempts(4, 5), Some(1));
    }

    #[test]
    fn test_code_is_discarded_once_attempts_are_used_up() {
        assert_eq!(remaining_code_attempts(5, 5), None);
        assert_eq!(remaining_code_attempts(9, 5), None);
        assert_eq!(remaining_code_attempts(1, 1), None);
    }

    #[test]
    fn test_full_guess_space_is_not_reachable() {
        let max = VerificationConfig::max_code_attempts();
        let allowed = (1..=1_000_000u64)
            .take_while(|failures| remaining_code_attempts(*failures, max).is_some())
            .count() as u64;
        assert_eq!(allowed, max - 1);
        assert!(allowed < 1_000_000);
    }
}
