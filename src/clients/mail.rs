//! SMTP 메일 발송
//!
//! `SMTP_HOST`가 없으면 전송 대신 로그로 남깁니다 (로컬 개발용).

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use crate::config::MailConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};

pub struct MailClient {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

crate::register_service!(MailClient, MailClient::from_env);

impl MailClient {
    pub fn from_env() -> Self {
        let transport = MailConfig::smtp_host().and_then(|host| {
            match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host) {
                Ok(builder) => Some(
                    builder
                        .port(MailConfig::smtp_port())
                        .credentials(Credentials::new(MailConfig::smtp_username(), MailConfig::smtp_password()))
                        .build(),
                ),
                Err(e) => {
                    log::error!("SMTP 설정 오류, 메일은 로그로만 기록됩니다: {}", e);
                    None
                }
            }
        });

        if transport.is_none() {
            log::warn!("SMTP_HOST not set, mails will be logged instead of sent");
        }

        Self {
            transport,
            from: MailConfig::from_address(),
        }
    }

    pub async fn send(&self, to: &str, subject: &str, body: String) -> AppResult<()> {
        let Some(ref transport) = self.transport else {
            log::info!("[mail] to: {}, subject: {}\n{}", to, subject, body);
            return Ok(());
        };

        let from: Mailbox = self
            .from
            .parse()
            .context("발신 주소 오류")?;
        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|_| AppError::ValidationError("유효한 이메일 주소를 입력해주세요".to_string()))?;

        let message = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("메일 생성 실패")?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 발송 실패: {}", e)))?;

        log::info!("메일 발송 완료 - to: {}, subject: {}", to, subject);
        Ok(())
    }
}

/// 인증 코드 메일 본문
pub fn verification_mail_body(code: &str, ttl_secs: u64) -> String {
    format!(
        "요가 마켓플레이스 이메일 인증 코드입니다.\n\n인증 코드: {}\n\n{}분 안에 입력해주세요.",
        code,
        (ttl_secs / 60).max(1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_mail_body() {
        let body = verification_mail_body("012345", 300);
        assert!(body.contains("012345"));
        assert!(body.contains("5분"));
    }
}
