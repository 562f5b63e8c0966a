//! # Domain Entities Module
//!
//! 데이터베이스 테이블과 1:1로 대응하는 엔티티 정의입니다.
//! 모든 엔티티는 `sqlx::FromRow`로 조회 결과에서 직접 생성됩니다.
//!
//! 문자열 컬럼에 저장되는 열거형(인증 제공자, 성별, 고용 형태)은
//! [`impl_text_column!`](crate::impl_text_column) 매크로로 sqlx 인코딩/디코딩을 구현합니다.

pub mod users;
pub mod academies;
pub mod teachers;
pub mod recruitments;
pub mod references;

pub use users::*;
pub use academies::*;
pub use teachers::*;
pub use recruitments::*;
pub use references::*;

/// `from_str(&str) -> Result<Self, String>`과 `as_str()`을 가진 열거형을
/// PostgreSQL `TEXT` 컬럼으로 읽고 쓸 수 있게 합니다.
#[macro_export]
macro_rules! impl_text_column {
    ($ty:ty) => {
        impl ::sqlx::Type<::sqlx::Postgres> for $ty {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $ty {
            fn decode(value: ::sqlx::postgres::PgValueRef<'r>) -> Result<Self, ::sqlx::error::BoxDynError> {
                let raw = <&str as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(<$ty>::from_str(raw)?)
            }
        }

        impl<'q> ::sqlx::Encode<'q, ::sqlx::Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut ::sqlx::postgres::PgArgumentBuffer) -> ::sqlx::encode::IsNull {
                <&str as ::sqlx::Encode<::sqlx::Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}
