//! 인증 미들웨어 동작 모드와 역할 요구 사항

#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 유효한 액세스 토큰이 없으면 401
    Required,
    /// 토큰이 있으면 사용자 정보를 주입하고, 없어도 요청을 진행
    Optional,
}

#[derive(Debug, Clone)]
pub enum RequiredRole {
    Single(String),
    /// 나열된 역할 중 하나 이상
    Any(Vec<String>),
}

impl RequiredRole {
    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        match self {
            RequiredRole::Single(required_role) => user_roles.contains(required_role),
            RequiredRole::Any(required_roles) => {
                required_roles.iter().any(|role| user_roles.contains(role))
            }
        }
    }
}
