//! lifecheck 에러 타입: 크레이트별 에러를 하나의 최상위 에러로 모읍니다
//!
//! 각 하위 크레이트(packager, browser, transfer)는 자체 에러 enum을 가지며,
//! `From` 구현을 통해 [`LifecheckError`]로 변환됩니다.

/// lifecheck 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LifecheckError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 패키징 CLI 호출 에러
    #[error("packager error: {0}")]
    Packager(String),

    /// 브라우저 드라이버 에러
    #[error("browser error: {0}")]
    Browser(String),

    /// 파일 전송 에러
    #[error("transfer error: {0}")]
    Transfer(String),

    /// 시나리오 기대값 불일치
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// 필수 환경변수 누락
    #[error("environment variable {name} must be set")]
    MissingEnv { name: String },
}
