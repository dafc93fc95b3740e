//! lifecheck 공통 크레이트
//!
//! 패키징 CLI가 보고하는 도메인 타입, 설정(`lifecheck.toml` + 환경변수),
//! 최상위 에러 타입을 정의합니다. 다른 모든 lifecheck 크레이트가 이 크레이트에 의존합니다.

pub mod config;
pub mod error;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, LifecheckError};

// 설정
pub use config::{
    BrowserConfig, Credentials, GeneralConfig, LifecheckConfig, PackagerConfig, ScenarioConfig,
    TransferConfig,
};

// 도메인 타입
pub use types::{AppRecord, BackupRecord, Inspection, Manifest};
