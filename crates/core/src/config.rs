//! 설정 관리: lifecheck.toml 파싱, 환경변수 오버라이드, 검증
//!
//! [`LifecheckConfig`]는 시나리오 실행에 필요한 모든 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LIFECHECK_SCENARIO_LOCATION=test` 형식)
//! 3. 설정 파일 (`lifecheck.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! 자격 증명(`USERNAME`, `PASSWORD`)은 파일에 저장하지 않고 [`Credentials::from_env`]로만 읽습니다.
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), lifecheck_core::error::LifecheckError> {
//! use lifecheck_core::config::{Credentials, LifecheckConfig};
//!
//! let config = LifecheckConfig::load("lifecheck.toml").await?;
//! let credentials = Credentials::from_env()?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LifecheckError};

/// 자격 증명 환경변수 이름
pub const USERNAME_ENV: &str = "USERNAME";
/// 자격 증명 환경변수 이름
pub const PASSWORD_ENV: &str = "PASSWORD";

/// lifecheck 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifecheckConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 패키징 CLI 설정
    #[serde(default)]
    pub packager: PackagerConfig,
    /// 시나리오 설정
    #[serde(default)]
    pub scenario: ScenarioConfig,
    /// 브라우저 드라이버 설정
    #[serde(default)]
    pub browser: BrowserConfig,
    /// 파일 전송 설정
    #[serde(default)]
    pub transfer: TransferConfig,
}

impl LifecheckConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LifecheckError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본값에서 시작합니다.
    ///
    /// `--config`를 명시하지 않은 `run` 명령처럼 설정 파일이 선택 사항인 경우에 사용합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, LifecheckError> {
        let mut config = match Self::from_file(path.as_ref()).await {
            Ok(config) => config,
            Err(LifecheckError::Config(ConfigError::FileNotFound { path })) => {
                warn!(path = %path, "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LifecheckError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LifecheckError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LifecheckError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LifecheckError> {
        toml::from_str(toml_str).map_err(|e| {
            LifecheckError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LIFECHECK_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LIFECHECK_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LIFECHECK_GENERAL_LOG_FORMAT");

        // Packager
        override_string(&mut self.packager.binary, "LIFECHECK_PACKAGER_BINARY");
        override_string(&mut self.packager.package_dir, "LIFECHECK_PACKAGER_PACKAGE_DIR");
        override_opt_string(&mut self.packager.appstore_id, "LIFECHECK_PACKAGER_APPSTORE_ID");

        // Scenario
        override_string(&mut self.scenario.location, "LIFECHECK_SCENARIO_LOCATION");
        override_opt_string(
            &mut self.scenario.moved_location,
            "LIFECHECK_SCENARIO_MOVED_LOCATION",
        );
        override_bool(&mut self.scenario.build, "LIFECHECK_SCENARIO_BUILD");
        override_string(
            &mut self.scenario.welcome_marker,
            "LIFECHECK_SCENARIO_WELCOME_MARKER",
        );
        override_string(
            &mut self.scenario.upload_marker,
            "LIFECHECK_SCENARIO_UPLOAD_MARKER",
        );
        override_string(
            &mut self.scenario.feature_marker,
            "LIFECHECK_SCENARIO_FEATURE_MARKER",
        );

        // Browser
        override_string(
            &mut self.browser.webdriver_url,
            "LIFECHECK_BROWSER_WEBDRIVER_URL",
        );
        override_string(&mut self.browser.browser_name, "LIFECHECK_BROWSER_BROWSER_NAME");
        override_bool(&mut self.browser.headless, "LIFECHECK_BROWSER_HEADLESS");
        override_u64(&mut self.browser.timeout_ms, "LIFECHECK_BROWSER_TIMEOUT_MS");
        override_u64(
            &mut self.browser.poll_interval_ms,
            "LIFECHECK_BROWSER_POLL_INTERVAL_MS",
        );
        override_string(
            &mut self.browser.driver_command,
            "LIFECHECK_BROWSER_DRIVER_COMMAND",
        );
        override_csv(&mut self.browser.driver_args, "LIFECHECK_BROWSER_DRIVER_ARGS");
        override_u64(
            &mut self.browser.startup_timeout_ms,
            "LIFECHECK_BROWSER_STARTUP_TIMEOUT_MS",
        );

        // Transfer
        override_u16(&mut self.transfer.port, "LIFECHECK_TRANSFER_PORT");
        override_string(&mut self.transfer.remote_dir, "LIFECHECK_TRANSFER_REMOTE_DIR");
        override_string(&mut self.transfer.artifact, "LIFECHECK_TRANSFER_ARTIFACT");
        override_opt_string(&mut self.transfer.known_hosts, "LIFECHECK_TRANSFER_KNOWN_HOSTS");
        override_string(
            &mut self.transfer.sshpass_binary,
            "LIFECHECK_TRANSFER_SSHPASS_BINARY",
        );
        override_string(&mut self.transfer.sftp_binary, "LIFECHECK_TRANSFER_SFTP_BINARY");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LifecheckError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        if self.packager.binary.trim().is_empty() {
            return Err(invalid("packager.binary", "must not be empty".to_owned()));
        }

        validate_location("scenario.location", &self.scenario.location)?;
        if let Some(moved) = &self.scenario.moved_location {
            validate_location("scenario.moved_location", moved)?;
            if *moved == self.scenario.location {
                return Err(invalid(
                    "scenario.moved_location",
                    "must differ from scenario.location".to_owned(),
                ));
            }
        }

        for (field, marker) in [
            ("scenario.welcome_marker", &self.scenario.welcome_marker),
            ("scenario.upload_marker", &self.scenario.upload_marker),
            ("scenario.feature_marker", &self.scenario.feature_marker),
        ] {
            if marker.is_empty() {
                return Err(invalid(field, "must not be empty".to_owned()));
            }
        }

        if !self.browser.webdriver_url.starts_with("http://")
            && !self.browser.webdriver_url.starts_with("https://")
        {
            return Err(invalid(
                "browser.webdriver_url",
                "must be an http(s) URL".to_owned(),
            ));
        }
        if self.browser.timeout_ms == 0 {
            return Err(invalid("browser.timeout_ms", "must be > 0".to_owned()));
        }
        if self.browser.poll_interval_ms == 0 {
            return Err(invalid("browser.poll_interval_ms", "must be > 0".to_owned()));
        }
        if self.browser.startup_timeout_ms == 0 {
            return Err(invalid("browser.startup_timeout_ms", "must be > 0".to_owned()));
        }

        if self.transfer.port == 0 {
            return Err(invalid("transfer.port", "must be > 0".to_owned()));
        }
        if self.transfer.artifact.trim().is_empty() {
            return Err(invalid("transfer.artifact", "must not be empty".to_owned()));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> LifecheckError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    }
    .into()
}

fn validate_location(field: &str, location: &str) -> Result<(), LifecheckError> {
    if location.is_empty() {
        return Err(invalid(field, "must not be empty".to_owned()));
    }
    let ok = location
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.');
    if !ok || location.starts_with('-') || location.ends_with('-') {
        return Err(invalid(
            field,
            "must be a subdomain slug ([a-z0-9-.])".to_owned(),
        ));
    }
    Ok(())
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 패키징 CLI 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagerConfig {
    /// CLI 실행 파일
    pub binary: String,
    /// 패키지 디렉토리 (CLI 작업 디렉토리)
    pub package_dir: String,
    /// 스토어 설치에 사용할 패키지 ID (lifecycle 시나리오가 알아내지 못한 경우)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appstore_id: Option<String>,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            binary: "cloudron".to_owned(),
            package_dir: ".".to_owned(),
            appstore_id: None,
        }
    }
}

/// 시나리오 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// 설치 location
    pub location: String,
    /// 이동할 location (없으면 `<location>2`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved_location: Option<String>,
    /// lifecycle 시나리오 앞에 build 단계를 넣을지 여부
    pub build: bool,
    /// 환영 페이지에 있어야 하는 문구
    pub welcome_marker: String,
    /// 업로드한 파일이 출력하는 문구
    pub upload_marker: String,
    /// 기능 표시 링크 문구
    pub feature_marker: String,
}

impl ScenarioConfig {
    /// 이동 대상 location을 반환합니다.
    pub fn moved_location(&self) -> String {
        self.moved_location
            .clone()
            .unwrap_or_else(|| format!("{}2", self.location))
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            location: "test".to_owned(),
            moved_location: None,
            build: false,
            welcome_marker: "Cloudron LAMP App".to_owned(),
            upload_marker: "this works".to_owned(),
            feature_marker: "ionCube Loader".to_owned(),
        }
    }
}

/// 브라우저 드라이버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// WebDriver 서버 URL
    pub webdriver_url: String,
    /// 브라우저 이름 (W3C `browserName`)
    pub browser_name: String,
    /// 헤드리스 실행 여부
    pub headless: bool,
    /// 요소 대기 타임아웃 (밀리초, 단계별)
    pub timeout_ms: u64,
    /// 폴링 간격 (밀리초)
    pub poll_interval_ms: u64,
    /// 로컬 드라이버 서비스 실행 파일 (빈 문자열이면 실행하지 않음)
    pub driver_command: String,
    /// 드라이버 서비스 인자
    pub driver_args: Vec<String>,
    /// 드라이버 서비스 준비 대기 타임아웃 (밀리초)
    pub startup_timeout_ms: u64,
}

impl BrowserConfig {
    /// 요소 대기 타임아웃
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// 폴링 간격
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// 드라이버 서비스 준비 대기 타임아웃
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_owned(),
            browser_name: "chrome".to_owned(),
            headless: true,
            timeout_ms: 50_000,
            poll_interval_ms: 250,
            driver_command: "chromedriver".to_owned(),
            driver_args: vec!["--port=4444".to_owned()],
            startup_timeout_ms: 10_000,
        }
    }
}

/// 파일 전송 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// SFTP 포트
    pub port: u16,
    /// 업로드 대상 원격 디렉토리
    pub remote_dir: String,
    /// 업로드할 로컬 파일
    pub artifact: String,
    /// known_hosts 파일 경로 (없으면 `~/.ssh/known_hosts`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_hosts: Option<String>,
    /// sshpass 실행 파일
    pub sshpass_binary: String,
    /// sftp 실행 파일
    pub sftp_binary: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            port: 222,
            remote_dir: "public".to_owned(),
            artifact: "assets/test.php".to_owned(),
            known_hosts: None,
            sshpass_binary: "sshpass".to_owned(),
            sftp_binary: "sftp".to_owned(),
        }
    }
}

/// 파일 전송 자격 증명
///
/// `Debug` 출력에서 비밀번호는 가려집니다.
#[derive(Clone)]
pub struct Credentials {
    /// 사용자 이름
    pub username: String,
    /// 비밀번호
    pub password: String,
}

impl Credentials {
    /// `USERNAME`, `PASSWORD` 환경변수에서 자격 증명을 읽습니다.
    ///
    /// 둘 중 하나라도 없거나 비어 있으면 시나리오를 만들기 전에 실패해야 합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 임의의 조회 함수로 자격 증명을 읽습니다.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingEnv {
                    name: name.to_owned(),
                })
        };
        Ok(Self {
            username: read(USERNAME_ENV)?,
            password: read(PASSWORD_ENV)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***REDACTED***")
            .finish()
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_opt_string(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = if val.is_empty() { None } else { Some(val) };
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_u16(target: &mut u16, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u16>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u16 from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}
