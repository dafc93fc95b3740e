//! 도메인 타입: 패키징 시스템이 보고하는 앱/백업 레코드
//!
//! 모든 타입은 패키징 CLI의 JSON 출력(`inspect`, `backup list --raw`)을
//! 그대로 역직렬화합니다. 알 수 없는 필드는 무시합니다.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 배포된 앱 인스턴스 하나
///
/// install / restore / move 이후에는 부분 수정 없이 레코드 전체를 교체합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    /// 패키징 시스템이 부여한 불투명 ID
    pub id: String,
    /// 서브도메인 슬러그
    pub location: String,
    /// location + 기본 도메인
    pub fqdn: String,
    /// 패키지 매니페스트
    pub manifest: Manifest,
}

impl AppRecord {
    /// `https://<fqdn>` 뒤에 경로를 붙인 URL을 만듭니다.
    ///
    /// 빈 경로는 루트 URL을 의미합니다.
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("https://{}", self.fqdn)
        } else {
            format!("https://{}/{}", self.fqdn, path)
        }
    }
}

impl fmt::Display for AppRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) at {}", self.id, self.manifest.id, self.fqdn)
    }
}

/// 앱 매니페스트 중 스토어 재설치에 필요한 부분
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// 스토어 패키지 ID
    pub id: String,
}

/// `inspect` 결과: 현재 전체 앱 목록
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    /// 파일 전송 엔드포인트를 계산할 API 호스트
    pub api_endpoint: String,
    /// 설치된 앱 목록
    #[serde(default)]
    pub apps: Vec<AppRecord>,
}

impl Inspection {
    /// 주어진 location에 있는 앱들을 반환합니다.
    pub fn apps_at<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a AppRecord> + 'a {
        self.apps.iter().filter(move |a| a.location == location)
    }
}

/// 백업 스냅샷 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecord {
    /// 백업 ID
    pub id: String,
    /// 생성 시각 (CLI 버전에 따라 없을 수 있음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
}

impl BackupRecord {
    /// 가장 최근 백업을 고릅니다.
    ///
    /// 모든 항목에 `creation_time`이 있으면 최댓값을, 하나라도 없으면
    /// 목록이 최신순이라고 보고 첫 항목을 반환합니다.
    pub fn newest(backups: &[BackupRecord]) -> Option<&BackupRecord> {
        if !backups.is_empty() && backups.iter().all(|b| b.creation_time.is_some()) {
            // max_by_key는 동률이면 마지막 항목을 고르므로 rev()로 앞쪽을 우선합니다
            backups.iter().rev().max_by_key(|b| b.creation_time)
        } else {
            backups.first()
        }
    }
}
