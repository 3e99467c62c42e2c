//! Extension Loader - 확장 발견 및 로드
//!
//! 로더는 후보마다 (이름, 결과) 쌍을 돌려준다. 후보 하나가 깨져도
//! 로더 전체가 실패하지 않는다.

use super::builtin::{SampleExtension, TrigExtension};
use super::traits::ExtensionCommand;
use rcalc_foundation::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// 확장 생성자
type Factory = fn() -> Arc<dyn ExtensionCommand>;

fn make_sample() -> Arc<dyn ExtensionCommand> {
    Arc::new(SampleExtension)
}

fn make_trig() -> Arc<dyn ExtensionCommand> {
    Arc::new(TrigExtension)
}

/// 컴파일 타임 확장 생성자 테이블 (테이블 순서 = 발견 순서)
const FACTORIES: &[(&str, Factory)] = &[("sample_plugin", make_sample), ("trig", make_trig)];

/// 이름으로 생성자 조회
fn factory(name: &str) -> Option<Factory> {
    FACTORIES
        .iter()
        .find(|(factory_name, _)| *factory_name == name)
        .map(|(_, f)| *f)
}

// ============================================================================
// ExtensionLoader - 로더 인터페이스
// ============================================================================

/// 발견된 확장 후보
pub struct DiscoveredExtension {
    /// 후보 이름 (실패 시에도 로그용으로 유지)
    pub name: String,

    /// 로드 결과
    pub outcome: Result<Arc<dyn ExtensionCommand>>,
}

/// 확장 로더 트레이트
///
/// 후보 하나의 실패가 나머지 발견을 중단시키면 안 된다.
pub trait ExtensionLoader {
    /// 로그에 표시할 소스 설명
    fn source(&self) -> String;

    /// 모든 후보 발견
    fn discover(&self) -> Vec<DiscoveredExtension>;
}

// ============================================================================
// BuiltinLoader - 컴파일 타임 테이블
// ============================================================================

/// 빌트인 확장 로더 - 생성자 테이블의 모든 확장을 돌려준다
pub struct BuiltinLoader;

impl ExtensionLoader for BuiltinLoader {
    fn source(&self) -> String {
        "builtin".into()
    }

    fn discover(&self) -> Vec<DiscoveredExtension> {
        FACTORIES
            .iter()
            .map(|(name, f)| DiscoveredExtension {
                name: name.to_string(),
                outcome: Ok(f()),
            })
            .collect()
    }
}

// ============================================================================
// ManifestLoader - 매니페스트 디렉토리 스캔
// ============================================================================

/// 확장 매니페스트 (<dir>/*.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionManifest {
    /// 생성자 테이블에서 찾을 확장 이름
    pub command: String,

    /// 비활성화된 확장은 건너뛴다
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// 매니페스트 디렉토리 기반 확장 로더
pub struct ManifestLoader {
    dir: PathBuf,
}

impl ManifestLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 매니페스트 파일 하나 로드
    fn load_manifest(path: &Path) -> Result<ExtensionManifest> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 파일 하나를 후보로 변환
    fn discover_file(&self, path: &Path) -> Option<DiscoveredExtension> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let manifest = match Self::load_manifest(path) {
            Ok(manifest) => manifest,
            Err(e) => {
                return Some(DiscoveredExtension {
                    name: stem,
                    outcome: Err(Error::extension_load(
                        path.display().to_string(),
                        e.to_string(),
                    )),
                });
            }
        };

        if !manifest.enabled {
            debug!("Extension {} is disabled, skipping", manifest.command);
            return None;
        }

        let outcome = match factory(&manifest.command) {
            Some(f) => Ok(f()),
            None => Err(Error::extension_load(
                manifest.command.clone(),
                "no such extension factory",
            )),
        };

        Some(DiscoveredExtension {
            name: manifest.command,
            outcome,
        })
    }
}

impl ExtensionLoader for ManifestLoader {
    fn source(&self) -> String {
        self.dir.display().to_string()
    }

    fn discover(&self) -> Vec<DiscoveredExtension> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                // 디렉토리가 없어도 시작은 계속된다
                warn!(
                    "Extensions directory {} not accessible: {}",
                    self.dir.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut discovered = Vec::new();

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map_or(false, |e| e == "json") {
                debug!("Found extension manifest: {}", path.display());
                if let Some(candidate) = self.discover_file(&path) {
                    discovered.push(candidate);
                }
            }
        }

        discovered
    }
}
