//! Extension Registry - 확장 명령 저장소

use super::loader::ExtensionLoader;
use super::traits::ExtensionCommand;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 확장 명령 레지스트리 - 발견 단계에서 채워지고 이후 읽기 전용
pub struct ExtensionRegistry {
    /// 확장 저장소 (이름 -> 인스턴스)
    commands: HashMap<String, Arc<dyn ExtensionCommand>>,
}

impl ExtensionRegistry {
    /// 새 레지스트리 생성
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// 확장 등록
    ///
    /// 이름 충돌 시 먼저 등록된 확장이 유지되고 false 를 반환한다.
    pub fn register(&mut self, command: Arc<dyn ExtensionCommand>) -> bool {
        let name = command.name().to_string();

        if self.commands.contains_key(&name) {
            warn!("Extension {} is already registered", name);
            return false;
        }

        info!("Extension loaded: {}", name);
        self.commands.insert(name, command);
        true
    }

    /// 로더가 발견한 확장을 모두 등록
    ///
    /// 실패한 후보는 로그만 남기고 건너뛴다. 등록된 수를 반환한다.
    pub fn load_from(&mut self, loader: &dyn ExtensionLoader) -> usize {
        let mut loaded = 0;

        for discovered in loader.discover() {
            match discovered.outcome {
                Ok(command) => {
                    if self.register(command) {
                        loaded += 1;
                    }
                }
                Err(e) => {
                    error!(
                        "Failed to load extension {} from {}: {}",
                        discovered.name,
                        loader.source(),
                        e
                    );
                }
            }
        }

        loaded
    }

    /// 이름으로 확장 조회
    pub fn get(&self, name: &str) -> Option<Arc<dyn ExtensionCommand>> {
        self.commands.get(name).cloned()
    }

    /// 확장 존재 여부 확인
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// 모든 확장 이름 (정렬됨)
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// 확장 수
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// 비어있는지 확인
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
