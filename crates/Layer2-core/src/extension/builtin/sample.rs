//! Sample extension - 확장 명령 데모

use crate::console::Console;
use crate::extension::traits::ExtensionCommand;
use async_trait::async_trait;
use rcalc_foundation::Result;
use tracing::info;

/// 동적으로 로드되는 명령을 보여주는 예제 확장
pub struct SampleExtension;

#[async_trait]
impl ExtensionCommand for SampleExtension {
    fn name(&self) -> &str {
        "sample_plugin"
    }

    fn description(&self) -> &str {
        "Demo extension command"
    }

    async fn invoke(&self, _console: &mut Console) -> Result<()> {
        info!("Executing sample_plugin command!");
        println!("You just ran the Sample Plugin Command!");
        Ok(())
    }
}
