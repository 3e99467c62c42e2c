//! Dispatcher - 한 줄 입력 라우팅
//!
//! 조회 순서는 control → extension → operation 이며 첫 매치에서 끝난다.
//! 잘못된 입력 한 줄, 도메인 에러 하나, 확장 에러 하나가
//! 루프를 종료시키거나 기록을 손상시키면 안 된다.

pub mod control;

pub use control::ControlCommand;

use crate::console::Console;
use crate::extension::ExtensionRegistry;
use crate::operation::OperationRegistry;
use rcalc_foundation::{Error, HistoryRecord, HistoryStore, Result};
use tracing::{debug, info};

/// 디스패치 한 번의 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 루프 계속
    Continue,
    /// 명시적 종료 (exit 명령)
    Exit,
}

/// 한 줄 입력을 제어/확장/연산 명령으로 라우팅하는 디스패처
pub struct Dispatcher {
    operations: OperationRegistry,
    extensions: ExtensionRegistry,
    history: HistoryStore,
}

impl Dispatcher {
    pub fn new(
        operations: OperationRegistry,
        extensions: ExtensionRegistry,
        history: HistoryStore,
    ) -> Self {
        Self {
            operations,
            extensions,
            history,
        }
    }

    /// 계산 기록 접근 (표시/테스트용)
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// 확장 레지스트리 접근
    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    /// 한 줄을 해석해 실행한다
    pub async fn dispatch(&mut self, line: &str, console: &mut Console) -> Result<Outcome> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Outcome::Continue);
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let command = tokens[0].to_lowercase();

        // 1. 제어 명령
        if let Some(control) = ControlCommand::parse(&command) {
            return self.run_control(control);
        }

        // 2. 확장 명령 - 이번 턴의 제어권을 확장에 넘긴다
        if let Some(extension) = self.extensions.get(&command) {
            debug!("Dispatching extension command: {}", command);
            extension.invoke(console).await?;
            return Ok(Outcome::Continue);
        }

        // 3. 산술 연산
        if self.operations.contains(&command) {
            self.run_operation(&command, &tokens)?;
            return Ok(Outcome::Continue);
        }

        Err(Error::UnknownCommand(command))
    }

    // ========================================================================
    // 제어 명령
    // ========================================================================

    fn run_control(&mut self, command: ControlCommand) -> Result<Outcome> {
        match command {
            ControlCommand::Exit => {
                println!("Exiting the calculator. Goodbye!");
                return Ok(Outcome::Exit);
            }
            ControlCommand::Menu => self.show_menu(),
            ControlCommand::Usage => self.show_usage(),
            ControlCommand::History => self.show_history(),
            ControlCommand::ClearHistory => {
                self.history.clear();
                println!("History cleared in memory.");
            }
            ControlCommand::DeleteHistoryFile => {
                self.history.delete_file()?;
                println!("History file deleted.");
            }
            ControlCommand::SaveHistory => {
                self.history.save()?;
                println!("History saved to file.");
            }
            ControlCommand::LoadHistory => {
                self.history.load()?;
                println!("History loaded from file.");
            }
        }
        Ok(Outcome::Continue)
    }

    // ========================================================================
    // 산술 연산
    // ========================================================================

    fn run_operation(&mut self, name: &str, tokens: &[&str]) -> Result<()> {
        // contains 확인 후 호출되므로 arity 는 항상 존재한다
        let required = self
            .operations
            .arity(name)
            .ok_or_else(|| Error::UnknownOperation(name.to_string()))?;

        if tokens.len() - 1 < required {
            return Err(Error::Arity {
                command: name.to_string(),
                required,
            });
        }

        let mut args = Vec::with_capacity(required);
        for token in &tokens[1..=required] {
            let value: f64 = token
                .parse()
                .map_err(|_| Error::Parse(token.to_string()))?;
            args.push(value);
        }

        info!("Performing operation: {} with arguments {:?}", name, args);
        let result = self.operations.evaluate(name, &args)?;

        let record = HistoryRecord::new(
            name,
            args[0],
            args.get(1).copied().unwrap_or(0.0),
            result,
        );
        self.history.append(record);

        println!("Result: {}", result);
        Ok(())
    }

    // ========================================================================
    // 표시
    // ========================================================================

    fn show_menu(&self) {
        println!("\n--- MENU: Available Calculator Commands ---");
        println!("Basic Commands (2 numbers):");
        println!("  {}", self.operations.names_with_arity(2).join(", "));
        println!("\nAdvanced Commands (1 number):");
        println!("  {}", self.operations.names_with_arity(1).join(", "));
        if !self.extensions.is_empty() {
            println!("\nExtension Commands:");
            for name in self.extensions.names() {
                println!("  {}", name);
            }
        }
        println!("\nSpecial Commands:");
        println!("  history, clear_history, delete_history_file, save_history, load_history");
        println!("  menu, usage, exit\n");
    }

    fn show_usage(&self) {
        println!("\n--- USAGE: How to Use the Calculator ---");
        println!("1) For two-operand commands (add, sub, mul, div):");
        println!("      Example: 'add 2 3'");
        println!("2) For single-operand commands (sqrt, square, cube, log):");
        println!("      Example: 'sqrt 16'");
        println!("3) For special commands: 'menu', 'usage', 'exit'.");
        println!("4) For extension commands, type the command name (e.g. 'sample_plugin').\n");
    }

    fn show_history(&self) {
        if self.history.is_empty() {
            println!("No history records.");
            return;
        }

        println!(
            "{:<10} {:>12} {:>12} {:>12}",
            "operation", "operand1", "operand2", "result"
        );
        println!("{}", "-".repeat(50));
        for record in self.history.records() {
            println!(
                "{:<10} {:>12} {:>12} {:>12}",
                record.operation, record.operand1, record.operand2, record.result
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{BuiltinLoader, ExtensionCommand};
    use async_trait::async_trait;
    use std::sync::Arc;

    fn console() -> Console {
        Console::from_reader("".as_bytes())
    }

    fn dispatcher() -> (Dispatcher, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let history = HistoryStore::new(dir.path().join("history.json"));

        let mut extensions = ExtensionRegistry::new();
        extensions.load_from(&BuiltinLoader);

        (
            Dispatcher::new(OperationRegistry::with_builtins(), extensions, history),
            dir,
        )
    }

    #[tokio::test]
    async fn test_successful_dispatch_appends_one_record() {
        let (mut dispatcher, _dir) = dispatcher();

        let outcome = dispatcher.dispatch("add 2 3", &mut console()).await.unwrap();
        assert_eq!(outcome, Outcome::Continue);

        let records = dispatcher.history().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], HistoryRecord::new("add", 2.0, 3.0, 5.0));
    }

    #[tokio::test]
    async fn test_unary_dispatch_records_zero_second_operand() {
        let (mut dispatcher, _dir) = dispatcher();

        dispatcher.dispatch("sqrt 16", &mut console()).await.unwrap();

        let records = dispatcher.history().records();
        assert_eq!(records[0], HistoryRecord::new("sqrt", 16.0, 0.0, 4.0));
    }

    #[tokio::test]
    async fn test_command_name_is_case_insensitive() {
        let (mut dispatcher, _dir) = dispatcher();

        dispatcher.dispatch("ADD 2 3", &mut console()).await.unwrap();
        assert_eq!(dispatcher.history().len(), 1);
    }

    #[tokio::test]
    async fn test_arity_error_names_required_count() {
        let (mut dispatcher, _dir) = dispatcher();

        let err = dispatcher.dispatch("add 2", &mut console()).await.unwrap_err();
        assert!(matches!(err, Error::Arity { required: 2, .. }));
        assert!(err.to_string().contains('2'));

        // 평가가 시도되지 않았으므로 기록도 없다
        assert!(dispatcher.history().is_empty());
    }

    #[tokio::test]
    async fn test_parse_error_writes_no_record() {
        let (mut dispatcher, _dir) = dispatcher();

        let err = dispatcher
            .dispatch("add two 3", &mut console())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(dispatcher.history().is_empty());
    }

    #[tokio::test]
    async fn test_domain_error_writes_no_record() {
        let (mut dispatcher, _dir) = dispatcher();

        let err = dispatcher
            .dispatch("div 5 0", &mut console())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DivisionByZero));
        assert!(dispatcher.history().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_command_is_recoverable() {
        let (mut dispatcher, _dir) = dispatcher();

        let err = dispatcher
            .dispatch("frobnicate 1 2", &mut console())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(_)));
        assert!(err.is_user_facing());

        // 다음 디스패치는 정상 동작한다
        dispatcher.dispatch("add 1 1", &mut console()).await.unwrap();
        assert_eq!(dispatcher.history().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_line_is_a_no_op() {
        let (mut dispatcher, _dir) = dispatcher();

        let outcome = dispatcher.dispatch("   ", &mut console()).await.unwrap();
        assert_eq!(outcome, Outcome::Continue);
        assert!(dispatcher.history().is_empty());
    }

    #[tokio::test]
    async fn test_exit_returns_exit_outcome() {
        let (mut dispatcher, _dir) = dispatcher();

        let outcome = dispatcher.dispatch("exit", &mut console()).await.unwrap();
        assert_eq!(outcome, Outcome::Exit);
    }

    #[tokio::test]
    async fn test_menu_and_usage_write_no_record() {
        let (mut dispatcher, _dir) = dispatcher();

        for _ in 0..3 {
            dispatcher.dispatch("menu", &mut console()).await.unwrap();
            dispatcher.dispatch("usage", &mut console()).await.unwrap();
        }
        assert!(dispatcher.history().is_empty());
        assert_eq!(dispatcher.extensions().len(), 2);
    }

    #[tokio::test]
    async fn test_extension_takes_precedence_over_unknown() {
        let (mut dispatcher, _dir) = dispatcher();

        let mut console = Console::from_reader("sin 30\n".as_bytes());
        let outcome = dispatcher.dispatch("trig", &mut console).await.unwrap();
        assert_eq!(outcome, Outcome::Continue);

        // 확장 턴은 기록을 남기지 않는다
        assert!(dispatcher.history().is_empty());
    }

    #[tokio::test]
    async fn test_failing_extension_does_not_poison_dispatcher() {
        struct FailingExtension;

        #[async_trait]
        impl ExtensionCommand for FailingExtension {
            fn name(&self) -> &str {
                "boom"
            }

            async fn invoke(&self, _console: &mut Console) -> Result<()> {
                Err(Error::Extension("deliberate failure".into()))
            }
        }

        let (mut dispatcher, _dir) = dispatcher();
        dispatcher
            .extensions
            .register(Arc::new(FailingExtension));

        let err = dispatcher.dispatch("boom", &mut console()).await.unwrap_err();
        assert!(matches!(err, Error::Extension(_)));

        // 실패 후에도 루프는 계속 쓸 수 있다
        dispatcher.dispatch("mul 3 4", &mut console()).await.unwrap();
        assert_eq!(dispatcher.history().len(), 1);
    }

    #[tokio::test]
    async fn test_control_history_commands_round_trip() {
        let (mut dispatcher, _dir) = dispatcher();

        dispatcher.dispatch("add 2 3", &mut console()).await.unwrap();
        dispatcher.dispatch("save_history", &mut console()).await.unwrap();
        dispatcher.dispatch("clear_history", &mut console()).await.unwrap();
        assert!(dispatcher.history().is_empty());

        dispatcher.dispatch("load_history", &mut console()).await.unwrap();
        assert_eq!(dispatcher.history().len(), 1);

        dispatcher
            .dispatch("delete_history_file", &mut console())
            .await
            .unwrap();
        assert!(!dispatcher.history().path().exists());
    }

    #[tokio::test]
    async fn test_excess_tokens_are_ignored() {
        let (mut dispatcher, _dir) = dispatcher();

        dispatcher
            .dispatch("sqrt 16 99 extra", &mut console())
            .await
            .unwrap();
        let records = dispatcher.history().records();
        assert_eq!(records[0], HistoryRecord::new("sqrt", 16.0, 0.0, 4.0));
    }
}
