//! Interactive REPL loop
//!
//! 읽기 → 디스패치 → 출력 사이클. 복구 가능한 에러는 출력 후 계속한다.

use rcalc_core::{Console, Dispatcher, Outcome};
use rcalc_foundation::{Error, Result};
use tracing::error;

/// Run the interactive loop until `exit` or EOF
pub async fn run(dispatcher: &mut Dispatcher) -> Result<()> {
    println!("Welcome to the rcalc REPL!");
    println!("Type 'menu' to see available commands, 'usage' for instructions, or 'exit' to quit.\n");

    let mut console = Console::stdin();

    loop {
        let Some(line) = console.read_line(">> ").await? else {
            // EOF - 깨끗하게 종료
            println!();
            break;
        };
        if line.is_empty() {
            continue;
        }

        match dispatcher.dispatch(&line, &mut console).await {
            Ok(Outcome::Exit) => break,
            Ok(Outcome::Continue) => {}
            Err(e @ Error::UnknownCommand(_)) => println!("{}", e),
            Err(e) if e.is_user_facing() => println!("Error: {}", e),
            Err(e) => {
                error!("Dispatch failed: {}", e);
                println!("Error: {}", e);
            }
        }
    }

    Ok(())
}
