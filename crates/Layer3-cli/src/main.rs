//! rcalc CLI - Main entry point

mod repl;

use clap::Parser;
use rcalc_core::{
    BuiltinLoader, Console, Dispatcher, ExtensionLoader, ExtensionRegistry, ManifestLoader,
    OperationRegistry, Outcome,
};
use rcalc_foundation::{CalcConfig, HistoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// rcalc - Interactive terminal calculator with extension commands
#[derive(Parser, Debug)]
#[command(name = "rcalc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Evaluate a single command line and exit (e.g. "add 2 3")
    #[arg(short, long)]
    eval: Option<String>,

    /// Path to the history file (overrides config)
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Directory of extension manifests (overrides config)
    #[arg(long)]
    extensions_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = CalcConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}", e);
        CalcConfig::default()
    });

    // Apply command line overrides
    if let Some(history_file) = args.history_file {
        config.history_file = history_file;
    }
    if let Some(extensions_dir) = args.extensions_dir {
        config.extensions_dir = Some(extensions_dir);
    }

    // Initialize logging
    init_logging(&config, args.debug)?;

    // 연산 레지스트리는 시작 시 한 번 만들어지고 이후 읽기 전용
    let operations = OperationRegistry::with_builtins();

    // 확장 발견: 매니페스트 디렉토리가 지정되면 그 디렉토리가
    // 발견 소스가 되고, 아니면 빌트인 테이블을 그대로 등록한다
    let loader: Box<dyn ExtensionLoader> = match &config.extensions_dir {
        Some(dir) => Box::new(ManifestLoader::new(dir)),
        None => Box::new(BuiltinLoader),
    };
    let mut extensions = ExtensionRegistry::new();
    let loaded = extensions.load_from(loader.as_ref());
    tracing::info!("Loaded {} extension(s) from {}", loaded, loader.source());

    // 계산 기록은 시작 시 로드 (파일이 없으면 빈 기록)
    let mut history = HistoryStore::new(&config.history_file);
    if let Err(e) = history.load() {
        eprintln!("Warning: Failed to load history: {}", e);
    }

    let mut dispatcher = Dispatcher::new(operations, extensions, history);

    // Run based on mode
    if let Some(line) = args.eval {
        run_once(&mut dispatcher, &line).await;
    } else {
        repl::run(&mut dispatcher).await?;
    }

    Ok(())
}

/// Dispatch a single line in non-interactive mode
async fn run_once(dispatcher: &mut Dispatcher, line: &str) {
    let mut console = Console::stdin();
    match dispatcher.dispatch(line, &mut console).await {
        Ok(Outcome::Exit) | Ok(Outcome::Continue) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize the tracing subscriber
///
/// RUST_LOG 가 있으면 그대로 쓰고, 없으면 설정/플래그에서 레벨을 얻는다.
/// RCALC_LOG_FILE 이 지정되면 포맷 출력을 파일로 보낸다.
fn init_logging(config: &CalcConfig, debug: bool) -> anyhow::Result<()> {
    let fallback = if debug {
        "debug".to_string()
    } else {
        config.log_level.clone().unwrap_or_else(|| "info".to_string())
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

    match std::env::var("RCALC_LOG_FILE").ok().filter(|v| !v.trim().is_empty()) {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path.trim())?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .init();
        }
        None => {
            // 프롬프트 출력과 섞이지 않게 로그는 stderr 로 보낸다
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}
