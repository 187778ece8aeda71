//! maryclient - MARY TTS 客户端
//!
//! 用法：
//! - `maryclient serve`                       启动 HTTP 网关
//! - `maryclient [input-file] [output-file]`  单次合成，默认读 stdin、写 stdout
//!
//! 合成参数（输入/输出类型、音频格式、音色）来自配置的 `request` 段

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use maryclient::application::MaryClient;
use maryclient::config::{load_config, print_config, AppConfig};
use maryclient::infrastructure::http::{AppState, HttpServer, ServerConfig};
use maryclient::infrastructure::tcp::connect_client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志，写到 stderr 以免混入 stdout 上的合成输出
    let log_filter = format!(
        "{},maryclient={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    print_config(&config);

    let client = connect_client(config.server.connector_config()).arc();

    // 连接检查
    let version = client
        .server_version_info()
        .await
        .with_context(|| format!("Cannot talk to MARY server at {}", config.server.addr()))?;
    tracing::info!("Connected to {}, {}", config.server.addr(), version);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("serve") {
        serve(client, &config).await
    } else {
        synthesize_once(&client, &config, args.first(), args.get(1)).await
    }
}

/// 启动 HTTP 网关直到收到 ctrl-c
async fn serve(client: Arc<MaryClient>, config: &AppConfig) -> anyhow::Result<()> {
    let state = AppState::new(client, config.request.clone(), config.server.addr());
    let server = HttpServer::new(ServerConfig::from(&config.gateway), state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Gateway shutdown complete");
    Ok(())
}

/// 读取输入、合成、写出结果
async fn synthesize_once(
    client: &MaryClient,
    config: &AppConfig,
    input_path: Option<&String>,
    output_path: Option<&String>,
) -> anyhow::Result<()> {
    let input = match input_path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input file {}", path))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read input from stdin")?;
            buf
        }
    };

    let request = config.request.build(input);
    let mut diagnostics = tokio::io::stderr();

    let report = match output_path {
        Some(path) => {
            let mut file = tokio::fs::File::create(path)
                .await
                .with_context(|| format!("Failed to create output file {}", path))?;
            let report = client.process(&request, &mut file, &mut diagnostics).await?;
            file.flush().await?;
            report
        }
        None => {
            let mut stdout = tokio::io::stdout();
            let report = client
                .process(&request, &mut stdout, &mut diagnostics)
                .await?;
            stdout.flush().await?;
            report
        }
    };

    tracing::info!(
        request_id = %report.request_id,
        bytes = report.bytes_written,
        "Synthesis finished"
    );
    Ok(())
}
