use anyhow::Context;
use clap::{Arg, Command};
use tracing::info;

use thrasybulus_frontend::api_client::HttpApiClient;
use thrasybulus_frontend::app::Thrasybulus;
use thrasybulus_frontend::settings::{FrontendSettings, SettingsOverrides};

pub fn main() -> anyhow::Result<()> {
    let matches = Command::new("thrasybulus-frontend")
        .about("Thrasybulus - network interface dashboard")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enable verbose logging"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Host running the Thrasybulus backend (default: localhost)")
                .required(false),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Backend port (default: 9901)")
                .value_parser(clap::value_parser!(u16).range(1..))
                .required(false),
        )
        .arg(
            Arg::new("timeout-secs")
                .long("timeout-secs")
                .value_name("SECONDS")
                .help("Per-request timeout (default: 10)")
                .value_parser(clap::value_parser!(u64).range(1..))
                .required(false),
        )
        .get_matches();

    // Initialize logging, keeping the windowing stack quiet unless asked
    let log_level = if matches.get_flag("verbose") {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "info,wgpu_core=warn,wgpu_hal=warn,naga=warn,winit=warn".to_string())
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(true)
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .compact(),
        )
        .init();

    let overrides = SettingsOverrides {
        backend_host: matches.get_one::<String>("host").cloned(),
        backend_port: matches.get_one::<u16>("port").copied(),
        request_timeout_secs: matches.get_one::<u64>("timeout-secs").copied(),
    };
    let settings = FrontendSettings::load().with_overrides(overrides);

    let endpoint = settings.endpoint().context("Invalid backend configuration")?;
    let client = HttpApiClient::new(endpoint, settings.request_timeout())
        .context("Failed to create backend client")?;

    info!("[FRONTEND] Starting thrasybulus-frontend");

    iced::application(
        move || Thrasybulus::new(client.clone()),
        Thrasybulus::update,
        Thrasybulus::view,
    )
    .run()
    .map_err(|e| anyhow::anyhow!("Dashboard exited with an error: {e}"))
}
