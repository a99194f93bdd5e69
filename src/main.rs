use anyhow::{anyhow, Context};
use clap::Parser;
use pingora_core::server::configuration::Opt;
use pingora_core::server::Server;
use std::path::PathBuf;
use greetcard::compositor::assets::check_assets;
use greetcard::config::Config;
use greetcard::server::GreetcardService;

/// Greetcard - renders a name or message onto a greeting card, served with Cloudflare's Pingora
#[derive(Parser, Debug)]
#[command(name = "greetcard")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Daemon mode
    #[arg(short = 'd', long)]
    daemon: bool,

    /// Test configuration and assets, then exit
    #[arg(long)]
    test: bool,

    /// Upgrade workers gracefully
    #[arg(long)]
    upgrade: bool,
}

fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration from file
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    config.validate().context("Invalid configuration")?;

    // Initialize logging subsystem
    greetcard::logging::init_subscriber(&config.logging)
        .map_err(|e| anyhow!("Failed to initialize logging subsystem: {}", e))?;

    tracing::info!(
        config_file = %args.config.display(),
        server_address = %config.server.address,
        server_port = config.server.port,
        base_image = %config.style.base_image.display(),
        font = %config.style.font.display(),
        "Configuration loaded successfully"
    );

    // Assets are re-read per request; check them once so operators see problems early
    match check_assets(&config.style.base_image, &config.style.font) {
        Ok((width, height)) => {
            tracing::info!(width = width, height = height, "Card assets are readable");
        }
        Err(e) if args.test => {
            return Err(anyhow!("Asset check failed: {}", e));
        }
        Err(e) => {
            tracing::warn!(
                error_kind = e.kind(),
                error = %e,
                "Card assets are not usable yet; requests will fail until they are"
            );
        }
    }

    if args.test {
        tracing::info!("Configuration and assets OK");
        return Ok(());
    }

    // Build Pingora server options
    let opt = Opt {
        daemon: args.daemon,
        upgrade: args.upgrade,
        ..Default::default()
    };

    // Create Pingora server
    let mut server =
        Server::new(Some(opt)).map_err(|e| anyhow!("Failed to create Pingora server: {}", e))?;
    server.bootstrap();

    let service = GreetcardService::from_config(&config).context("Invalid style configuration")?;

    // Create HTTP service
    let mut http_service = pingora_proxy::http_proxy_service(&server.configuration, service);
    http_service.threads = Some(config.server.threads);

    let listen_addr = config.server.listen_address();
    http_service.add_tcp(&listen_addr);

    tracing::info!(
        address = %listen_addr,
        threads = config.server.threads,
        "Starting greetcard server"
    );

    // Register service with server
    server.add_service(http_service);

    // Run server forever (blocks until shutdown)
    server.run_forever();
}
