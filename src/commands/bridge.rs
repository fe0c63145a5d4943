use anyhow::{Context, Result};
use tracing::{debug, info};

use lock_task_bridge::channel::{self, MethodCall};
use lock_task_bridge::config::{self, BridgeConfig};
use lock_task_bridge::lock_task::{LockTaskBridge, LockTaskPlatform, ModeRequest, create_platform};

use crate::cli::{Args, Commands};
use crate::commands::utils::format_outcome;

type PlatformBox = Box<dyn LockTaskPlatform + Send + Sync>;

/// Run a bridge subcommand
pub fn run_command(args: Args) -> Result<()> {
    let config = load_effective_config(&args)?;

    match args.command {
        Commands::Start => run_request(&build_bridge(&config), ModeRequest::Enter),
        Commands::Stop => run_request(&build_bridge(&config), ModeRequest::Exit),
        Commands::Status => run_request(&build_bridge(&config), ModeRequest::Query),
        Commands::Call { method } => run_call(&build_bridge(&config), method),
        Commands::Serve => run_serve(&build_bridge(&config)),
        Commands::ShowConfig => show_config(&config),
    }
}

fn build_bridge(config: &BridgeConfig) -> LockTaskBridge<PlatformBox> {
    debug!(
        "Using {} platform, minimum API level {}",
        config.platform, config.min_api_level
    );
    LockTaskBridge::with_min_api_level(create_platform(config), config.min_api_level)
}

/// Load the config file and apply command-line overrides
fn load_effective_config(args: &Args) -> Result<BridgeConfig> {
    let mut config = config::resolve_config(args.config.as_deref())?;

    if let Some(platform) = args.platform {
        config.platform = platform;
    }

    Ok(config)
}

fn run_request(bridge: &LockTaskBridge<PlatformBox>, request: ModeRequest) -> Result<()> {
    let outcome = bridge.execute(&request);
    channel::log_outcome(&request, &outcome);

    let value = outcome.into_result().as_bool().unwrap_or(false);

    info!("{}: {}", request, value);
    println!("{}", format_outcome(value));
    Ok(())
}

fn run_call(bridge: &LockTaskBridge<PlatformBox>, method: String) -> Result<()> {
    let call = MethodCall {
        method,
        arguments: None,
    };
    let response = channel::dispatch(bridge, &call);

    println!(
        "{}",
        serde_json::to_string(&response).context("Failed to encode response")?
    );
    Ok(())
}

fn run_serve(bridge: &LockTaskBridge<PlatformBox>) -> Result<()> {
    info!("Serving lock task calls on stdin");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let handled = channel::serve(bridge, stdin.lock(), stdout.lock())
        .context("Lock task channel failed")?;

    info!("Answered {} calls", handled);
    Ok(())
}

fn show_config(config: &BridgeConfig) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;
    print!("{}", yaml);
    Ok(())
}
