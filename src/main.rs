use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wallet_pages::testing::ScriptedDriver;
use wallet_pages::{
    Config, ConnectingPage, DriverTrait, ExecutionMode, Page, PageContext, PinSetupPage, ScreenId,
    TracingSink,
};

fn cli() -> Command {
    Command::new("wallet-pages")
        .about("Drive the wallet's page objects against a scripted device")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log page-object debug output"),
        )
        .arg(
            Arg::new("file")
                .short('c')
                .long("config")
                .global(true)
                .help("JSON config file; DEVICE_CLOUD and defaults are used otherwise"),
        )
        .subcommand_required(true)
        .subcommand(Command::new("config").about("Print the resolved configuration"))
        .subcommand(
            Command::new("demo")
                .about("Walk PIN setup and a connection wait on the scripted wallet")
                .arg(Arg::new("pin").long("pin").default_value("369369"))
                .arg(
                    Arg::new("connect-delay")
                        .long("connect-delay")
                        .value_parser(value_parser!(u64))
                        .help("Seconds until the connecting indicator disappears; never if unset"),
                )
                .arg(
                    Arg::new("connect-timeout")
                        .long("connect-timeout")
                        .value_parser(value_parser!(u64))
                        .help("Seconds to wait for the connection; config value if unset"),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .value_parser(["local", "remote"])
                        .help("Override the execution mode"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let config = match matches.get_one::<String>("file") {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading config from {}", path))?
        }
        None => Config::from_env()?,
    };
    Ok(config)
}

async fn run_demo(mut config: Config, matches: &ArgMatches) -> anyhow::Result<()> {
    if let Some(mode) = matches.get_one::<String>("mode") {
        config.execution.mode = mode.parse::<ExecutionMode>()?;
    }
    let pin = matches
        .get_one::<String>("pin")
        .cloned()
        .unwrap_or_default();
    if pin.is_empty() || !pin.chars().all(|c| c.is_ascii_digit()) {
        bail!("PIN must be digits only, got '{}'", pin);
    }
    let connect_delay = matches
        .get_one::<u64>("connect-delay")
        .map(|secs| Duration::from_secs(*secs));
    let connect_timeout = matches
        .get_one::<u64>("connect-timeout")
        .map(|secs| Duration::from_secs(*secs))
        .unwrap_or_else(|| config.connection_timeout());

    let driver = ScriptedDriver::wallet(connect_delay);
    let sink = TracingSink;
    let ctx = PageContext::new(&driver, &config, &sink);
    info!(session = %driver.session_id(), mode = ?config.execution.mode, "Scripted session started");

    let pin_setup: PinSetupPage<'_, ScriptedDriver> = ctx.open();
    info!("On {}: {}", pin_setup.screen(), pin_setup.on_this_page().await);
    pin_setup.enter_pin(&pin).await?;
    pin_setup.enter_second_pin(&pin).await?;
    let next = pin_setup.create_pin().await?;

    let landed = ctx.resolve(next);
    if landed.id() != ScreenId::Home || !landed.on_this_page().await {
        bail!("expected the Home screen after creating a PIN, got {}", landed.id());
    }
    info!("PIN created, landed on {}", landed.id());

    driver.show(ScreenId::Connecting);
    let connecting: ConnectingPage<'_, ScriptedDriver> = ctx.open();
    if !connecting.on_this_page().await {
        bail!("connecting screen never showed up");
    }
    match connecting.wait_for_connection_within(connect_timeout).await {
        Ok(_) => info!("Connected"),
        Err(e) => {
            error!("Connection did not complete: {}", e);
            let next = connecting.select_go_back_to_home().await?;
            info!("Backed out to {}", next);
            return Err(e.into());
        }
    }

    info!("Recorded {} interactions", driver.interactions().len());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let default_level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("config", _)) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Some(("demo", sub)) => run_demo(config, sub).await?,
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}
