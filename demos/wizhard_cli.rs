//! Drive one Wiz bulb through the accessory hooks from the command line.
//!
//! Run with: cargo run --example wizhard_cli -- --ip 192.168.1.100 status
//! Set RUST_LOG=debug to see the exchanged JSON.

use std::time::Duration;

use clap::{Parser, Subcommand};
use wizhard_rs::{AccessoryInfo, ClientOptions, Color, ColoredLightbulb, Light, WizLightbulb};

#[derive(Parser)]
#[command(name = "wizhard-cli")]
#[command(about = "Control a Wiz bulb the way an accessory bridge would", long_about = None)]
struct Cli {
    /// IP address or hostname of the bulb
    #[arg(short, long)]
    ip: String,

    /// Receive deadline in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Fail writes the bulb acknowledges with an error
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print on/brightness/hue/saturation as the hooks report them
    Status,

    /// Print the bulb's system configuration
    Info,

    /// Turn the bulb on
    On,

    /// Turn the bulb off
    Off,

    /// Set brightness (0-100)
    Brightness {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        level: u8,
    },

    /// Set hue in degrees (0-360)
    Hue { degrees: f64 },

    /// Set saturation in percent (0-100)
    Saturation { percent: f64 },

    /// Set the RGB channels directly, e.g. "255,128,0"
    Rgb { color: Color },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let options = ClientOptions::default()
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_reject_device_errors(cli.strict);
    let light = Light::open(&cli.ip, options).await;

    let info = AccessoryInfo {
        name: "Wiz 0".into(),
        manufacturer: "WizHard".into(),
        serial_number: cli.ip.clone(),
        model: AccessoryInfo::BULB_MODEL.into(),
        firmware_revision: env!("CARGO_PKG_VERSION").into(),
    };
    let bulb = WizLightbulb::new(info, light);

    match cli.command {
        Commands::Status => {
            println!("on:         {}", bulb.get_on().await);
            println!("brightness: {}", bulb.get_brightness().await);
            println!("hue:        {}", bulb.get_hue().await);
            println!("saturation: {}", bulb.get_saturation().await);
        }
        Commands::Info => {
            let system = bulb.light().read_system_info().await?;
            println!("{}", serde_json::to_string_pretty(&system)?);
        }
        Commands::On => bulb.set_on(true).await,
        Commands::Off => bulb.set_on(false).await,
        Commands::Brightness { level } => bulb.set_brightness(level).await,
        Commands::Hue { degrees } => bulb.set_hue(degrees).await,
        Commands::Saturation { percent } => bulb.set_saturation(percent).await,
        Commands::Rgb { color } => bulb.light().modify(|s| s.set_color(color)).await?,
    }

    Ok(())
}
