//! sadb - Simple adb wrapper CLI

use clap::{Parser, Subcommand, ValueEnum};
use sadb_cli::commands::{self, print_output};
use sadb_config::GlobalConfig;
use sadb_core::{AdbDevice, AdbServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "sadb")]
#[command(author, version, about = "Simple adb wrapper", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the adb binary (overrides the config file)
    #[arg(long, global = true)]
    adb: Option<String>,

    /// Device serial or network host (defaults to the only attached device)
    #[arg(short, long, global = true, env = "ANDROID_SERIAL")]
    serial: Option<String>,

    /// Seconds each adb command may run before it is killed
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List attached devices
    Devices {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the device connection state
    State,

    /// Print the device serial number
    Serialno,

    /// Print the device path
    Devpath,

    /// Check whether the device answers
    Available,

    /// Run a command in the device shell
    Shell {
        /// Command and arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        cmd: Vec<String>,
    },

    /// Copy a local file or directory to the device
    Push { source: String, dest: String },

    /// Copy a file or directory from the device
    Pull {
        source: String,
        /// Local destination (current directory if not specified)
        dest: Option<String>,
    },

    /// Install an APK
    Install { apk: String },

    /// Uninstall a package
    Uninstall { package: String },

    /// Reboot the device
    Reboot,

    /// Restart adbd as root
    Root,

    /// Restart adbd without root
    Unroot,

    /// Check whether su works on the device
    IsRoot,

    /// Remount system partitions read-write
    Remount,

    /// Enable or disable dm-verity
    Verity {
        #[arg(value_enum)]
        mode: VerityMode,
    },

    /// Tap the screen
    Tap { x: u32, y: u32 },

    /// Swipe from one point to another
    Swipe { x1: u32, y1: u32, x2: u32, y2: u32 },

    /// Take a screenshot and copy it here
    Screencap {
        /// Local file (screencap<timestamp>.png if not specified)
        output: Option<String>,
        /// Temporary location on the device
        #[arg(long)]
        remote: Option<String>,
    },

    /// Read a system property
    Getprop { prop: String },

    /// Set a system property
    Setprop { prop: String, value: String },

    /// Dump or clear the device log
    Logcat {
        /// Clear instead of dumping
        #[arg(long)]
        clear: bool,
        /// Restrict to a log buffer (repeatable)
        #[arg(short = 'b', long = "buffer")]
        buffers: Vec<String>,
    },

    /// Print the PID of a running app
    Pid { package: String },

    /// Connect to a device over TCP/IP
    Connect {
        host: String,
        /// Port (5555 if not specified)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Disconnect from a TCP/IP device
    Disconnect {
        host: String,
        /// Port (5555 if not specified)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Block until the device is online
    WaitForDevice {
        /// Give up after this many seconds
        #[arg(long)]
        max_wait: Option<u64>,
    },

    /// Start the adb server
    StartServer {
        /// Server port
        #[arg(short = 'P', long, env = "ANDROID_ADB_SERVER_PORT")]
        port: Option<u16>,
    },

    /// Kill the adb server
    KillServer,

    /// Restart the server listening on USB
    Usb,

    /// Restart the server listening on a TCP port
    Tcpip { port: u16 },

    /// Print the adb version
    Version,

    /// Show the global configuration
    Config {
        /// Only print the config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VerityMode {
    Enable,
    Disable,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let mut config = GlobalConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring config file: {}", e);
        GlobalConfig::default()
    });
    if let Some(adb) = cli.adb {
        config.adb.path = adb;
    }
    if let Some(secs) = cli.timeout {
        config.timeouts.command_secs = Some(secs);
    }

    let server = AdbServer::new(&config);

    match cli.command {
        Commands::Config { path } => commands::config(&config, path)?,
        Commands::Devices { json } => commands::devices(&server, json).await?,
        Commands::Connect { host, port } => commands::connect(&server, &host, port).await?,
        Commands::Disconnect { host, port } => {
            commands::disconnect(&server, &host, port).await?
        }
        Commands::StartServer { port } => commands::start_server(&server, port).await?,
        Commands::KillServer => server.kill().await?,
        Commands::Usb => print_output(&server.usb().await?),
        Commands::Tcpip { port } => print_output(&server.tcpip(port).await?),
        Commands::Version => print_output(&server.version().await?),
        cmd => {
            let device = commands::resolve_device(&config, cli.serial.as_deref()).await?;
            run_on_device(&device, cmd).await?;
        }
    }

    Ok(())
}

async fn run_on_device(device: &AdbDevice, cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::State => print_output(&device.get_state().await?),
        Commands::Serialno => print_output(&device.get_serialno().await?),
        Commands::Devpath => print_output(&device.get_devpath().await?),
        Commands::Available => commands::available(device).await?,
        Commands::Shell { cmd } => commands::shell(device, &cmd).await?,
        Commands::Push { source, dest } => print_output(&device.push(&source, &dest).await?),
        Commands::Pull { source, dest } => {
            print_output(&device.pull(&source, dest.as_deref()).await?)
        }
        Commands::Install { apk } => print_output(&device.install(&apk).await?),
        Commands::Uninstall { package } => print_output(&device.uninstall(&package).await?),
        Commands::Reboot => device.reboot().await?,
        Commands::Root => commands::root(device, true).await?,
        Commands::Unroot => commands::root(device, false).await?,
        Commands::IsRoot => commands::is_root(device).await?,
        Commands::Remount => commands::remount(device).await?,
        Commands::Verity { mode } => {
            let enabled = matches!(mode, VerityMode::Enable);
            print_output(&device.enable_verity(enabled).await?)
        }
        Commands::Tap { x, y } => device.tap(x, y).await?,
        Commands::Swipe { x1, y1, x2, y2 } => device.swipe(x1, y1, x2, y2).await?,
        Commands::Screencap { output, remote } => {
            commands::screencap(device, remote.as_deref(), output.as_deref()).await?
        }
        Commands::Getprop { prop } => print_output(&device.getprop(&prop).await?),
        Commands::Setprop { prop, value } => device.setprop(&prop, &value).await?,
        Commands::Logcat { clear, buffers } => commands::logcat(device, clear, &buffers).await?,
        Commands::Pid { package } => commands::pid(device, &package).await?,
        Commands::WaitForDevice { max_wait } => {
            commands::wait_for_device(device, max_wait).await?
        }
        _ => unreachable!(), // Server commands handled in run()
    }

    Ok(())
}
