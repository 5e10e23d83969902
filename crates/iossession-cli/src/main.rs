//! iossession - bootstrap and manage iOS UI-automation sessions
//!
//! Usage:
//!     iossession [OPTIONS] <COMMAND>
//!
//! Environment Variables:
//!     IOS_SESSION_ENDPOINT: Automation endpoint URL (default: http://127.0.0.1:4723/wd/hub)
//!     IOS_SESSION_APP: Path to the application bundle
//!     IOS_SESSION_DEVICE_NAME: Target device name (default: iPhone 7)
//!     IOS_SESSION_PLATFORM_VERSION: Target platform version (default: 12.1)
//!     IOS_SESSION_IMPLICIT_WAIT: Implicit wait applied to new sessions, seconds (default: 15)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ios_session::{DeviceConfig, SessionFactory};
use std::path::PathBuf;

/// Bootstrap and manage iOS UI-automation sessions
#[derive(Parser, Debug)]
#[command(name = "iossession")]
#[command(about = "Bootstrap and manage iOS UI-automation sessions")]
#[command(after_help = r#"Examples:
    # Probe the endpoint
    iossession status

    # Create a session for a locally built app bundle
    iossession create --app /tmp/UICatalog.app

    # Create against a specific device and tear down immediately
    iossession create --app /tmp/UICatalog.app --device-name "iPhone 8" --quit

    # Save a screenshot of a running session
    iossession screenshot --session 6cf35a28 --output screen.png

    # End a session
    iossession quit --session 6cf35a28
"#)]
struct Cli {
    /// Automation endpoint URL
    #[arg(
        long,
        global = true,
        env = "IOS_SESSION_ENDPOINT",
        default_value = "http://127.0.0.1:4723/wd/hub"
    )]
    endpoint: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new device session and print its id
    Create {
        /// Path to the application bundle (.app)
        #[arg(long, env = "IOS_SESSION_APP")]
        app: PathBuf,

        /// Target device name
        #[arg(long, env = "IOS_SESSION_DEVICE_NAME", default_value = "iPhone 7")]
        device_name: String,

        /// Target platform version
        #[arg(long, env = "IOS_SESSION_PLATFORM_VERSION", default_value = "12.1")]
        platform_version: String,

        /// Automation engine name
        #[arg(long, default_value = "XCUITest")]
        automation_name: String,

        /// Accept system alerts automatically
        #[arg(long)]
        auto_accept_alerts: bool,

        /// Reset application state before the session (disables noReset)
        #[arg(long)]
        full_reset: bool,

        /// Idle command timeout in milliseconds
        #[arg(long, default_value = "30000")]
        command_timeout_ms: u64,

        /// Tear the session down again right after creation (smoke test)
        #[arg(long)]
        quit: bool,
    },

    /// Probe the endpoint status resource
    Status,

    /// Capture a screenshot of a running session
    Screenshot {
        /// Session identifier
        #[arg(long)]
        session: String,

        /// Output PNG path
        #[arg(long, default_value = "screenshot.png")]
        output: PathBuf,
    },

    /// End a running session
    Quit {
        /// Session identifier
        #[arg(long)]
        session: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let factory = SessionFactory::new(&cli.endpoint)
        .with_context(|| format!("invalid endpoint: {}", cli.endpoint))?;

    match cli.command {
        Command::Create {
            app,
            device_name,
            platform_version,
            automation_name,
            auto_accept_alerts,
            full_reset,
            command_timeout_ms,
            quit,
        } => {
            let config = DeviceConfig::new(app)
                .with_device_name(device_name)
                .with_platform_version(platform_version)
                .with_automation_name(automation_name)
                .with_auto_accept_alerts(auto_accept_alerts)
                .with_no_reset(!full_reset)
                .with_new_command_timeout_ms(command_timeout_ms);

            let session = factory
                .create_session(&config)
                .await
                .context("session creation failed")?;

            println!("session created: {}", session.session_id());
            println!(
                "implicit wait: {}s",
                session.implicit_wait().as_secs()
            );

            if quit {
                session.quit().await.context("session teardown failed")?;
                println!("session closed");
            }
        }

        Command::Status => {
            let status = factory
                .status()
                .await
                .with_context(|| format!("endpoint unreachable: {}", cli.endpoint))?;
            println!(
                "endpoint: {} ({})",
                factory.endpoint(),
                if status.ready { "ready" } else { "not ready" }
            );
            if let Some(message) = status.message {
                println!("{}", message);
            }
        }

        Command::Screenshot { session, output } => {
            let handle = factory.attach(&session);
            let shot = handle
                .screenshot()
                .await
                .with_context(|| format!("screenshot failed for session {}", session))?;
            std::fs::write(&output, shot.png_bytes()?)
                .with_context(|| format!("cannot write {}", output.display()))?;
            println!(
                "saved {}x{} screenshot to {}",
                shot.width,
                shot.height,
                output.display()
            );
        }

        Command::Quit { session } => {
            let handle = factory.attach(&session);
            handle
                .quit()
                .await
                .with_context(|| format!("quit failed for session {}", session))?;
            println!("session {} closed", session);
        }
    }

    Ok(())
}
