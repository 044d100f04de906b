//! Binary entrypoint for the dinstar-sms console.
//!
//! Commands:
//! - `init` - write a starter `config.toml` and create the data directory
//! - `start` - interactive console, starting at the landing route
//! - `route` - print the landing route (`config` or `messages`)
//! - `config set|show|test` - edit, display or test the gateway record
//! - `send --to <number> --message <text> [--sim-port N]` - record a simulated send
//! - `messages` - print the message history
//!
//! See the library crate docs for module-level details: `dinstar_sms::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info};

use dinstar_sms::config::Config;
use dinstar_sms::console::render::{
    render_config_view, render_connection_test, render_message_list, render_not_configured,
};
use dinstar_sms::console::session::{alert_text, ConsoleSession};
use dinstar_sms::console::{landing, ConfigEditor, MessageView};
use dinstar_sms::i18n::Msg;
use dinstar_sms::storage::Storage;

#[derive(Parser)]
#[command(name = "dinstar-sms")]
#[command(about = "Operator console for Dinstar SMS gateways")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter configuration file
    Init,
    /// Run the interactive console
    Start,
    /// Print which screen the console opens on
    Route,
    /// Gateway connection record
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Record a simulated SMS send
    Send {
        /// Recipient number
        #[arg(short, long)]
        to: String,
        /// Message text
        #[arg(short, long)]
        message: String,
        /// SIM port (0-15); defaults to the configured one
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=15))]
        sim_port: Option<u8>,
    },
    /// Print the message history (re-read from storage)
    Messages,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Save the gateway record; omitted flags keep the stored values
    Set {
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        username: Option<String>,
        /// Prompted without echo when omitted and none is stored
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        serial_number: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=15))]
        sim_port: Option<u8>,
    },
    /// Show status and the stored record
    Show,
    /// Print the connection summary and test commands
    Test,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&None, cli.verbose);
        info!("Initializing new console configuration");
        let cfg = Config::default();
        Config::create_default(&cli.config).await?;
        info!("Configuration file created at {}", cli.config);
        Storage::with_limit(&cfg.storage.data_dir, cfg.storage.max_file_bytes).await?;
        info!("Data directory ready at {}", cfg.storage.data_dir);
        return Ok(());
    }

    let config = Config::load_or_default(&cli.config).await?;
    init_logging(&Some(config.clone()), cli.verbose);
    let storage = Storage::with_limit(&config.storage.data_dir, config.storage.max_file_bytes).await?;
    let lang = config.ui.language;

    match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Start => {
            info!("Starting dinstar-sms v{}", env!("CARGO_PKG_VERSION"));
            let reader = tokio::io::BufReader::new(tokio::io::stdin());
            let mut session = ConsoleSession::new(storage, &config.ui, reader, tokio::io::stdout());
            session.run().await?;
        }
        Commands::Route => {
            println!("{}", landing(&storage).await?.as_str());
        }
        Commands::Config { action } => {
            let mut editor = match ConfigEditor::open(storage).await {
                Ok(editor) => editor,
                Err(e) => fail(alert_text(lang, &e, Msg::ConfigSaveError), &e),
            };
            match action {
                ConfigAction::Set {
                    base_url,
                    port,
                    username,
                    password,
                    serial_number,
                    sim_port,
                } => {
                    let form = &mut editor.form;
                    if let Some(v) = base_url {
                        form.base_url = v;
                    }
                    if let Some(v) = port {
                        form.port = v;
                    }
                    if let Some(v) = username {
                        form.username = v;
                    }
                    if let Some(v) = serial_number {
                        form.serial_number = v;
                    }
                    if let Some(v) = sim_port {
                        form.sim_port = v;
                    }
                    match password {
                        Some(v) => form.password = v,
                        None if form.password.is_empty() => {
                            form.password = rpassword::prompt_password("Password: ")?;
                        }
                        None => {}
                    }
                    match editor.save().await {
                        Ok(()) => println!("{}", lang.t(Msg::ConfigSaved)),
                        Err(e) => fail(alert_text(lang, &e, Msg::ConfigSaveError), &e),
                    }
                }
                ConfigAction::Show => {
                    print!("{}", render_config_view(lang, &editor));
                }
                ConfigAction::Test => {
                    let test = editor.test_connection(&config.ui.sample_number, config.ui.sample_user_id);
                    print!("{}", render_connection_test(lang, &test));
                }
            }
        }
        Commands::Send {
            to,
            message,
            sim_port,
        } => {
            let mut view = match MessageView::open(storage).await {
                Ok(view) => view,
                Err(e) => fail(alert_text(lang, &e, Msg::MessagesLoadError), &e),
            };
            if view.config().is_none() {
                eprint!("{}", render_not_configured(lang));
            }
            view.form.recipient = to;
            view.form.message = message;
            if let Some(sim) = sim_port {
                view.form.sim_port = sim;
            }
            match view.send().await {
                Ok(record) => {
                    println!("{}", lang.t(Msg::SmsSent));
                    println!("id={}", record.id);
                }
                Err(e) => fail(alert_text(lang, &e, Msg::SmsSendError), &e),
            }
        }
        Commands::Messages => {
            let view = match MessageView::open(storage).await {
                Ok(view) => view,
                Err(e) => fail(alert_text(lang, &e, Msg::MessagesLoadError), &e),
            };
            if view.config().is_none() {
                print!("{}", render_not_configured(lang));
            } else {
                print!("{}", render_message_list(lang, view.messages()));
            }
        }
    }

    Ok(())
}

/// Print the operator alert, log the cause and exit non-zero.
fn fail(alert: &str, cause: &dinstar_sms::errors::SmsError) -> ! {
    error!("{}", cause);
    eprintln!("{}", alert);
    std::process::exit(1);
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let configured = config
        .as_ref()
        .and_then(|c| c.logging.level.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);
    let base_level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the terminal only when stderr is one; the console screens own stdout.
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
