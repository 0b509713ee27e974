//! CLI entry point for `mailclassify`.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgGroup, CommandFactory, FromArgMatches, Parser, Subcommand};
use tokio::runtime::Runtime;

use mailclassify::client::{Classifier, HttpClassifier, TextContract};
use mailclassify::clipboard::{ClipboardChain, CopyOutcome};
use mailclassify::config::Config;
use mailclassify::controller::{Controller, ControllerSettings, InputTab};
use mailclassify::i18n;
use mailclassify::model::result::{ClassificationResult, HealthStatus};
use mailclassify::model::sample::SampleKind;
use mailclassify::notify::{ConsoleNotifier, NoticeBoard};

#[derive(Parser)]
#[command(name = "mailclassify", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the classification service
    #[arg(long, global = true, env = "MAILCLASSIFY_SERVER", value_name = "URL")]
    server: Option<String>,

    /// How text is sent: classify-text, upload-form or api
    #[arg(long, global = true, env = "MAILCLASSIFY_CONTRACT", value_name = "CONTRACT")]
    contract: Option<TextContract>,

    /// Give up on a request after this many seconds (0 waits forever)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Language (en, pt). Defaults to system locale.
    #[arg(long, global = true, value_name = "LANG")]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an email
    #[command(group(ArgGroup::new("input").args(["text", "file", "stdin"])))]
    Classify {
        /// Email text
        #[arg(long, value_name = "TEXT")]
        text: Option<String>,
        /// A .txt or .pdf file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Read the email text from stdin
        #[arg(long)]
        stdin: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Copy the suggested response to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Print or submit a sample email
    Example {
        /// produtivo or improdutivo
        kind: SampleKind,
        /// Send it to the service instead of printing it
        #[arg(long)]
        submit: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the service
    Health {
        /// Print the service status as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Where `classify` takes its input from.
enum InputSource {
    Text(String),
    File(PathBuf),
    Stdin,
}

/// Detect language from --lang, the config file or the system, before clap processes --help.
fn detect_lang_early(config: &Config) -> i18n::Lang {
    let args: Vec<String> = std::env::args().collect();
    for (i, arg) in args.iter().enumerate() {
        let code = if arg == "--lang" {
            args.get(i + 1).map(String::as_str)
        } else {
            arg.strip_prefix("--lang=")
        };
        if let Some(lang) = code.and_then(i18n::Lang::from_code) {
            return lang;
        }
    }
    config
        .general
        .lang
        .as_deref()
        .and_then(i18n::Lang::from_code)
        .or_else(i18n::detect_system_lang)
        .unwrap_or(i18n::Lang::En)
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command()
        .about(i18n::app_about())
        .long_about(i18n::app_long_about())
        .after_help(i18n::app_after_help());

    let names: Vec<String> = cmd
        .get_subcommands()
        .map(|s| s.get_name().to_string())
        .collect();
    for name in names {
        let about = match name.as_str() {
            "classify" => i18n::help_cmd_classify(),
            "example" => i18n::help_cmd_example(),
            "health" => i18n::help_cmd_health(),
            "completions" => i18n::help_cmd_completions(),
            "manpage" => i18n::help_cmd_manpage(),
            _ => continue,
        };
        cmd = cmd.mut_subcommand(name, |s| s.about(about));
    }

    cmd
}

fn main() -> anyhow::Result<ExitCode> {
    let mut config = mailclassify::config::load_config();

    // Detect language BEFORE clap parsing so --help is localized
    i18n::set_lang(detect_lang_early(&config));

    let matches = build_localized_command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    if let Some(server) = cli.server {
        config.server.base_url = server;
    }
    if let Some(contract) = cli.contract {
        config.server.text_contract = contract;
    }
    if let Some(secs) = cli.timeout {
        config.server.request_timeout_secs = Some(secs);
    }

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // The TUI owns the terminal, so it only logs to the file
    setup_logging(log_level, &config, cli.command.is_some());

    match cli.command {
        None => {
            let (runtime, classifier, server_label) = connect(&config)?;
            cmd_tui(&config, &runtime, classifier, server_label)
        }
        Some(Commands::Classify {
            text,
            file,
            stdin,
            json,
            copy,
        }) => {
            let source = match (text, file, stdin) {
                (Some(text), _, _) => InputSource::Text(text),
                (_, Some(path), _) => InputSource::File(path),
                (_, _, true) => InputSource::Stdin,
                _ => anyhow::bail!("{}", i18n::cli_choose_input()),
            };
            let (runtime, classifier, _) = connect(&config)?;
            cmd_classify(&config, &runtime, classifier, source, json, copy)
        }
        Some(Commands::Example {
            kind,
            submit: true,
            json,
        }) => {
            let (runtime, classifier, _) = connect(&config)?;
            let source = InputSource::Text(kind.text().to_string());
            cmd_classify(&config, &runtime, classifier, source, json, false)
        }
        Some(Commands::Example { kind, json, .. }) => cmd_print_example(kind, json),
        Some(Commands::Health { json }) => {
            let (runtime, classifier, _) = connect(&config)?;
            cmd_health(&runtime, classifier, json)
        }
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

/// Build the async runtime and the service client.
fn connect(config: &Config) -> anyhow::Result<(Runtime, Arc<dyn Classifier>, String)> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let http = HttpClassifier::new(&config.server)?;
    let server_label = http.base_url().as_str().trim_end_matches('/').to_string();
    let classifier: Arc<dyn Classifier> = Arc::new(http);
    Ok((runtime, classifier, server_label))
}

/// Set up tracing with optional stderr output and file logging.
fn setup_logging(level: &str, config: &Config, to_stderr: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = to_stderr
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    // Try to set up file logging
    let log_dir = mailclassify::config::cache_dir(config);
    let file_layer = std::fs::create_dir_all(&log_dir).is_ok().then(|| {
        let file_appender = tracing_appender::rolling::never(&log_dir, "mailclassify.log");
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<ExitCode> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mailclassify", &mut std::io::stdout());
    Ok(ExitCode::SUCCESS)
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<ExitCode> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_tui(
    config: &Config,
    runtime: &Runtime,
    classifier: Arc<dyn Classifier>,
    server_label: String,
) -> anyhow::Result<ExitCode> {
    let controller = Controller::new(
        ControllerSettings::from(config),
        classifier,
        NoticeBoard::new(Duration::from_secs(config.ui.toast_secs)),
        ClipboardChain::system(&config.clipboard),
    );
    mailclassify::tui::run_tui(controller, runtime.handle().clone(), server_label)?;
    Ok(ExitCode::SUCCESS)
}

/// Submit one email and print the result.
///
/// Validation and request failures are reported by the notifier and turn
/// into a failing exit code.
fn cmd_classify(
    config: &Config,
    runtime: &Runtime,
    classifier: Arc<dyn Classifier>,
    source: InputSource,
    json: bool,
    copy: bool,
) -> anyhow::Result<ExitCode> {
    let clipboard = if copy {
        ClipboardChain::one_shot(&config.clipboard)
    } else {
        ClipboardChain::new(
            None,
            Box::new(mailclassify::clipboard::CommandCopier::from_config(
                &config.clipboard,
            )),
        )
    };
    let mut controller = Controller::new(
        ControllerSettings::from(config),
        classifier,
        ConsoleNotifier::new(),
        clipboard,
    );

    match source {
        InputSource::Text(text) => {
            controller.switch_tab(InputTab::Text);
            controller.set_text(text);
        }
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            controller.switch_tab(InputTab::Text);
            controller.set_text(text);
        }
        InputSource::File(path) => {
            controller.switch_tab(InputTab::File);
            if controller.select_path(&path).is_err() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    tracing::info!(server = %config.server.base_url, "{}", i18n::cli_connecting());
    if runtime.block_on(controller.submit()).is_err() {
        return Ok(ExitCode::FAILURE);
    }

    let Some(result) = controller.state().last_result.clone() else {
        return Ok(ExitCode::FAILURE);
    };
    if json {
        print_result_json(&result)?;
    } else {
        print_result_table(&result);
    }

    if copy {
        match controller.copy_response() {
            Ok(CopyOutcome::Copied(_)) => {}
            Ok(CopyOutcome::NeedsManualSelection) | Err(_) => return Ok(ExitCode::FAILURE),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_print_example(kind: SampleKind, json: bool) -> anyhow::Result<ExitCode> {
    if json {
        let out = serde_json::json!({
            "example": kind.name(),
            "text": kind.text(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", kind.text());
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_health(
    runtime: &Runtime,
    classifier: Arc<dyn Classifier>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let health = match runtime.block_on(classifier.health()) {
        Ok(health) => health,
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            eprintln!("  \u{2716} {}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&health)?);
    } else {
        print_health_table(&health);
    }

    if health.is_healthy() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("  \u{2716} {}", i18n::err_service_unhealthy());
        Ok(ExitCode::FAILURE)
    }
}

/// Print a result in a human-readable layout.
fn print_result_table(result: &ClassificationResult) {
    use mailclassify::format::format_number;

    println!();
    println!("  {:<20} {}", i18n::lbl_category(), result.category);
    if let Some(name) = &result.filename {
        println!("  {:<20} {}", i18n::lbl_file(), name);
    }
    println!(
        "  {:<20} {}",
        i18n::lbl_char_count(),
        format_number(result.char_count)
    );
    println!(
        "  {:<20} {}",
        i18n::lbl_word_count(),
        format_number(result.word_count)
    );
    if let Some(reasoning) = result.reasoning.as_deref().filter(|r| !r.trim().is_empty()) {
        println!("  {:<20} {}", i18n::lbl_reasoning(), reasoning);
    }
    println!();
    println!("  {}:", i18n::lbl_suggested_response());
    for line in result.suggested_response.lines() {
        println!("    {line}");
    }
    println!();
}

/// Print a result as JSON.
fn print_result_json(result: &ClassificationResult) -> anyhow::Result<()> {
    let out = serde_json::json!({
        "category": result.category,
        "productive": result.category.is_productive(),
        "suggested_response": result.suggested_response,
        "char_count": result.char_count,
        "word_count": result.word_count,
        "reasoning": result.reasoning,
        "filename": result.filename,
        "classified_at": chrono::Local::now().to_rfc3339(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn print_health_table(health: &HealthStatus) {
    println!();
    println!("  {:<20} {}", i18n::lbl_service(), health.service);
    println!("  {:<20} {}", i18n::lbl_status(), health.status);
    println!();
}
