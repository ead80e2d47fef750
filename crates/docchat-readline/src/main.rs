use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::history::DefaultHistory;
use tokio::sync::broadcast;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use docchat_application::{ChatOrchestrator, DispatchOutcome};
use docchat_core::config::ClientConfig;
use docchat_core::document::DocumentHandle;
use docchat_core::event::ChatEvent;
use docchat_core::service::DocumentService;
use docchat_core::session::SessionPolicy;
use docchat_core::suggestion::SuggestionEngine;
use docchat_infrastructure::{ConfigService, DocChatPaths};
use docchat_interaction::HttpDocumentService;

mod commands;
mod helper;
mod pdf_viewer;
mod render;

use commands::{Command, help_text};
use helper::ChatHelper;
use pdf_viewer::PdfViewer;

const LOG_ENV_VAR: &str = "DOCCHAT_LOG";

#[derive(Parser)]
#[command(name = "docchat")]
#[command(about = "DocChat - ask questions about your PDF documents", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Service base URL; takes precedence over DOCCHAT_ENDPOINT and the config file
    #[arg(long)]
    endpoint: Option<String>,

    /// Session policy: single or multi
    #[arg(long)]
    policy: Option<SessionPolicy>,

    /// Write the effective configuration back to the config file
    #[arg(long)]
    save_config: bool,
}

/// Installs a daily-rolling file subscriber so log output stays off the prompt.
fn init_logging() -> Result<WorkerGuard> {
    let log_dir = DocChatPaths::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::daily(&log_dir, "docchat.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };

    let mut config = match &cli.endpoint {
        Some(endpoint) => config_service.load_with_endpoint_override(Some(endpoint.clone()))?,
        None => config_service.load()?,
    };
    if let Some(policy) = cli.policy {
        config.policy = policy;
    }

    if cli.save_config {
        config_service.save(&config)?;
        println!(
            "{}",
            format!("Saved configuration to {}", config_service.path().display()).bright_black()
        );
    }
    Ok(config)
}

fn print_event(event: &ChatEvent) {
    for line in render::event_lines(event) {
        println!("{line}");
    }
}

/// Drives `task` while printing the events it publishes as they arrive.
async fn follow<F: Future>(task: F, events: &mut broadcast::Receiver<ChatEvent>) -> F::Output {
    tokio::pin!(task);
    loop {
        tokio::select! {
            output = &mut task => {
                while let Ok(event) = events.try_recv() {
                    print_event(&event);
                }
                return output;
            }
            Ok(event) = events.recv() => print_event(&event),
        }
    }
}

async fn ask(chat: &ChatOrchestrator) {
    if chat.send_input().await == DispatchOutcome::Ignored {
        println!("{}", "A request is already in progress.".yellow());
    }
}

async fn run_command(chat: &ChatOrchestrator, command: Command, listed: &mut Vec<&'static str>) {
    match command {
        Command::Ask(question) => {
            chat.set_input(question);
            ask(chat).await;
        }
        Command::Open(path) => {
            if let Err(err) = chat.select_document(DocumentHandle::from_path(path)) {
                tracing::debug!("[Repl] Selection rejected: {}", err);
            }
        }
        Command::Upload(path) => {
            let result = match path {
                Some(path) => chat.submit(DocumentHandle::from_path(path)).await,
                None => chat.upload_selected().await,
            };
            if let Err(err) = result {
                tracing::debug!("[Repl] Upload not completed: {}", err);
            }
        }
        Command::Docs => match chat.policy() {
            SessionPolicy::Multi => {
                for line in render::document_lines(&chat.uploaded_documents()) {
                    println!("{line}");
                }
            }
            SessionPolicy::Single => println!("{}", render::session_line(chat.session().as_ref())),
        },
        Command::Page(page_number) => match chat.render_page(page_number) {
            Ok(page) => println!("{}", page.content.bright_magenta()),
            // Viewer failures arrive as a notice.
            Err(err) if err.is_viewer_load() => {}
            Err(err) => println!("{}", err.to_string().red()),
        },
        Command::Suggest(text) => {
            *listed = chat.set_input(text);
            if listed.is_empty() {
                println!("{}", "No matching suggestions".bright_black());
            }
            for line in render::suggestion_lines(listed) {
                println!("{line}");
            }
        }
        Command::Use(index) => match listed.get(index - 1) {
            Some(suggestion) => {
                chat.use_suggestion(suggestion);
                println!("{}", format!("> {suggestion}").green());
                ask(chat).await;
            }
            None => println!(
                "{}",
                format!("No suggestion #{index}; run /suggest first").bright_black()
            ),
        },
        Command::Clear => {
            if let Err(err) = chat.clear_session().await {
                // Transport failures already produced a notice.
                if !err.is_transport() {
                    println!("{}", err.to_string().red());
                }
            }
        }
        Command::Help => println!("{}", help_text().bright_black()),
        Command::Invalid(message) => println!("{}", message.bright_black()),
        Command::Quit => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging()?;
    let config = load_config(&cli)?;

    tracing::info!(
        "[Bootstrap] Starting against {} ({} policy)",
        config.endpoint_base(),
        config.policy
    );

    // ===== Orchestrator Setup =====
    let service = Arc::new(HttpDocumentService::new(&config));
    let chat = ChatOrchestrator::new(config.policy, service.clone(), Arc::new(PdfViewer));
    let mut events = chat.subscribe();

    println!("{}", "=== DocChat ===".bright_magenta().bold());
    println!(
        "{}",
        format!(
            "Service: {} ({} policy). Type '/help' for commands.",
            config.endpoint_base(),
            config.policy
        )
        .bright_black()
    );

    if let Err(err) = service.health(config.policy).await {
        tracing::warn!("[Bootstrap] Health check failed: {}", err);
        println!(
            "{}",
            format!("* Service not reachable yet: {}", err.notice_text()).yellow()
        );
    }
    println!();

    // ===== REPL Setup =====
    let mut rl: Editor<ChatHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ChatHelper::new(SuggestionEngine::default())));
    let mut listed: Vec<&'static str> = Vec::new();

    // ===== Main REPL Loop =====
    loop {
        let prompt = if chat.can_dispatch() {
            ">> "
        } else {
            "(no document) >> "
        };

        match rl.readline(prompt) {
            Ok(line) => {
                let Some(command) = Command::parse(&line) else {
                    continue;
                };
                let _ = rl.add_history_entry(line.as_str());

                if command == Command::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                follow(run_command(&chat, command, &mut listed), &mut events).await;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    tracing::info!("[Bootstrap] Exiting with {} turn(s)", chat.turns().len());
    Ok(())
}
