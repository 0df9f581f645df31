//! Dossier CLI — a terminal chat client for company research.

use anyhow::{Context, Result};
use clap::Parser;
use dossier_api::HttpProvider;
use dossier_chat::{Chat, ChatState};
use dossier_config::{CliOverrides, DossierConfig};
use dossier_session::{SessionStore, SessionSummary};
use dossier_terminal::{Spinner, render_answer, style};
use dossier_types::{Message, Role, ellipsize};
use std::future::Future;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dossier", version, about = "A terminal client for company research")]
struct Cli {
    /// Send a single question and print the answer (non-interactive)
    #[arg(short, long)]
    print: Option<String>,

    /// Resume a saved session by id
    #[arg(long)]
    resume: Option<String>,

    /// Research API base URL (overrides DOSSIER_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Enable verbose/debug logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = DossierConfig::load(CliOverrides {
        api_url: cli.api_url,
    })
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    tracing::debug!("Using API base URL {}", config.api_base_url);

    let provider = HttpProvider::new(&config.api_base_url)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Failed to create API client")?;
    let store = SessionStore::new(config.config_dir.clone())
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let mut chat = Chat::new(Arc::new(provider), store);

    if let Some(question) = cli.print {
        // Print mode: single query, render, exit.
        let already = chat.state().messages().len();
        with_spinner(chat.send(&question))
            .await
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        let mut rendered = already;
        render_new_messages(&chat, &mut rendered);
        return Ok(());
    }

    repl(chat, &config, cli.resume).await
}

async fn repl(mut chat: Chat, config: &DossierConfig, resume_id: Option<String>) -> Result<()> {
    eprintln!(
        "dossier v{} (api: {})",
        env!("CARGO_PKG_VERSION"),
        config.api_base_url
    );
    eprintln!("Ask about a company. Type /help for commands, Ctrl+D to exit.\n");

    let mut rendered = 0;

    if let Some(id) = &resume_id {
        match with_spinner(chat.load_session(id)).await {
            Ok(()) => eprintln!("Resumed session {id}\n"),
            Err(e) => eprintln!("Failed to resume: {e}\n"),
        }
    }
    render_new_messages(&chat, &mut rendered);
    render_options(chat.state());

    let stdin = io::stdin();

    loop {
        eprint!("> ");
        io::stderr().flush()?;

        let mut input = String::new();
        let bytes_read = stdin.lock().read_line(&mut input)?;
        if bytes_read == 0 {
            eprintln!();
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(handled) = handle_slash_command(input, &mut chat, &mut rendered).await {
            match handled {
                SlashResult::Continue => continue,
                SlashResult::Break => break,
                SlashResult::Unknown => {
                    eprintln!("Unknown command: {input}. Type /help for available commands.");
                    continue;
                }
            }
        }

        // A bare number picks a suggested follow-up when any are on offer.
        let result = match parse_option_pick(input, chat.state().options().len()) {
            Some(index) => with_spinner(chat.choose_option(index)).await,
            None => with_spinner(chat.send(input)).await,
        };
        if let Err(e) = result {
            eprintln!("Error: {e}");
        }

        render_new_messages(&chat, &mut rendered);
        render_options(chat.state());
    }

    Ok(())
}

enum SlashResult {
    Continue,
    Break,
    Unknown,
}

async fn handle_slash_command(
    input: &str,
    chat: &mut Chat,
    rendered: &mut usize,
) -> Option<SlashResult> {
    if !input.starts_with('/') {
        return None;
    }

    let (cmd, args) = match input.split_once(' ') {
        Some((c, a)) => (c, Some(a.trim())),
        None => (input, None),
    };

    match cmd {
        "/quit" | "/exit" => Some(SlashResult::Break),
        "/help" => {
            print_help();
            Some(SlashResult::Continue)
        }
        "/new" => {
            chat.new_chat();
            *rendered = 0;
            eprintln!("Started a new chat.\n");
            render_new_messages(chat, rendered);
            Some(SlashResult::Continue)
        }
        "/sessions" => {
            handle_sessions_list(chat).await;
            Some(SlashResult::Continue)
        }
        "/resume" => {
            if let Some(arg) = args.filter(|a| !a.is_empty()) {
                let id = resolve_session_id(&chat.sessions().await, arg);
                match with_spinner(chat.load_session(&id)).await {
                    Ok(()) => {
                        eprintln!("Resumed session {id}\n");
                        *rendered = 0;
                        render_new_messages(chat, rendered);
                    }
                    Err(e) => eprintln!("Failed to resume: {e}"),
                }
            } else {
                eprintln!("Usage: /resume <session-id>");
            }
            Some(SlashResult::Continue)
        }
        "/delete" => {
            if let Some(arg) = args.filter(|a| !a.is_empty()) {
                let id = resolve_session_id(&chat.sessions().await, arg);
                match chat.delete_session(&id).await {
                    Ok(()) => eprintln!("Deleted session {id} from history."),
                    Err(e) => eprintln!("Failed to delete: {e}"),
                }
            } else {
                eprintln!("Usage: /delete <session-id>");
            }
            Some(SlashResult::Continue)
        }
        _ => Some(SlashResult::Unknown),
    }
}

async fn handle_sessions_list(chat: &Chat) {
    let sessions = chat.sessions().await;
    if sessions.is_empty() {
        eprintln!("No saved sessions.");
        return;
    }
    eprintln!("Saved sessions:");
    for s in &sessions {
        let company = if s.company.is_empty() {
            "(unknown company)".to_string()
        } else {
            ellipsize(&s.company, 40)
        };
        eprintln!("  {:<8}  {:>8}  {}", s.short_id(), s.age(), company);
    }
}

/// Expand a unique session-id prefix to the full id; anything else passes
/// through unchanged (the server reports unknown ids).
fn resolve_session_id(sessions: &[SessionSummary], arg: &str) -> String {
    let mut matches = sessions.iter().filter(|s| s.session_id.starts_with(arg));
    match (matches.next(), matches.next()) {
        (Some(only), None) => only.session_id.clone(),
        _ => arg.to_string(),
    }
}

/// Interpret input as a 1-based follow-up pick. Returns the 0-based index,
/// or None when it isn't a number or no options are on offer.
fn parse_option_pick(input: &str, option_count: usize) -> Option<usize> {
    if option_count == 0 {
        return None;
    }
    let n = input.parse::<usize>().ok()?;
    if n >= 1 && n <= option_count {
        Some(n - 1)
    } else {
        None
    }
}

/// Run a future with the loading spinner shown.
async fn with_spinner<F, T>(fut: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = Spinner::start("Researching...");
    let out = fut.await;
    spinner.stop().await;
    out
}

/// Print messages appended since the last render.
fn render_new_messages(chat: &Chat, rendered: &mut usize) {
    let messages = chat.state().messages();
    for msg in &messages[*rendered..] {
        print_message(msg);
    }
    *rendered = messages.len();
}

fn print_message(msg: &Message) {
    match msg.role {
        Role::User => {
            let text = msg.text.as_deref().unwrap_or("");
            println!("{}", style::dim(&format!("you: {text}")));
        }
        Role::Bot => match &msg.answer {
            Some(answer) => println!("{}", render_answer(answer, msg.company.as_deref())),
            None => println!("{}", msg.text.as_deref().unwrap_or("")),
        },
    }
    println!();
}

fn render_options(state: &ChatState) {
    if state.options().is_empty() {
        return;
    }
    println!("{}", style::section_title("Follow-up questions"));
    for (i, option) in state.options().iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    println!("{}", style::dim("Enter a number to pick one, or ask your own."));
    println!();
}

fn print_help() {
    eprintln!("Available commands:");
    eprintln!("  /help     — Show this help");
    eprintln!("  /sessions — List saved sessions");
    eprintln!("  /resume   — Resume a saved session by id");
    eprintln!("  /new      — Start a new chat (history is kept)");
    eprintln!("  /delete   — Remove a saved session from history");
    eprintln!("  /quit     — Exit");
}
