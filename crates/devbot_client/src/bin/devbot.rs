//! devbot: terminal chat client for the assistant endpoint.
//!
//! Resolves config, opens the WebSocket connection, then either answers a
//! single question given on the command line or runs a line-based chat loop
//! on stdin. Assistant replies are decoded and rendered with highlighted
//! code blocks and suggested follow-up prompts.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use colored::Colorize;
use devbot_client::client::{self, ChatConnection, ClientError};
use devbot_client::config;
use devbot_client::content::{ContentBlock, DecodedMessage};
use devbot_client::highlight::{Token, TokenClass};
use devbot_client::session::SessionStore;

struct CliArgs {
    config_path: Option<PathBuf>,
    question: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config_path = None;
    let mut rest = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--config" {
            match args.get(i + 1) {
                Some(path) => {
                    config_path = Some(PathBuf::from(path));
                    i += 2;
                }
                None => {
                    eprintln!("Error: --config requires a path");
                    process::exit(1);
                }
            }
            continue;
        }
        rest.push(args[i].clone());
        i += 1;
    }
    let question = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };
    CliArgs {
        config_path,
        question,
    }
}

fn resolve_config(args: &CliArgs) -> config::Config {
    // 1. --config flag, 2. DEVBOT_CONFIG env var — explicit paths must load.
    let explicit = args
        .config_path
        .clone()
        .or_else(|| std::env::var("DEVBOT_CONFIG").ok().map(PathBuf::from));
    if let Some(path) = explicit {
        match config::load(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                eprintln!(
                    "Error: failed to load config from {}: {}",
                    path.display(),
                    e
                );
                process::exit(1);
            }
        }
    }
    // 3. Default path; a missing file falls back to built-in defaults.
    match config::default_config_path() {
        Some(path) if path.exists() => config::load(&path).unwrap_or_else(|e| {
            eprintln!(
                "Error: failed to load config from {}: {}",
                path.display(),
                e
            );
            process::exit(1);
        }),
        _ => config::Config::default(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = parse_args();
    let cfg = resolve_config(&args);
    let url = cfg.server_url();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error: failed to create runtime: {}", e);
            process::exit(1);
        });

    rt.block_on(async {
        let mut store = SessionStore::new();
        store.create_session();

        let mut conn = match client::open(&url, &store).await {
            Ok(conn) => conn,
            Err(e) => {
                eprintln!("Error: connection failed: {}", e);
                process::exit(1);
            }
        };

        if let Some(question) = &args.question {
            ask(&mut conn, &mut store, question).await;
        } else {
            greet(&cfg);
            repl(&mut conn, &mut store).await;
        }
        conn.close().await;
    });
}

fn greet(cfg: &config::Config) {
    println!("{}", "How can I help you today?".bold());
    for prompt in &cfg.chat.starter_prompts {
        println!("  {} {}", "-".dimmed(), prompt);
    }
}

async fn repl(conn: &mut ChatConnection, store: &mut SessionStore) {
    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(command) = line.strip_prefix('/') {
            run_command(command, store);
            continue;
        }
        ask(conn, store, line).await;
        if !conn.is_connected() {
            eprintln!("{}", "Disconnected.".red());
            break;
        }
    }
}

fn run_command(command: &str, store: &mut SessionStore) {
    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("new") => {
            store.create_session();
            println!("Started a new chat.");
        }
        Some("sessions") => {
            for (index, session) in store.sessions().iter().enumerate() {
                let marker = if Some(session.id.as_str()) == store.active_id() {
                    "*"
                } else {
                    " "
                };
                println!("{} {}. {}", marker, index + 1, session.preview());
            }
        }
        Some("switch") => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n >= 1 && n <= store.sessions().len() => {
                let id = store.sessions()[n - 1].id.clone();
                if store.set_active(&id).is_ok() {
                    println!("Switched to chat {}.", n);
                }
            }
            _ => eprintln!("Usage: /switch <number> (see /sessions)"),
        },
        _ => eprintln!("Commands: /new, /sessions, /switch <number>"),
    }
}

async fn ask(conn: &mut ChatConnection, store: &mut SessionStore, text: &str) {
    match conn.send(store, text).await {
        Ok(()) => {}
        Err(ClientError::NotConnected) => {
            eprintln!("{}", "Not connected - message not sent.".red());
            return;
        }
        Err(e) => {
            eprintln!("Error: send failed: {}", e);
            return;
        }
    }
    match conn.recv(store).await {
        Ok(Some(reply)) => render(&reply.decoded),
        Ok(None) => eprintln!("Connection closed by server."),
        Err(e) => eprintln!("Error: receive failed: {}", e),
    }
}

fn render(decoded: &DecodedMessage) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for block in &decoded.blocks {
        match block {
            ContentBlock::Prose { text } => {
                let _ = write!(out, "{}", text);
            }
            ContentBlock::InlineCode { text } => {
                let _ = write!(out, "{}", text.cyan());
            }
            ContentBlock::FencedCode {
                language,
                code,
                tokens,
            } => {
                let _ = writeln!(out);
                if let Some(language) = language {
                    let _ = writeln!(out, "{}", language.dimmed());
                }
                if tokens.is_empty() {
                    let _ = writeln!(out, "{}", code);
                } else {
                    for token in tokens {
                        let _ = write!(out, "{}", paint(token));
                    }
                    let _ = writeln!(out);
                }
            }
        }
    }
    let _ = writeln!(out);
    if !decoded.suggested_prompts.is_empty() {
        let _ = writeln!(out, "{}", "Suggested:".bold());
        for (index, prompt) in decoded.suggested_prompts.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", index + 1, prompt);
        }
    }
    let _ = out.flush();
}

/// Terminal palette for classified tokens.
fn paint(token: &Token) -> colored::ColoredString {
    let text = token.text.as_str();
    match token.class {
        TokenClass::Keyword => text.magenta(),
        TokenClass::String => text.yellow(),
        TokenClass::Number => text.green(),
        TokenClass::Comment => text.dimmed(),
        TokenClass::Function => text.bright_yellow(),
        TokenClass::Type => text.cyan(),
        TokenClass::Identifier => text.blue(),
        TokenClass::Plain => text.normal(),
    }
}
