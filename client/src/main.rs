//! # Grounded Chat Terminal
//!
//! Line-oriented driver over a [`Session`]. Reads commands from stdin, prints results
//! to stdout; logs go to stderr (`RUST_LOG`, default `warn`).
//!
//! Environment (a `.env` file is read if present): `RELAY_URL` (default
//! `http://127.0.0.1:3001`), `PERSONA`.

use std::path::Path;

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use client::app::{Command, JobOutcome, Session, SessionSettings};
use client::core::service::RelayService;
use client::services::api::ApiClient;
use shared::{format_size, Role};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn print_message(index: usize, role: Role, content: &str, video_url: Option<&str>) {
    println!("[{}] {}: {}", index, role.as_str(), content);
    if let Some(url) = video_url {
        println!("    video: {}", url);
    }
}

/// Generate a video, cancelling the poll on Ctrl-C.
async fn run_video(session: &mut Session, relay: &dyn RelayService, message: usize, image: &Path) {
    let bytes = match tokio::fs::read(image).await {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("! Could not read {}: {}", image.display(), e);
            return;
        }
    };
    let image_base64 = STANDARD.encode(bytes);

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    println!("Generating video for message {} (Ctrl-C to cancel)...", message);
    let result = session.generate_video(relay, message, &image_base64, &cancel).await;
    watcher.abort();

    match result {
        Ok(JobOutcome::Completed { video_url, checks }) => {
            println!("Video ready after {} checks: {}", checks, video_url);
        }
        Ok(JobOutcome::Cancelled { .. }) => println!("Video generation cancelled"),
        Ok(other) => {
            if let Err(e) = other.into_result() {
                println!("! Video generation failed: {}", e);
            }
        }
        Err(e) => println!("! Video generation failed: {}", e),
    }
}

/// Run one command. Returns `false` when the loop should stop.
async fn handle(session: &mut Session, relay: &ApiClient, command: Command) -> bool {
    match command {
        Command::Empty => {}
        Command::Help => println!("{}", client::app::command::HELP),
        Command::Quit => return false,
        Command::Upload(path) => match session.load_document(&path).await {
            Ok(doc) => println!("Added {} ({})", doc.name, format_size(doc.size)),
            Err(e) => println!("! {}", e),
        },
        Command::Docs => {
            if session.documents().is_empty() {
                println!("No documents");
            }
            for (i, doc) in session.documents().iter().enumerate() {
                println!("[{}] {} ({:?}, {})", i, doc.name, doc.kind, format_size(doc.size));
            }
        }
        Command::RemoveDocument(i) => match session.remove_document(i) {
            Some(doc) => println!("Removed {}", doc.name),
            None => println!("! No document at index {}", i),
        },
        Command::Search(queries) => {
            println!("Searching...");
            match session.scrape_web(relay, queries).await {
                Ok(added) => println!(
                    "Added {} web sources ({} total)",
                    added,
                    session.web_sources().len()
                ),
                Err(e) => println!("! Web search failed: {}", e),
            }
        }
        Command::Sources => {
            if session.web_sources().is_empty() {
                println!("No web sources");
            }
            for (i, source) in session.web_sources().iter().enumerate() {
                println!("[{}] {}\n    {}", i, source.title, source.url);
            }
        }
        Command::RemoveSource(i) => match session.remove_web_source(i) {
            Some(source) => println!("Removed {}", source.url),
            None => println!("! No web source at index {}", i),
        },
        Command::Activate => match session.activate() {
            Ok(()) => {
                if let Some(banner) = session.messages().first() {
                    println!("{}", banner.content);
                }
            }
            Err(e) => println!("! {}", e),
        },
        Command::History => {
            for (i, msg) in session.messages().iter().enumerate() {
                print_message(i, msg.role, &msg.content, msg.video_url.as_deref());
            }
        }
        Command::Video { message, image } => run_video(session, relay, message, &image).await,
        Command::Reset => {
            session.reset();
            println!("Conversation cleared");
        }
        Command::Chat(text) => {
            if !session.is_active() {
                println!("Not activated yet. Add sources, then /activate.");
            } else if session.send(relay, &text).await.is_some() {
                let index = session.messages().len() - 1;
                let reply = &session.messages()[index];
                print_message(index, reply.role, &reply.content, None);
            }
        }
    }
    true
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let relay = ApiClient::from_env();
    let settings = match std::env::var("PERSONA") {
        Ok(persona) if !persona.trim().is_empty() => SessionSettings::new(persona.trim()),
        _ => SessionSettings::default(),
    };
    let mut session = Session::new(settings);

    println!("Grounded chat - relay at {}. Type /help for commands.", relay.base_url());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let keep_going = match Command::parse(&line) {
            Ok(command) => handle(&mut session, &relay, command).await,
            Err(e) => {
                println!("! {}", e);
                true
            }
        };
        if !keep_going {
            break;
        }
    }

    Ok(())
}
