use promptdeck::logging::{init_tracing, preview, setup_panic_hook};
use promptdeck::playground::{ConversationState, ConversationStore};
use promptdeck::router::ChannelNavigator;
use promptdeck::theme::ThemeStore;
use promptdeck::toasts::{ToastKind, ToastQueue};
use promptdeck::*;

use clap::Parser;
use colored::*;
use std::sync::Arc;
use std::time::Duration;

fn role_label(role: &Role, dark: bool) -> ColoredString {
    let text = format!("[{}]", role.as_str().to_uppercase());
    let label = text.as_str();
    let colored = match role {
        Role::System => label.yellow(),
        Role::User => label.cyan(),
        Role::Assistant => label.green(),
        Role::Other(_) => label.magenta(),
    };
    if dark {
        colored.bold()
    } else {
        colored
    }
}

fn print_transcript(state: &ConversationState, dark: bool) {
    let model = if state.model.is_empty() {
        "(unset)"
    } else {
        state.model.as_str()
    };
    println!(
        "{} {}  {} {}  {} {}",
        "model:".dimmed(),
        model,
        "temperature:".dimmed(),
        state.temperature,
        "stream:".dimmed(),
        state.streaming_enabled
    );
    println!();
    println!("{}", role_label(&Role::System, dark));
    println!("{}", state.system_prompt);

    for msg in &state.messages {
        println!();
        println!("{}", role_label(&msg.role, dark));
        println!("{}", msg.content);
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let _guard = match init_tracing(&args.log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!(
                "Failed to initialize logging in {}: {}",
                args.log_dir.display(),
                e
            );
            std::process::exit(1);
        }
    };
    setup_panic_hook();

    let theme = ThemeStore::load(&args.theme_file);
    let toasts = ToastQueue::new(Duration::from_millis(args.toast_ttl_ms));
    let (navigator, mut nav_rx) = ChannelNavigator::new();
    let mut store = ConversationStore::new(Arc::new(navigator));

    if let Some(t) = args.temperature {
        store.set_temperature(t);
    }
    if args.no_stream {
        store.set_streaming_enabled(false);
    }

    let record = match args.read_record() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(record = %args.record, error = %e, "failed to read log record");
            eprintln!("Failed to read log record {}: {}", args.record, e.inner);
            std::process::exit(1);
        }
    };

    store.load_from_log(&record);

    while let Ok(route) = nav_rx.try_recv() {
        tracing::info!(target: "router", route = route.name(), path = route.path(), "navigate");
    }

    let label = match record.id {
        Some(id) => format!("log #{}", id),
        None => "log".to_string(),
    };
    toasts.success(format!("Loaded {} into the playground", label));
    if let Some(error) = record.content.as_ref().and_then(|c| c.error.as_deref()) {
        toasts.error(format!("Original request failed: {}", preview(error)));
    }

    match args.format {
        OutputFormat::Pretty => print_transcript(store.state(), theme.is_dark()),
        OutputFormat::Json => match serde_json::to_string_pretty(&store.state().replay_request()) {
            Ok(body) => println!("{}", body),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize replay request");
                eprintln!("Failed to serialize replay request: {}", e);
                std::process::exit(1);
            }
        },
    }

    for toast in toasts.toasts() {
        let marker = match toast.kind {
            ToastKind::Success => "✔".green(),
            ToastKind::Error => "✖".red(),
            ToastKind::Info => "ℹ".blue(),
        };
        eprintln!("{} {}", marker, toast.message);
    }
    toasts.shutdown();
}
