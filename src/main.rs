//! Purpose: `carton` CLI entry point and command dispatch bootstrap.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Errors are emitted as one-line JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: All cart mutations go through `api` types.
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use carton::api::{CartItem, CartOptions, Error, ErrorKind, LocalClient, to_exit_code};

mod command_dispatch;

use command_dispatch::dispatch_command;

#[derive(Parser)]
#[command(name = "carton", version, about = "Persistent shopping-cart storage")]
struct Cli {
    /// Store directory holding cart files (defaults to ~/.carton/carts).
    #[arg(long, global = true, value_name = "DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add an item to a cart.
    Add {
        cart: String,
        /// Item name, stored verbatim.
        #[arg(long)]
        name: String,
        /// Item price, an opaque display string like "$20".
        #[arg(long)]
        price: String,
    },
    /// Show the items in a cart, in the order they were added.
    Items {
        cart: String,
        /// Always emit the JSON envelope, even on a terminal.
        #[arg(long)]
        json: bool,
    },
    /// Remove every item from a cart.
    Clear { cart: String },
    /// List the carts in the store directory.
    List,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let client = match cli.dir {
        Some(dir) => LocalClient::new().with_store_dir(dir),
        None => LocalClient::new(),
    };
    let exit_code = match dispatch_command(cli.command, &client) {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

fn emit_json(value: Value) {
    println!("{value}");
}

fn emit_error(err: &Error) {
    // `Display` already leads with the kind; keep the envelope fields
    // orthogonal by preferring the bare message.
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => err.to_string(),
    };
    let mut inner = serde_json::Map::new();
    inner.insert("kind".to_string(), json!(kind_label(err.kind())));
    inner.insert("message".to_string(), json!(message));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    eprintln!("{}", json!({ "error": Value::Object(inner) }));
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Internal => "internal",
        ErrorKind::Usage => "usage",
        ErrorKind::NotFound => "not-found",
        ErrorKind::Unavailable => "unavailable",
        ErrorKind::Corrupt => "corrupt",
        ErrorKind::Io => "io",
    }
}

fn item_json(item: &CartItem) -> Value {
    json!({ "name": item.name, "price": item.price })
}
