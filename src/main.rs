use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use stacklist::dragdrop::{self, DragSpot};
use stacklist::editor;
use stacklist::hierarchy::{LoadOutcome, Snapshot};
use stacklist::model::{Item, ParentKind};
use stacklist::remote::ApiClient;
use stacklist::session::SessionStore;

#[derive(Parser)]
#[command(name = "stacklist")]
#[command(about = "Hierarchical to-do lists", long_about = None)]
struct Cli {
    /// Session directory (defaults to $STACKLIST_DIR or ~/.stacklist)
    #[arg(long, value_name = "PATH")]
    session_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account
    Register {
        email: String,
        password: String,
        /// Server base URL (also stored for later commands)
        #[arg(long)]
        url: Option<String>,
    },

    /// Log in and store the identity for later commands
    Login {
        email: String,
        password: String,
        /// Server base URL (also stored for later commands)
        #[arg(long)]
        url: Option<String>,
    },

    /// Clear the stored identity
    Logout,

    /// Show the stored identity
    Whoami,

    /// Show all lists and their items
    Lists {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a list
    CreateList { title: String },

    /// Rename a list
    RenameList { list_id: String, title: String },

    /// Delete a list
    DeleteList { list_id: String },

    /// Add an item under a list or another item
    Add {
        container_id: String,
        content: String,
    },

    /// Edit an item's content
    Edit { item_id: String, content: String },

    /// Toggle an item's completion flag
    Toggle { item_id: String },

    /// Delete an item
    RemoveItem { item_id: String },

    /// Move an item to a container at an index
    Move {
        item_id: String,
        container_id: String,
        index: usize,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let dir = match cli.session_dir {
        Some(dir) => dir,
        None => SessionStore::default_dir()?,
    };
    let store = SessionStore::open(&dir)?;

    let Some(command) = cli.command else {
        return stacklist::tui::run(&store);
    };

    match command {
        Commands::Register {
            email,
            password,
            url,
        } => {
            if let Some(url) = url {
                store.set_base_url(&url)?;
            }
            let cfg = store.read()?;
            let api = ApiClient::new(&cfg.base_url)?;
            api.register(&email, &password)?;
            println!("Registered {}", email);
        }

        Commands::Login {
            email,
            password,
            url,
        } => {
            if let Some(url) = url {
                store.set_base_url(&url)?;
            }
            let cfg = store.read()?;
            let api = ApiClient::new(&cfg.base_url)?;
            let user_id = api.login(&email, &password)?;
            store.set_identity(&user_id, &email)?;
            println!("Logged in as {}", email);
        }

        Commands::Logout => {
            store.clear_identity()?;
            println!("Logged out");
        }

        Commands::Whoami => {
            let cfg = store.read()?;
            match cfg.identity {
                Some(identity) => {
                    println!("email: {}", identity.email);
                    println!("userId: {}", identity.user_id);
                    println!("url: {}", cfg.base_url);
                }
                None => println!("Not logged in"),
            }
        }

        Commands::Lists { json } => {
            let (_api, snapshot) = load_snapshot(&store)?;
            if json {
                let board: std::collections::BTreeMap<&str, _> = snapshot
                    .lists()
                    .map(|list| (list.id.as_str(), list))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&board).context("serialize lists json")?
                );
            } else if snapshot.is_empty() {
                println!("No lists");
            } else {
                for list in snapshot.lists() {
                    println!("{}  {}", short_id(&list.id), list.title);
                    for item in &list.items {
                        print_item(item, 1);
                    }
                }
            }
        }

        Commands::CreateList { title } => {
            let (api, mut snapshot) = load_snapshot(&store)?;
            match snapshot.create_list(&api, &title)? {
                Some(id) => println!("{}", id),
                None => anyhow::bail!("list title cannot be blank"),
            }
        }

        Commands::RenameList { list_id, title } => {
            let (api, mut snapshot) = load_snapshot(&store)?;
            let outcome = editor::rename_list(&api, &mut snapshot, &list_id, &title)?;
            finish(&store, outcome)?;
        }

        Commands::DeleteList { list_id } => {
            let (api, mut snapshot) = load_snapshot(&store)?;
            snapshot.remove_list(&api, &list_id);
            println!("Deleted {}", list_id);
        }

        Commands::Add {
            container_id,
            content,
        } => {
            let (api, mut snapshot) = load_snapshot(&store)?;
            let outcome = match snapshot.classify_container(&container_id) {
                ParentKind::List => editor::create_item(&api, &mut snapshot, &container_id, &content)?,
                ParentKind::Item => {
                    let depth = snapshot
                        .depth_of(&container_id)
                        .with_context(|| format!("no such item {}", container_id))?;
                    if !editor::can_add_sub_item(depth) {
                        anyhow::bail!("cannot add sub-items below depth {}", editor::MAX_CREATE_DEPTH);
                    }
                    editor::create_sub_item(&api, &mut snapshot, &container_id, &content)?
                }
            };
            finish(&store, outcome)?;
        }

        Commands::Edit { item_id, content } => {
            let (api, mut snapshot) = load_snapshot(&store)?;
            let outcome = editor::edit_item_content(&api, &mut snapshot, &item_id, &content)?;
            finish(&store, outcome)?;
        }

        Commands::Toggle { item_id } => {
            let (api, mut snapshot) = load_snapshot(&store)?;
            let outcome = editor::toggle_complete(&api, &mut snapshot, &item_id)?;
            finish(&store, outcome)?;
        }

        Commands::RemoveItem { item_id } => {
            let (api, mut snapshot) = load_snapshot(&store)?;
            let outcome = editor::delete_item(&api, &mut snapshot, &item_id)?;
            finish(&store, outcome)?;
        }

        Commands::Move {
            item_id,
            container_id,
            index,
        } => {
            let (api, mut snapshot) = load_snapshot(&store)?;
            let source = snapshot
                .slot_of(&item_id)
                .with_context(|| format!("no such item {}", item_id))?;
            let source = DragSpot::new(&source.container_id, source.index);
            let destination = DragSpot::new(&container_id, index);
            let outcome = dragdrop::perform_drag(
                &api,
                &mut snapshot,
                &source,
                Some(&destination),
                &item_id,
            )?;
            finish(&store, outcome)?;
        }
    }

    Ok(())
}

/// Build the API client from the stored session and pull the current
/// hierarchy. An unrecognized identity clears the session and fails.
fn load_snapshot(store: &SessionStore) -> Result<(ApiClient, Snapshot)> {
    let cfg = store.read()?;
    let identity = cfg
        .identity
        .context("not logged in (run `stacklist login <email> <password>`)")?;
    let api = ApiClient::with_identity(&cfg.base_url, &identity.user_id)?;

    let mut snapshot = Snapshot::new();
    match snapshot.load(&api)? {
        LoadOutcome::Loaded => Ok((api, snapshot)),
        LoadOutcome::LoggedOut => {
            store.clear_identity()?;
            anyhow::bail!("session no longer valid; logged out (run `stacklist login`)")
        }
    }
}

/// Apply the reload outcome that follows a mutation.
fn finish(store: &SessionStore, outcome: LoadOutcome) -> Result<()> {
    match outcome {
        LoadOutcome::Loaded => Ok(()),
        LoadOutcome::LoggedOut => {
            store.clear_identity()?;
            anyhow::bail!("session no longer valid; logged out (run `stacklist login`)")
        }
    }
}

fn print_item(item: &Item, depth: usize) {
    let mark = if item.complete { "x" } else { " " };
    println!(
        "{}[{}] {}  {}",
        "  ".repeat(depth),
        mark,
        short_id(&item.id),
        item.content
    );
    for sub in &item.sub_items {
        print_item(sub, depth + 1);
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
