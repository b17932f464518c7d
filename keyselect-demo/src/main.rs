//! Line-driven click simulator for keyselect.
//!
//! Reads commands from stdin and prints the affected selection after each
//! change:
//!
//! ```text
//! click <key> <item>[,<item>...]   exclusive click
//! ctrl  <key> <item>[,<item>...]   additive click
//! clear <key>
//! show  <key>
//! ```
//!
//! Pass `--persist` to route every command through the durable store.

mod logging;

use keyselect::prelude::*;
use keyselect::wakeup;
use simplelog::LevelFilter;
use tokio::io::{AsyncBufReadExt, BufReader};

enum Command {
    Click {
        key: String,
        items: Vec<String>,
        multiple: bool,
    },
    Clear { key: String },
    Show { key: String },
}

fn parse(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?;
    let key = parts.next()?.to_string();
    let items: Vec<String> = parts
        .next()
        .map(|items| items.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    match verb {
        "click" => Some(Command::Click {
            key,
            items,
            multiple: false,
        }),
        "ctrl" => Some(Command::Click {
            key,
            items,
            multiple: true,
        }),
        "clear" => Some(Command::Clear { key }),
        "show" => Some(Command::Show { key }),
        _ => None,
    }
}

fn print_selection(store: &SelectionStore, key: &str) {
    println!("{}: [{}]", key, store.items(key).join(", "));
}

/// Print every selection that changed since the last render.
fn render(selections: &Selections, rx: &WakeupReceiver) {
    for changed in rx.take_changed() {
        print_selection(selections.store(changed.store), &changed.key);
    }
}

#[tokio::main]
async fn main() {
    logging::init(LevelFilter::Debug);

    let persistence = Persistence::from(std::env::args().any(|arg| arg == "--persist"));
    let selections = match persistence {
        Persistence::Durable => match Selections::open(PersistConfig::default()).await {
            Ok(selections) => selections,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        },
        Persistence::Ephemeral => Selections::in_memory(),
    };

    let (tx, rx) = wakeup::channel();
    selections.install_wakeup(&tx);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }

        match parse(line) {
            Some(Command::Click {
                key,
                items,
                multiple,
            }) => selections.actions(key, persistence).select(&items, multiple),
            Some(Command::Clear { key }) => selections.actions(key, persistence).clear(),
            Some(Command::Show { key }) => print_selection(selections.store(persistence), &key),
            None => eprintln!("unrecognized command: {}", line),
        }

        render(&selections, &rx);
    }

    if let Err(e) = selections.flush().await {
        log::warn!("failed to flush selections: {}", e);
    }
}
