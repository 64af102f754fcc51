//! Interactive counting loop
//!
//! One session, one venue, explicit sync. Every mutation lands locally
//! first; the operator decides when to push.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use application::{ApplicationResult, BarcodeLookup, CountSession, LoadOutcome};
use console::style;
use domain::{Barcode, CountItem, ItemId, ListQuery};
use indicatif::{ProgressBar, ProgressStyle};
use infrastructure::NetworkMonitor;

use crate::render;

pub async fn run(mut session: CountSession, monitor: NetworkMonitor) -> Result<()> {
    let load_spinner = spinner("Loading counting session...");
    let outcome = session.load().await;
    load_spinner.finish_and_clear();

    match outcome {
        LoadOutcome::Fresh { loaded } => {
            println!(
                "{} {} items loaded for venue {}",
                style("✔").green(),
                loaded,
                style(session.venue().as_str()).bold()
            );
        }
        LoadOutcome::Degraded { loaded, error } => {
            println!("{} {}", style("offline:").yellow().bold(), style(error).yellow());
            println!(
                "{} counting continues on {} demo items; counts stay local until sync",
                style("!").yellow(),
                loaded
            );
        }
        LoadOutcome::Failed(error) => return Err(error.into()),
    }

    println!(
        "Type {} for commands, {} to leave.",
        style("help").cyan(),
        style("quit").cyan()
    );
    println!();

    let stdin = io::stdin();
    let mut quit_armed = false;

    loop {
        print!("{} ", style("stocktake>").green().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // stdin closed (piped input); treat like quit
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        // The quit confirmation only survives an immediate repeat
        if command != "quit" && command != "exit" {
            quit_armed = false;
        }

        match command {
            "help" => print_help(),
            "list" => {
                let mut query = ListQuery::new();
                if !rest.is_empty() {
                    query = query.with_text(rest);
                }
                render::print_items(&session.filter_and_sort(&query));
            }
            "cat" => {
                if rest.is_empty() {
                    usage("cat <category>");
                    continue;
                }
                let query = ListQuery::new().with_category(rest);
                render::print_items(&session.filter_and_sort(&query));
            }
            "cats" => {
                for category in session.categories() {
                    println!("  {category}");
                }
            }
            "set" => {
                let Some((id, qty)) = rest.split_once(char::is_whitespace) else {
                    usage("set <id> <qty>");
                    continue;
                };
                match qty.trim().parse::<f64>() {
                    Ok(qty) => {
                        let result = parse_id(id).and_then(|id| session.set_count(&id, qty));
                        report(result);
                    }
                    Err(_) => println!("{} not a number: {}", style("✘").red(), qty.trim()),
                }
            }
            "+" => {
                if rest.is_empty() {
                    usage("+ <id>");
                    continue;
                }
                let result = parse_id(rest).and_then(|id| session.increment(&id));
                report(result);
            }
            "-" => {
                if rest.is_empty() {
                    usage("- <id>");
                    continue;
                }
                let result = parse_id(rest).and_then(|id| session.decrement(&id));
                report(result);
            }
            "scan" => {
                if rest.is_empty() {
                    usage("scan <barcode>");
                    continue;
                }
                scan(&session, rest);
            }
            "sync" => {
                if !monitor.is_online() {
                    println!("{} network looks down; trying anyway", style("!").yellow());
                }
                let sync_spinner = spinner("Syncing counts...");
                // The session notifier prints the success or failure line
                let _ = session.sync().await;
                sync_spinner.finish_and_clear();
            }
            "status" => print_status(&session, &monitor),
            "quit" | "exit" => {
                if session.pending_syncs() > 0 && !quit_armed {
                    println!(
                        "{} {} unsynced change(s); {} again to leave without syncing",
                        style("!").yellow(),
                        session.pending_syncs(),
                        style(command).cyan()
                    );
                    quit_armed = true;
                    continue;
                }
                break;
            }
            other => {
                println!(
                    "{} unknown command: {} ({} for the list)",
                    style("✘").red(),
                    other,
                    style("help").cyan()
                );
            }
        }
    }

    println!("Bye.");
    Ok(())
}

fn parse_id(raw: &str) -> ApplicationResult<ItemId> {
    Ok(ItemId::new(raw)?)
}

fn report(result: ApplicationResult<&CountItem>) {
    match result {
        Ok(item) => {
            let variance = item
                .variance()
                .map_or("-".to_string(), |v| format!("{v:+}"));
            println!(
                "{} {}: counted {} {} (expected {}, variance {})",
                style("✔").green(),
                item.name(),
                item.counted_qty().unwrap_or(0.0),
                item.unit(),
                item.expected_qty(),
                variance
            );
        }
        Err(e) => println!("{} {}", style("✘").red(), e),
    }
}

fn scan(session: &CountSession, raw: &str) {
    let barcode = match Barcode::new(raw) {
        Ok(barcode) => barcode,
        Err(e) => {
            println!("{} {}", style("✘").red(), e);
            return;
        }
    };
    match session.find_by_barcode(&barcode) {
        BarcodeLookup::Found(item) => {
            println!(
                "{} {} [{}] expected {} {}, use: set {} <qty>",
                style("✔").green(),
                style(item.name()).bold(),
                item.id(),
                item.expected_qty(),
                item.unit(),
                item.id()
            );
        }
        BarcodeLookup::NotFound => {
            println!("{} no item with barcode {}", style("!").yellow(), barcode);
        }
    }
}

fn print_status(session: &CountSession, monitor: &NetworkMonitor) {
    let counted = session
        .items()
        .iter()
        .filter(|item| item.counted_qty().is_some())
        .count();
    println!("  venue:    {}", session.venue());
    println!("  items:    {} ({counted} counted)", session.items().len());
    println!("  pending:  {} unsynced change(s)", session.pending_syncs());
    println!(
        "  network:  {}",
        if monitor.is_online() {
            style("online").green().to_string()
        } else {
            style("offline").yellow().to_string()
        }
    );
    if session.is_degraded() {
        println!("  {}", style("running on the demo dataset").yellow());
    }
}

fn print_help() {
    println!("  list [text]        show items, optionally filtered by name/barcode/location");
    println!("  cat <category>     show one category");
    println!("  cats               list categories");
    println!("  set <id> <qty>     record a counted quantity");
    println!("  + <id>             bump the count up by one");
    println!("  - <id>             bump the count down by one (never below zero)");
    println!("  scan <barcode>     look an item up by barcode");
    println!("  sync               push unsynced counts to the server");
    println!("  status             session and network summary");
    println!("  quit               leave (asks twice with unsynced counts)");
}

fn usage(pattern: &str) {
    println!("{} usage: {}", style("!").yellow(), style(pattern).cyan());
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
