use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use library_circulation::{
    CatalogError, CirculationObserver, CirculationRecord, CirculationResult, Item, Library,
    LoanPolicy, Patron, status_message,
};

/// Walk a small library through a few weeks of loans, holds and fines
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of days to simulate after the opening checkouts
    #[arg(short, long, default_value_t = 30)]
    days: u32,

    /// JSON loan policy overriding the default loan periods and daily fine
    #[arg(short, long)]
    policy: Option<PathBuf>,

    /// Print the recorded history as JSON at the end
    #[arg(long)]
    history: bool,

    /// Print every change as it happens
    #[arg(short, long)]
    verbose: bool,
}

/// Prints every record to the console
#[derive(Debug)]
struct ConsoleObserver;

impl CirculationObserver for ConsoleObserver {
    fn on_event(&self, record: &CirculationRecord) {
        println!("{}", format!("  [day {}] {:?}", record.day, record.event).dimmed());
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let policy = match args.policy.as_deref().map(LoanPolicy::from_path).transpose() {
        Ok(policy) => policy.unwrap_or_default(),
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    println!("{}", "Library Circulation Demo".green().bold());
    println!("=====================================\n");

    let mut library = Library::with_policy(policy);
    if args.verbose {
        library.register_observer(Box::new(ConsoleObserver));
    }

    if let Err(err) = build_catalog(&mut library) {
        eprintln!("{} {err}", "error:".red().bold());
        return ExitCode::FAILURE;
    }

    opening_day(&mut library);
    simulate(&mut library, args.days);
    settle_up(&mut library);

    println!("\n{}", library.to_string().bold());

    if args.history {
        let records: Vec<&CirculationRecord> = library.history().collect();
        match serde_json::to_string_pretty(&records) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{} {err}", "error:".red().bold());
                return ExitCode::FAILURE;
            }
        }
    }

    println!("\n{}", "Demonstration complete!".green().bold());
    ExitCode::SUCCESS
}

/// Stock the shelves and register the two demo patrons
fn build_catalog(library: &mut Library) -> Result<(), CatalogError> {
    library.add_item(Item::book("b1", "1984", "George Orwell"))?;
    library.add_item(Item::album("a1", "Thriller", "Michael Jackson"))?;
    library.add_item(Item::movie("m1", "Inception", "Christopher Nolan"))?;
    library.add_patron(Patron::new("p1", "Alice"))?;
    library.add_patron(Patron::new("p2", "Bob"))?;
    Ok(())
}

/// Print one operation and its status line
fn report(action: &str, result: &CirculationResult) {
    let status = status_message(result);
    let status = if result.is_ok() { status.green() } else { status.red() };
    println!("{action:<36} -> {status}");
}

/// Day 0: loans, a hold and a few refusals
fn opening_day(library: &mut Library) {
    println!("{}", "Opening day".yellow().bold());

    report("Alice checks out 1984", &library.check_out("p1", "b1"));
    report("Bob requests 1984", &library.request_item("p2", "b1"));
    report("Bob checks out 1984", &library.check_out("p2", "b1"));
    report("Alice checks out Inception", &library.check_out("p1", "m1"));
    report("Bob requests Inception", &library.request_item("p2", "m1"));
    report("Alice requests Inception", &library.request_item("p1", "m1"));
    report("Bob checks out Thriller", &library.check_out("p2", "a1"));
}

/// Advance the clock, bringing 1984 back halfway through
fn simulate(library: &mut Library, days: u32) {
    println!("\n{}", format!("Simulating {days} days").yellow().bold());

    let return_day = days / 2;
    for _ in 0..days {
        library.advance_day();

        if library.current_date() == return_day {
            report("Alice returns 1984", &library.return_item("b1"));
            report("Alice checks out 1984 again", &library.check_out("p1", "b1"));
            report("Bob picks up 1984", &library.check_out("p2", "b1"));
        }
    }

    for (item, late) in library.overdue_items() {
        println!("  {} ({}) is {late} days overdue", item.title(), item.kind());
    }
}

/// Show balances and pay them off
fn settle_up(library: &mut Library) {
    println!("\n{}", "Fines".yellow().bold());

    let balances: Vec<(String, String, f64)> = library
        .members()
        .map(|patron| (patron.id().to_string(), patron.name().to_string(), patron.fine_balance()))
        .collect();

    for (id, name, balance) in balances {
        println!("  {name} owes {balance:.2}");
        if balance > 0.0 {
            report(&format!("{name} pays {balance:.2}"), &library.pay_fine(&id, balance));
        }
    }
}
