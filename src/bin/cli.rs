use tally::{LedgerStore, Summary, Transaction, TransactionId, Kind,
    IdStrategy, DEFAULT_SLOT, format_currency,
    backend::JsonStore};

use std::path::PathBuf;
use anyhow::Context;
use colored::Colorize;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
    /// Directory holding the ledger slots
    #[clap(short, long, value_parser, default_value = "data")]
    dir: PathBuf,

    /// Name of the slot to operate on
    #[clap(short, long, value_parser, default_value_t = String::from(DEFAULT_SLOT))]
    slot: String,

    /// How new transaction ids are picked
    #[clap(long, value_enum, default_value_t = IdStrategy::Sequential)]
    ids: IdStrategy,

    /// Action to perform
    #[clap(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Show balance, income and expense totals
    Summary,
    /// List all transactions, newest first
    List,
    /// Record an income (positive) or expense (negative amount)
    Add(Add),
    /// Delete a transaction by id
    Remove(Remove)
}

#[derive(Args, Debug)]
struct Add {
    /// What the money was for
    #[clap(value_parser)]
    description: String,

    /// Signed amount, e.g. 1000 or -42.50
    #[clap(value_parser, allow_hyphen_values = true)]
    amount: String
}

#[derive(Args, Debug)]
struct Remove {
    #[clap(value_parser)]
    id: TransactionId
}

fn print_transaction(transaction: &Transaction) {
    let amount = format_currency(transaction.amount);
    let amount = match transaction.kind() {
        Kind::Income => amount.green(),
        Kind::Expense => amount.bright_red()
    };
    println!("{:>6}  {}  {}", transaction.id, transaction.description, amount);
}

fn print_summary(summary: &Summary) {
    let balance = format_currency(summary.balance);
    let balance = if summary.balance < 0.0 {
        balance.bright_red()
    } else {
        balance.normal()
    };
    println!("{}: {}", "Balance".bold(), balance);
    println!("{}: {}", "Income".bold(), format_currency(summary.total_income).green());
    println!("{}: {}", "Expense".bold(), format_currency(summary.total_expense.abs()).bright_red());
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let store = JsonStore::new(&args.dir);
    let mut ledger = LedgerStore::open_slot(store, &args.slot)
        .with_ids(args.ids.generator());

    match args.action {
        Subcommands::Summary => {
            print_summary(&ledger.summarize());
        },
        Subcommands::List => {
            for t in ledger.newest_first() {
                print_transaction(t);
            }
        },
        Subcommands::Add(add) => {
            let transaction = ledger.submit(&add.description, &add.amount)
                .with_context(|| format!("could not add {:?}", add.description))?;
            print_transaction(&transaction);
        },
        Subcommands::Remove(remove) => {
            let removed = ledger.remove(remove.id)
                .with_context(|| format!("could not remove transaction {}", remove.id))?;
            match removed {
                Some(t) => print_transaction(&t),
                None => println!("no transaction with id {}", remove.id)
            }
        }
    }

    return Ok(());
}
