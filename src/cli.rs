// src/cli.rs
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::config::{TrackerOptions, consts::{DATA_DIR, TOP_N}};
use crate::core::fmt::thousands;
use crate::error::TrackerError;
use crate::fetch::WebFetcher;
use crate::progress::Progress;
use crate::report;
use crate::tracker::Tracker;

#[derive(Debug, Parser)]
#[command(name = "webtoon-tracker", version, about = "Track webtoon subscriber counts month by month")]
pub struct Cli {
    /// Folder holding data.json, reports and debug.log
    #[arg(long, global = true, env = "WEBTOON_TRACKER_DATA", default_value = DATA_DIR)]
    pub data_dir: PathBuf,

    /// Concurrent page fetches during `update`
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    /// Mirror the debug log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a series page and start tracking it (or record today's count)
    Add { url: String },
    /// Stop tracking a series
    Remove { url: String },
    /// Refetch every tracked series
    Update,
    /// Rank series by their latest subscriber count
    Top {
        #[arg(short = 'n', long, default_value_t = TOP_N)]
        n: usize,
    },
    /// List tracked series alphabetically
    List,
    /// Month-by-month counts of one series
    History { url: String },
    /// Write today's report into the data folder
    Report {
        /// Print to stdout instead of writing the file
        #[arg(long)]
        stdout: bool,
    },
}

impl Cli {
    pub fn options(&self) -> TrackerOptions {
        let mut opts = TrackerOptions::with_data_dir(&self.data_dir);
        if let Some(w) = self.workers {
            opts.pool.workers = w.max(1);
        }
        opts
    }
}

pub fn run(cli: Cli) -> Result<(), TrackerError> {
    let options = cli.options();
    if let Err(e) = crate::log::init(&options.log_path(), cli.verbose) {
        eprintln!("Warning: could not open log file: {e}");
    }

    let fetcher = WebFetcher::new(&options.net)?;
    let (mut tracker, load_error) = Tracker::open(options, fetcher);
    if let Some(e) = load_error {
        eprintln!("Error: {e}");
    }

    let today = today();
    match cli.command {
        Command::Add { url } => {
            let info = tracker.add(url.trim(), today)?;
            println!("Added {}: {}", info.title, thousands(info.subscribers));
        }
        Command::Remove { url } => {
            if tracker.remove(url.trim())? {
                println!("Removed {}", url.trim());
            } else {
                println!("Not tracked: {}", url.trim());
            }
        }
        Command::Update => {
            let mut progress = ConsoleProgress::default();
            let summary = tracker.refresh_all(today, Some(&mut progress))?;
            println!(
                "All webtoons updated: {}/{} ok, {} failed.",
                summary.updated.len(),
                summary.total,
                summary.failed.len()
            );
        }
        Command::Top { n } => {
            let top = tracker.top(n);
            if top.is_empty() {
                println!("No data yet.");
            }
            let width = top.iter().map(|e| e.title.chars().count()).max().unwrap_or(0);
            for (i, e) in top.iter().enumerate() {
                println!("{:>3}. {:<width$}  {:>12}", i + 1, e.title, thousands(e.subscribers));
            }
        }
        Command::List => {
            for rec in tracker.store().sorted_by_title() {
                println!("{}\t{}", rec.title(), rec.identifier());
            }
        }
        Command::History { url } => match tracker.store().get(url.trim()) {
            Some(rec) => {
                println!("{}", rec.title());
                for line in report::monthly_lines(rec) {
                    println!("  {line}");
                }
            }
            None => println!("Not tracked: {}", url.trim()),
        },
        Command::Report { stdout } => {
            if stdout {
                println!("{}", tracker.report(today));
            } else {
                let path = tracker.save_report(today)?;
                println!("Report saved to {}", path.display());
            }
        }
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Prints one line per finished series.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        if total == 0 {
            println!("Nothing to update.");
        }
    }
    fn item_done(&mut self, _identifier: &str, title: &str) {
        self.done += 1;
        println!("[{}/{}] {}", self.done, self.total, title);
    }
    fn item_failed(&mut self, identifier: &str, reason: &str) {
        self.done += 1;
        println!("[{}/{}] FAILED {}: {}", self.done, self.total, identifier, reason);
    }
}
