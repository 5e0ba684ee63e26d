//! Command-line entry point over `staffdir_core`.
//!
//! # Responsibility
//! - Open a file-backed employee store and run one command against it.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `staffdir_cli [list [query] [page] | seed | count | clear]`
//!
//! Environment:
//! - `STAFFDIR_DATA_DIR`: data directory (default `./staffdir-data`).
//! - `STAFFDIR_LOG_DIR`: absolute log directory; logging is off when unset.
//! - `STAFFDIR_LOG_LEVEL`: log level (default by build mode).

use log::info;
use staffdir_core::{Employee, EmployeeStore, FileStorage, Page};
use std::error::Error;
use std::process::ExitCode;

const DEFAULT_DATA_DIR: &str = "staffdir-data";

fn main() -> ExitCode {
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("staffdir: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("STAFFDIR_LOG_DIR") {
        let level = std::env::var("STAFFDIR_LOG_LEVEL")
            .unwrap_or_else(|_| staffdir_core::default_log_level().to_string());
        staffdir_core::init_logging(&level, &log_dir)?;
    }

    let data_dir =
        std::env::var("STAFFDIR_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let mut store = EmployeeStore::open(FileStorage::open(data_dir)?);

    println!("staffdir_core version={}", staffdir_core::core_version());

    let command = args.first().map(String::as_str).unwrap_or("list");
    info!("event=cli_command module=cli status=start command={command}");
    match command {
        "list" => {
            let query = args.get(1).map(String::as_str).unwrap_or("");
            let page = match args.get(2) {
                Some(raw) => raw.parse::<usize>()?,
                None => 1,
            };
            let page_size = store.config().default_page_size;
            let result = store.get_paginated_clamped(page, page_size, query);
            print_page(&result, store.config().visible_page_window);
        }
        "seed" => {
            let added = store.seed_sample_data_if_empty();
            println!("seeded={added} total={}", store.len());
        }
        "count" => println!("total={}", store.len()),
        "clear" => {
            store.clear();
            println!("total=0");
        }
        other => return Err(format!("unknown command `{other}`").into()),
    }

    if !store.persisted() {
        return Err("changes were applied but could not be saved".into());
    }
    Ok(())
}

fn print_page(page: &Page<Employee>, window: usize) {
    for employee in &page.items {
        println!(
            "{:<16} {:<24} {:<32} {:<16} {:<10} {:<9} {:<10} {}",
            employee.id,
            employee.full_name(),
            employee.email,
            employee.phone,
            employee.date_of_employment.to_string(),
            employee.department.as_str(),
            employee.position.as_str(),
            employee.date_of_birth,
        );
    }
    let links = page
        .visible_pages(window)
        .iter()
        .map(|number| {
            if page.can_navigate_to(*number) {
                number.to_string()
            } else {
                format!("[{number}]")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "page={}/{} total={} pages: {}",
        page.current_page, page.total_pages, page.total_items, links
    );
}
