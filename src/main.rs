mod app;
mod book;
mod cli;
mod config;
mod contact;
mod mail;
mod ui;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches};
use std::io::Read;

use book::Book;
use cli::Cli;
use config::Config;
use mail::HeaderKind;

fn main() {
    env_logger::init();

    let matches = Cli::command().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };
    let headers = cli::selected_headers(&matches);

    // Configuration failures exit 1 before stdin is touched
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err:#}");
            std::process::exit(1);
        }
    };
    let account = match config.resolve_account(cli.account.as_deref()) {
        Ok(account) => account,
        Err(err) => {
            log::error!("{err:#}");
            std::process::exit(1);
        }
    };

    // The first failure past this point abandons the remaining headers; its
    // diagnostics go to stdout and the tty guard still restores the terminal
    if let Err(err) = run(&cli, &config, &account, &headers) {
        println!("{err:?}");
    }
}

fn run(cli: &Cli, config: &Config, account: &str, headers: &[HeaderKind]) -> Result<()> {
    let mut raw = Vec::new();
    std::io::stdin()
        .read_to_end(&mut raw)
        .context("cannot read message from stdin")?;
    let message = mail::read_message(&raw);
    if message.is_none() {
        log::warn!("input does not parse as a mail message, no headers to scan");
    }

    let book = Book::open(config.book_path(account))?;
    if cli.batch_mode() {
        let processed = app::run_batch(&book, account, message.as_ref(), headers, cli.dry_run)?;
        log::info!("processed {processed} header(s) for account {account}");
    } else {
        app::run_interactive(&book, account, message.as_ref(), headers)?;
    }
    Ok(())
}
