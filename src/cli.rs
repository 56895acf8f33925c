use clap::{ArgMatches, Parser};
use std::path::PathBuf;

use crate::mail::HeaderKind;

/// Create address book cards from mail message headers.
///
/// Reads one raw mail message from standard input, extracts the address and
/// display name from the selected headers, and files a card per header either
/// directly (batch) or through the interactive editor.
#[derive(Debug, Parser)]
#[command(name = "mailcard", version, about)]
pub struct Cli {
    /// File cards directly without opening the interactive editor
    #[arg(long)]
    pub batch: bool,

    /// Go through every step except the write to the address book (implies --batch)
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Account to file cards under (defaults to the first configured account)
    #[arg(short, long, value_name = "NAME")]
    pub account: Option<String>,

    /// Take the address from the From header
    #[arg(short, long)]
    pub from: bool,

    /// Take the address from the To header
    #[arg(short, long)]
    pub to: bool,

    /// Take the address from the Cc header
    #[arg(long)]
    pub cc: bool,

    /// Take the address from the Bcc header
    #[arg(long)]
    pub bcc: bool,

    /// Alternative config file path
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Batch is forced on by dry-run
    pub fn batch_mode(&self) -> bool {
        self.batch || self.dry_run
    }
}

/// Headers to scan, in the order the flags were given on the command line.
/// No header flags selects just From.
pub fn selected_headers(matches: &ArgMatches) -> Vec<HeaderKind> {
    let mut picked: Vec<(usize, HeaderKind)> = Vec::new();
    for (id, kind) in [
        ("from", HeaderKind::From),
        ("to", HeaderKind::To),
        ("cc", HeaderKind::Cc),
        ("bcc", HeaderKind::Bcc),
    ] {
        if matches.get_flag(id) {
            if let Some(index) = matches.index_of(id) {
                picked.push((index, kind));
            }
        }
    }
    picked.sort_by_key(|(index, _)| *index);

    if picked.is_empty() {
        vec![HeaderKind::From]
    } else {
        picked.into_iter().map(|(_, kind)| kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};

    fn parse(args: &[&str]) -> (Cli, ArgMatches) {
        let matches = Cli::command()
            .get_matches_from(std::iter::once("mailcard").chain(args.iter().copied()));
        let cli = Cli::from_arg_matches(&matches).unwrap();
        (cli, matches)
    }

    #[test]
    fn no_header_flags_defaults_to_from() {
        let (_, matches) = parse(&["--batch"]);
        assert_eq!(selected_headers(&matches), vec![HeaderKind::From]);
    }

    #[test]
    fn header_flags_keep_command_line_order() {
        let (_, matches) = parse(&["--cc", "-f", "--to"]);
        assert_eq!(
            selected_headers(&matches),
            vec![HeaderKind::Cc, HeaderKind::From, HeaderKind::To]
        );
    }

    #[test]
    fn dry_run_forces_batch() {
        let (cli, _) = parse(&["-n"]);
        assert!(!cli.batch);
        assert!(cli.batch_mode());
    }

    #[test]
    fn account_flag_is_captured() {
        let (cli, _) = parse(&["-a", "work", "--bcc"]);
        assert_eq!(cli.account.as_deref(), Some("work"));
    }
}
