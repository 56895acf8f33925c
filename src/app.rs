use anyhow::Result;
use mail_parser::Message;

use crate::book::Book;
use crate::contact::{Contact, Status};
use crate::mail::{self, HeaderKind};
use crate::ui::{Editor, Outcome, TtyGuard};

/// Decode one header into a card. Absent or addressless headers yield
/// nothing and are skipped without error.
fn contact_for(message: Option<&Message>, header: HeaderKind) -> Option<Contact> {
    let value = message.and_then(|m| m.header(header.name()));
    let (address, name) = mail::parse_address(value);
    match address {
        Some(address) => Some(Contact::new(name, address)),
        None => {
            log::debug!("no address in {header} header, skipping");
            None
        }
    }
}

/// File one card per selected header directly into the book. Dry-run walks
/// every step except the write. Returns the number of cards processed.
pub fn run_batch(
    book: &Book,
    account: &str,
    message: Option<&Message>,
    headers: &[HeaderKind],
    dry_run: bool,
) -> Result<usize> {
    let mut processed = 0;
    for header in headers {
        let Some(contact) = contact_for(message, *header) else {
            continue;
        };
        if dry_run {
            log::info!(
                "dry run: would file {} from {header} under {account}",
                contact.label()
            );
        } else {
            book.update(&contact, account, &contact.address, Status::New)?;
        }
        processed += 1;
    }
    Ok(processed)
}

/// Run the editor once per selected header. The tty capture lasts for the
/// whole loop and is released when the guard drops, error or not.
pub fn run_interactive(
    book: &Book,
    account: &str,
    message: Option<&Message>,
    headers: &[HeaderKind],
) -> Result<()> {
    let (_guard, mut terminal) = TtyGuard::capture()?;
    for header in headers {
        let Some(contact) = contact_for(message, *header) else {
            continue;
        };
        match Editor::new(book, account, contact).run(&mut terminal)? {
            Outcome::Saved(status) => log::info!("saved card from {header} as {status:?}"),
            Outcome::Discarded => log::info!("discarded card from {header}"),
        }
    }
    Ok(())
}
