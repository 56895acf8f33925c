use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Duration;

use crate::book::Book;
use crate::contact::{Contact, Status};

/// How an edit session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Saved(Status),
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Address,
}

enum Step {
    Continue,
    Save,
    Discard,
}

/// Interactive card editor: review and tweak the name and address before the
/// card lands in the book.
pub struct Editor<'a> {
    book: &'a Book,
    account: &'a str,
    contact: Contact,
    original: Contact,
    field: Field,
}

impl<'a> Editor<'a> {
    pub fn new(book: &'a Book, account: &'a str, contact: Contact) -> Self {
        Self {
            book,
            account,
            original: contact.clone(),
            contact,
            field: Field::Name,
        }
    }

    /// Drive the editor to completion. Enter saves, Esc discards; a storage
    /// failure propagates to the caller's error boundary.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<Outcome>
    where
        B::Error: Send + Sync + 'static,
    {
        loop {
            terminal.draw(|f| self.render(f))?;

            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                match self.handle_key(key) {
                    Step::Continue => {}
                    Step::Discard => return Ok(Outcome::Discarded),
                    Step::Save => {
                        let status = self.save_status();
                        self.book
                            .update(&self.contact, self.account, &self.contact.address, status)?;
                        return Ok(Outcome::Saved(status));
                    }
                }
            }
        }
    }

    /// Cards saved untouched stay `new`; any user edit marks them `edited`.
    fn save_status(&self) -> Status {
        if self.contact == self.original {
            Status::New
        } else {
            Status::Edited
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Step {
        match key.code {
            KeyCode::Esc => return Step::Discard,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Step::Discard;
            }
            // A card without an address has nothing to key the entry on
            KeyCode::Enter if !self.contact.address.trim().is_empty() => return Step::Save,
            KeyCode::Enter => {}
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.field = match self.field {
                    Field::Name => Field::Address,
                    Field::Address => Field::Name,
                };
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_mut().push(c);
            }
            _ => {}
        }
        Step::Continue
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            Field::Name => &mut self.contact.name,
            Field::Address => &mut self.contact.address,
        }
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name
                Constraint::Length(3), // Address
                Constraint::Min(0),
                Constraint::Length(1), // Help
            ])
            .split(f.area());

        let title = format!("New card [{}]", self.account);
        f.render_widget(
            self.field_widget("Name", &self.contact.name, self.field == Field::Name)
                .block(self.field_block(&title, self.field == Field::Name)),
            chunks[0],
        );
        f.render_widget(
            self.field_widget("Address", &self.contact.address, self.field == Field::Address)
                .block(self.field_block("", self.field == Field::Address)),
            chunks[1],
        );

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" switch field  "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" save  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" discard"),
        ]);
        f.render_widget(
            Paragraph::new(help).style(Style::default().bg(Color::DarkGray)),
            chunks[3],
        );
    }

    fn field_widget(&self, label: &str, value: &str, focused: bool) -> Paragraph<'_> {
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{label}: "), label_style),
            Span::raw(value.to_string()),
        ]))
    }

    fn field_block(&self, title: &str, focused: bool) -> Block<'_> {
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title.to_string())
    }
}
