mod editor;
mod tty;

pub use editor::*;
pub use tty::*;
