use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Config with one account "personal" and a book inside the temp dir.
fn write_config(dir: &TempDir) -> (PathBuf, PathBuf) {
    let book = dir.path().join("book.json");
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!("book = \"{}\"\n\n[accounts.personal]\n", book.display()),
    )
    .unwrap();
    (config, book)
}

fn mailcard(config: &PathBuf, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mailcard"));
    cmd.arg("-c")
        .arg(config)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

#[test]
fn unknown_account_exits_one_without_reading_stdin() {
    let dir = TempDir::new().unwrap();
    let (config, book) = write_config(&dir);

    let mut child = mailcard(&config, &["--batch", "-a", "missing"])
        .spawn()
        .unwrap();
    // Keep our end of the stdin pipe open: if the process tried to drain the
    // message before validating the account, this wait would block forever
    let _stdin = child.stdin.take().unwrap();
    let status = child.wait().unwrap();

    assert_eq!(status.code(), Some(1));
    assert!(!book.exists());
}

#[test]
fn batch_from_files_a_new_card() {
    let dir = TempDir::new().unwrap();
    let (config, book) = write_config(&dir);

    let mut child = mailcard(&config, &["--batch", "--from"]).spawn().unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"From: Jane Doe <jane@example.com>\r\nSubject: hi\r\n\r\nbody\r\n")
        .unwrap();
    let status = child.wait().unwrap();
    assert!(status.success());

    let content = std::fs::read_to_string(&book).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("\"account\":\"personal\""));
    assert!(content.contains("\"status\":\"new\""));
    assert!(content.contains("\"name\":\"Jane Doe\""));
    assert!(content.contains("\"address\":\"jane@example.com\""));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let (config, book) = write_config(&dir);

    let mut child = mailcard(&config, &["--dry-run", "--from"]).spawn().unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"From: Jane Doe <jane@example.com>\r\n\r\nbody\r\n")
        .unwrap();
    let status = child.wait().unwrap();

    assert!(status.success());
    assert!(!book.exists());
}
