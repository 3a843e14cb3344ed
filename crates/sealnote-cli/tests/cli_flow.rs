use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rusqlite::Connection;
use tempfile::{tempdir, TempDir};

const PASSWORD: &str = "correct-horse";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sealnote"))
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempdir().expect("create temp dir"),
        }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config").join("config.toml")
    }

    fn db_path(&self) -> PathBuf {
        self.dir.path().join("data").join("notes.db")
    }

    fn command(&self, password: Option<&str>) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("SEALNOTE_CONFIG", self.config_path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg-config"))
            .env("XDG_DATA_HOME", self.dir.path().join("xdg-data"))
            .env_remove("SEALNOTE_DB")
            .env_remove("SEALNOTE_MASTER_PASSWORD")
            .env_remove("SEALNOTE_NEW_MASTER_PASSWORD")
            .env_remove("RUST_LOG");
        if let Some(value) = password {
            cmd.env("SEALNOTE_MASTER_PASSWORD", value);
        }
        cmd
    }

    fn run(&self, password: Option<&str>, args: &[&str]) -> Output {
        self.command(password).args(args).output().expect("run sealnote")
    }

    fn init(&self) {
        let db = self.db_path();
        let output = self.run(
            None,
            &[
                "init",
                "--db",
                db.to_str().unwrap(),
                "--iterations",
                "1000",
            ],
        );
        assert_success(&output);
    }

    fn add(&self, title: &str, body: &str) -> String {
        let output = self.run(
            Some(PASSWORD),
            &["--quiet", "add", "--title", title, "--body", body, "--no-input"],
        );
        assert_success(&output);
        stdout(&output).trim().to_string()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout: {}\nstderr: {}",
        stdout(output),
        stderr(output)
    );
}

fn file_contains(path: &Path, needle: &str) -> bool {
    let bytes = std::fs::read(path).expect("read database");
    bytes
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

#[test]
fn test_init_writes_config_and_database() {
    let ws = Workspace::new();
    ws.init();

    let config = std::fs::read_to_string(ws.config_path()).unwrap();
    assert!(config.contains("kdf_iterations = 1000"));
    assert!(ws.db_path().exists());

    let again = ws.run(None, &["init"]);
    assert_eq!(again.status.code(), Some(4));
    assert!(stderr(&again).contains("--force"));
}

#[test]
fn test_add_show_round_trip() {
    let ws = Workspace::new();
    ws.init();
    let id = ws.add("Meeting", "meeting at 5pm");

    let output = ws.run(Some(PASSWORD), &["show", &id, "--no-input"]);
    assert_success(&output);
    assert!(stdout(&output).contains("meeting at 5pm"));
    assert!(stdout(&output).contains("Meeting"));

    assert!(!file_contains(&ws.db_path(), "meeting at 5pm"));
}

#[test]
fn test_show_json_includes_content() {
    let ws = Workspace::new();
    ws.init();
    let id = ws.add("t", "json body");

    let output = ws.run(Some(PASSWORD), &["show", &id, "--json", "--no-input"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["content"], "json body");
    assert_eq!(value["id"], id.as_str());
}

#[test]
fn test_wrong_password_and_corruption_exit_identically() {
    let ws = Workspace::new();
    ws.init();
    let id = ws.add("t", "secret");

    let wrong = ws.run(Some("wrong-horse"), &["show", &id, "--no-input"]);
    assert_eq!(wrong.status.code(), Some(5));
    assert!(!stdout(&wrong).contains("secret"));

    let conn = Connection::open(ws.db_path()).unwrap();
    conn.execute("UPDATE notes SET nonce = 'AAAA' WHERE id = ?", [&id])
        .unwrap();
    drop(conn);

    let corrupt = ws.run(Some(PASSWORD), &["show", &id, "--no-input"]);
    assert_eq!(corrupt.status.code(), Some(5));
    assert_eq!(
        stderr(&wrong).lines().last(),
        stderr(&corrupt).lines().last()
    );
}

#[test]
fn test_add_rejects_short_password() {
    let ws = Workspace::new();
    ws.init();

    let output = ws.run(
        Some("short"),
        &["add", "--title", "t", "--body", "b", "--no-input"],
    );
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_list_json_has_no_plaintext() {
    let ws = Workspace::new();
    ws.init();
    let first = ws.add("first", "body one");
    let second = ws.add("second", "body two");

    let output = ws.run(None, &["list", "--json"]);
    assert_success(&output);
    let text = stdout(&output);
    assert!(!text.contains("body one"));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|note| note["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.as_str()));
    assert!(ids.contains(&second.as_str()));
}

#[test]
fn test_passwd_reencrypts_note() {
    let ws = Workspace::new();
    ws.init();
    let id = ws.add("t", "rotate me");

    let output = ws
        .command(Some(PASSWORD))
        .env("SEALNOTE_NEW_MASTER_PASSWORD", "battery-staple")
        .args(["passwd", &id, "--no-input"])
        .output()
        .unwrap();
    assert_success(&output);

    let old = ws.run(Some(PASSWORD), &["show", &id, "--no-input"]);
    assert_eq!(old.status.code(), Some(5));

    let new = ws.run(Some("battery-staple"), &["show", &id, "--no-input"]);
    assert_success(&new);
    assert!(stdout(&new).contains("rotate me"));
}

#[test]
fn test_delete_then_not_found() {
    let ws = Workspace::new();
    ws.init();
    let id = ws.add("t", "gone soon");

    assert_success(&ws.run(None, &["delete", &id]));

    let output = ws.run(Some(PASSWORD), &["show", &id, "--no-input"]);
    assert_eq!(output.status.code(), Some(3));

    let output = ws.run(None, &["delete", &id]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_invalid_id_is_invalid_input() {
    let ws = Workspace::new();
    ws.init();

    let output = ws.run(Some(PASSWORD), &["show", "not-a-uuid", "--no-input"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_missing_config_hints_init() {
    let ws = Workspace::new();

    let output = ws.run(None, &["list"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("sealnote init"));
}

#[test]
fn test_missing_password_without_tty_fails() {
    let ws = Workspace::new();
    ws.init();
    let id = ws.add("t", "b");

    let output = ws.run(None, &["show", &id, "--no-input"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("SEALNOTE_MASTER_PASSWORD"));
}
