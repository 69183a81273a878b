//! E2E CLI tests covering:
//! - Board setup and the session (`ib init`, `ib login`, `ib whoami`)
//! - Posting, voting, commenting, editing, deleting, with permission checks
//! - `ib list` views: sort, filters, `--view` reuse, timeline grouping
//! - Export/import, including rejected files leaving the board unchanged
//!
//! Each test runs `ib` as a subprocess in an isolated temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the `ib` binary, rooted in `dir`.
fn ib_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ib"));
    cmd.current_dir(dir);
    cmd.env("IDEABOARD_LOG", "error");
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env_remove("IDEABOARD_USER");
    cmd.env_remove("FORMAT");
    cmd
}

fn ib_as(dir: &Path, user: &str) -> Command {
    let mut cmd = ib_cmd(dir);
    cmd.env("IDEABOARD_USER", user);
    cmd
}

fn init_board() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    ib_cmd(dir.path()).arg("init").assert().success();
    dir
}

fn json_of(cmd: &mut Command) -> Value {
    let output = cmd.arg("--json").output().expect("command should not crash");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

/// Post an idea as `author`, return its ID.
fn add_idea(dir: &Path, author: &str, extra: &[&str]) -> String {
    let json = json_of(ib_as(dir, author).arg("add").args(extra));
    json["id"].as_str().expect("id field").to_string()
}

fn vote(dir: &Path, id: &str, times: usize) {
    for _ in 0..times {
        ib_cmd(dir).args(["vote", id]).assert().success();
    }
}

fn listed_titles(list: &Value) -> Vec<String> {
    list["list"]["entries"]
        .as_array()
        .expect("flat entries")
        .iter()
        .map(|i| i["title"].as_str().expect("title").to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Setup and session
// ---------------------------------------------------------------------------

#[test]
fn commands_outside_a_board_report_not_initialized() {
    let dir = TempDir::new().expect("tempdir");
    ib_cmd(dir.path())
        .args(["list", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1001"))
        .stderr(predicate::str::contains("ib init"));
}

#[test]
fn init_twice_needs_force() {
    let dir = init_board();
    ib_cmd(dir.path()).arg("init").assert().failure();
    ib_cmd(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn login_persists_until_logout() {
    let dir = init_board();
    ib_cmd(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Guest (not signed in)"));

    ib_cmd(dir.path()).args(["login", "  Alice "]).assert().success();
    let who = json_of(ib_cmd(dir.path()).arg("whoami"));
    assert_eq!(who["name"], "Alice");
    assert_eq!(who["signed_in"], true);

    ib_cmd(dir.path()).arg("logout").assert().success();
    let who = json_of(ib_cmd(dir.path()).arg("whoami"));
    assert_eq!(who["name"], "Guest");
}

#[test]
fn blank_login_is_rejected() {
    let dir = init_board();
    ib_cmd(dir.path())
        .args(["login", "   ", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2005"));
}

// ---------------------------------------------------------------------------
// Ideas
// ---------------------------------------------------------------------------

#[test]
fn add_rejects_blank_title() {
    let dir = init_board();
    ib_as(dir.path(), "Alice")
        .args(["add", "-t", "  ", "-d", "body"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title must not be blank"));
}

#[test]
fn votes_sort_and_prefix_ids() {
    let dir = init_board();
    let dark = add_idea(dir.path(), "Alice", &["-t", "Dark Mode", "-d", "night", "-c", "UI"]);
    let api = add_idea(dir.path(), "Alice", &["-t", "API v2", "-d", "rework", "-c", "Backend"]);
    vote(dir.path(), &dark[..8], 3);
    vote(dir.path(), &api[..8], 5);

    let list = json_of(ib_cmd(dir.path()).args(["list", "--sort", "votes"]));
    assert_eq!(listed_titles(&list), ["API v2", "Dark Mode"]);
    assert_eq!(list["view"], "?sort=votes");
    assert_eq!(list["query"], "sort=votes");

    ib_cmd(dir.path())
        .args(["list", "--sort", "votes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("view: ?sort=votes"));
}

#[test]
fn guests_vote_but_cannot_comment() {
    let dir = init_board();
    let id = add_idea(dir.path(), "Alice", &["-t", "Dark Mode", "-d", "night"]);

    ib_cmd(dir.path()).args(["vote", &id]).assert().success();
    ib_cmd(dir.path())
        .args(["comment", &id, "nice", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2003"))
        .stderr(predicate::str::contains("sign in to comment"));

    ib_as(dir.path(), "Bob").args(["comment", &id, "nice"]).assert().success();
    let shown = json_of(ib_cmd(dir.path()).args(["show", &id]));
    assert_eq!(shown["votes"], 1);
    assert_eq!(shown["comments"][0]["author"], "Bob");
    assert_eq!(shown["comments"][0]["text"], "nice");
}

#[test]
fn only_the_author_may_edit_or_delete() {
    let dir = init_board();
    let id = add_idea(dir.path(), "Alice", &["-t", "Dark Mode", "-d", "night", "--tags", "ux"]);

    ib_as(dir.path(), "Bob")
        .args(["edit", &id, "--status", "Planned", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2003"));
    ib_as(dir.path(), "Bob")
        .args(["delete", &id, "--force"])
        .assert()
        .failure();

    let edited = json_of(ib_as(dir.path(), "Alice").args(["edit", &id, "--status", "in progress"]));
    assert_eq!(edited["status"], "In Progress");
    assert_eq!(edited["title"], "Dark Mode");
    assert_eq!(edited["tags"], serde_json::json!(["ux"]));

    ib_as(dir.path(), "Alice")
        .args(["delete", &id, "--force"])
        .assert()
        .success();
    ib_cmd(dir.path())
        .args(["show", &id, "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"));
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[test]
fn unmatched_tag_shows_nothing() {
    let dir = init_board();
    add_idea(dir.path(), "Alice", &["-t", "Dark Mode", "-d", "night", "--tags", "ux"]);

    let list = json_of(ib_cmd(dir.path()).args(["list", "--tag", "urgent"]));
    assert_eq!(list["shown"], 0);
    assert_eq!(list["total"], 1);
    ib_cmd(dir.path())
        .args(["list", "--tag", "urgent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("view: ?tag=urgent"));
}

#[test]
fn mine_needs_sign_in_and_filters_by_assignee() {
    let dir = init_board();
    add_idea(dir.path(), "Alice", &["-t", "Mine", "-d", "x", "--assign", "Alice"]);
    add_idea(dir.path(), "Alice", &["-t", "Theirs", "-d", "x", "--assign", "Bob"]);
    add_idea(dir.path(), "Alice", &["-t", "Nobody", "-d", "x"]);

    ib_cmd(dir.path())
        .args(["list", "--mine", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2003"));

    let list = json_of(ib_as(dir.path(), "Alice").args(["list", "--mine"]));
    assert_eq!(listed_titles(&list), ["Mine"]);
    assert_eq!(list["view"], "?assigned=true");
}

#[test]
fn printed_view_reproduces_the_listing() {
    let dir = init_board();
    add_idea(dir.path(), "Alice", &["-t", "Dark Mode", "-d", "night", "-c", "UI", "--tags", "ux"]);
    add_idea(dir.path(), "Alice", &["-t", "Dark API", "-d", "dark", "-c", "Backend", "--tags", "ux"]);
    add_idea(dir.path(), "Alice", &["-t", "Light Mode", "-d", "day", "-c", "UI"]);

    let first = json_of(ib_cmd(dir.path()).args([
        "list", "--search", "dark", "--tag", "ux", "--sort", "title",
    ]));
    assert_eq!(listed_titles(&first), ["Dark API", "Dark Mode"]);
    let view = first["view"].as_str().expect("view").to_string();
    assert_eq!(view, "?search=dark&sort=title&tag=ux");

    let again = json_of(ib_cmd(dir.path()).args(["list", "--view", &view]));
    assert_eq!(again["list"], first["list"]);
    assert_eq!(again["view"], first["view"]);
}

#[test]
fn timeline_groups_by_due_month() {
    let dir = init_board();
    add_idea(dir.path(), "Alice", &["-t", "one", "-d", "x", "--due", "2025-03-05"]);
    add_idea(dir.path(), "Alice", &["-t", "two", "-d", "x"]);
    add_idea(dir.path(), "Alice", &["-t", "three", "-d", "x", "--due", "2025-03-28"]);

    let list = json_of(ib_cmd(dir.path()).args(["list", "--timeline"]));
    assert_eq!(list["list"]["mode"], "timeline");
    let sections = list["list"]["entries"].as_array().expect("sections");
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["heading"], "Mar 2025");
    assert_eq!(sections[0]["ideas"].as_array().map(Vec::len), Some(2));
    assert_eq!(sections[1]["heading"], "No Due Date");
    assert_eq!(list["view"], "");

    ib_cmd(dir.path())
        .args(["list", "--timeline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Mar 2025"))
        .stdout(predicate::str::contains("view: (default)"));
}

#[test]
fn tags_and_stats_summarize_the_board() {
    let dir = init_board();
    let id = add_idea(dir.path(), "Alice", &["-t", "a", "-d", "x", "--tags", "ux,api"]);
    add_idea(dir.path(), "Alice", &["-t", "b", "-d", "x", "--tags", "ux", "-s", "Completed"]);
    vote(dir.path(), &id, 2);

    let tags = json_of(ib_cmd(dir.path()).arg("tags"));
    assert_eq!(tags[0]["tag"], "ux");
    assert_eq!(tags[0]["count"], 2);
    assert_eq!(tags[1]["tag"], "api");

    let stats = json_of(ib_cmd(dir.path()).arg("stats"));
    assert_eq!(stats["total_ideas"], 2);
    assert_eq!(stats["total_votes"], 2);
    assert_eq!(stats["top_idea"]["title"], "a");
    assert_eq!(stats["unassigned"], 2);
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

#[test]
fn export_then_import_round_trips() {
    let dir = init_board();
    add_idea(dir.path(), "Alice", &["-t", "Dark Mode", "-d", "night", "--tags", "ux"]);
    let file = dir.path().join("backup.json");
    ib_cmd(dir.path())
        .args(["export", "-o"])
        .arg(&file)
        .assert()
        .success();

    let other = init_board();
    let result = json_of(ib_cmd(other.path()).arg("import").arg(&file).arg("--yes"));
    assert_eq!(result["imported"], 1);
    assert_eq!(result["replaced"], 0);

    let list = json_of(ib_cmd(other.path()).arg("list"));
    assert_eq!(listed_titles(&list), ["Dark Mode"]);
}

#[test]
fn rejected_import_leaves_board_unchanged() {
    let dir = init_board();
    add_idea(dir.path(), "Alice", &["-t", "Keep me", "-d", "x"]);
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{\"ideas\": []}").expect("write");

    ib_cmd(dir.path())
        .args(["import", "--yes", "--json"])
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("E3001"));

    let list = json_of(ib_cmd(dir.path()).arg("list"));
    assert_eq!(listed_titles(&list), ["Keep me"]);
}

#[test]
fn piped_import_without_yes_is_refused() {
    let dir = init_board();
    add_idea(dir.path(), "Alice", &["-t", "Keep me", "-d", "x"]);
    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "[]").expect("write");

    ib_cmd(dir.path())
        .args(["import", "--json"])
        .arg(&empty)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cancelled"));

    let list = json_of(ib_cmd(dir.path()).arg("list"));
    assert_eq!(listed_titles(&list), ["Keep me"]);
}

#[test]
fn piped_delete_without_force_is_refused() {
    let dir = init_board();
    let id = add_idea(dir.path(), "Alice", &["-t", "Keep me", "-d", "x"]);

    ib_as(dir.path(), "Alice")
        .args(["delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    let shown = json_of(ib_cmd(dir.path()).args(["show", &id]));
    assert_eq!(shown["title"], "Keep me");
}

#[test]
fn time_specifiers_in_date_format_are_reported() {
    let dir = init_board();
    add_idea(dir.path(), "Alice", &["-t", "Dated", "-d", "x", "--due", "2025-03-31"]);
    std::fs::write(
        dir.path().join(".ideaboard/config.toml"),
        "[display]\ndate_format = \"%Y-%m-%d %H:%M\"\n",
    )
    .expect("write config");

    ib_cmd(dir.path())
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("date_format"));
}

#[test]
fn ids_of_legacy_records_stay_stable() {
    let dir = init_board();
    std::fs::write(
        dir.path().join(".ideaboard/store/ideas.json"),
        r#"[{"title":"legacy","description":"no id yet"}]"#,
    )
    .expect("write blob");

    let first = json_of(ib_cmd(dir.path()).arg("list"));
    let second = json_of(ib_cmd(dir.path()).arg("list"));
    let id = first["list"]["entries"][0]["id"].as_str().expect("id").to_string();
    assert_eq!(second["list"]["entries"][0]["id"], id.as_str());

    let voted = json_of(ib_cmd(dir.path()).args(["vote", &id]));
    assert_eq!(voted["votes"], 1);
}

#[test]
fn import_normalizes_loose_records() {
    let dir = init_board();
    let file = dir.path().join("loose.json");
    std::fs::write(
        &file,
        r#"[{"title": "Old idea", "votes": -4, "status": "Bogus"}, 42]"#,
    )
    .expect("write");

    ib_cmd(dir.path()).arg("import").arg(&file).arg("--yes").assert().success();
    let list = json_of(ib_cmd(dir.path()).arg("list"));
    let idea = &list["list"]["entries"][0];
    assert_eq!(list["shown"], 1);
    assert_eq!(idea["votes"], 0);
    assert_eq!(idea["status"], "New");
    assert_eq!(idea["category"], "Other");
    assert_eq!(idea["author"], "Initial Import");
    assert_eq!(idea["assignedTo"], "Unassigned");
}

#[test]
fn completions_are_generated() {
    let dir = TempDir::new().expect("tempdir");
    ib_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ib"));
}
