use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from any config on the host
fn viewroute(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("viewroute").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("BASE_URL")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_routes_listing() {
    let dir = TempDir::new().unwrap();
    viewroute(&dir)
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("/authorisation"))
        .stdout(predicate::str::contains("TutorialView"))
        .stdout(predicate::str::contains("(fallback)"));
}

#[test]
fn test_routes_json() {
    let dir = TempDir::new().unwrap();
    let output = viewroute(&dir)
        .args(["--base", "/app/", "routes", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let routes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let routes = routes.as_array().unwrap();
    assert_eq!(routes.len(), 4);
    assert_eq!(routes[0]["name"], "home");
    assert_eq!(routes[0]["href"], "/app/");
    assert_eq!(routes[3]["fallback"], true);
}

#[test]
fn test_open_round_trip() {
    let dir = TempDir::new().unwrap();
    viewroute(&dir)
        .args(["open", "/", "/tutorial", "/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome"))
        .stdout(predicate::str::contains("Tutorial (1/3)"))
        .stdout(predicate::str::contains("/ [home]"));
}

#[test]
fn test_open_unknown_path_renders_fallback() {
    let dir = TempDir::new().unwrap();
    viewroute(&dir)
        .args(["open", "/does-not-exist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[not-found]"))
        .stdout(predicate::str::contains("Unknown route: /does-not-exist"));
}

#[test]
fn test_base_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("viewroute.json"), r#"{ "base_url": "/app/" }"#).unwrap();

    viewroute(&dir)
        .args(["open", "/tutorial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/app/tutorial [tutorial]"));
}

#[test]
fn test_base_from_environment() {
    let dir = TempDir::new().unwrap();
    viewroute(&dir)
        .env("BASE_URL", "/docs")
        .args(["open", "/authorisation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/docs/authorisation [authorisation]"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("viewroute.json"), "not json").unwrap();

    viewroute(&dir)
        .arg("routes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_interactive_shell() {
    let dir = TempDir::new().unwrap();
    viewroute(&dir)
        .write_stdin("/tutorial\nback\nwhere\nforward\nnowhere\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome"))
        .stdout(predicate::str::contains("/tutorial [tutorial]"))
        .stdout(predicate::str::contains("/ [home]"))
        .stdout(predicate::str::contains("unknown command 'nowhere'"));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    viewroute(&dir)
        .args(["open", "/tutorial"])
        .assert()
        .success()
        .stderr(predicate::str::contains("navigation committed"))
        .stderr(predicate::str::contains("loading view").not())
        .stdout(predicate::str::contains("navigation committed").not());

    viewroute(&dir)
        .args(["--verbose", "open", "/tutorial"])
        .assert()
        .success()
        .stderr(predicate::str::contains("loading view"));
}
