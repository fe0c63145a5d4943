use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("lock-task-bridge").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", "/nonexistent/lock-task-bridge-tests");
    cmd
}

fn config_file(dir: &assert_fs::TempDir, content: &str) -> assert_fs::fixture::ChildPath {
    let file = dir.child("bridge.yaml");
    file.write_str(content).unwrap();
    file
}

#[test]
fn status_on_simulated_platform_is_false() {
    cmd()
        .args(["--platform", "simulated", "status"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn start_on_simulated_platform_is_true() {
    cmd()
        .args(["--platform", "simulated", "start"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn old_platform_reports_false() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = config_file(&dir, "platform: simulated\nsimulated:\n  api_level: 19\n");

    for command in ["start", "stop", "status"] {
        cmd()
            .arg("--config")
            .arg(config.path())
            .arg(command)
            .assert()
            .success()
            .stdout("false\n");
    }
}

#[test]
fn denied_start_reports_false() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = config_file(&dir, "platform: simulated\nsimulated:\n  deny_start: true\n");

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("start")
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn stop_when_initially_locked() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = config_file(&dir, "platform: simulated\nsimulated:\n  initially_locked: true\n");

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("stop")
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn call_unknown_method_is_not_implemented() {
    cmd()
        .args(["--platform", "simulated", "call", "doSomethingElse"])
        .assert()
        .success()
        .stdout("{\"notImplemented\":true}\n");
}

#[test]
fn call_known_method() {
    cmd()
        .args(["--platform", "simulated", "call", "isLockTaskMode"])
        .assert()
        .success()
        .stdout("{\"result\":false}\n");
}

#[test]
fn serve_answers_each_call() {
    let input = "{\"method\":\"isLockTaskMode\"}\n\
                 {\"method\":\"startLockTask\"}\n\
                 {\"method\":\"isLockTaskMode\"}\n\
                 {\"method\":\"stopLockTask\"}\n\
                 {\"method\":\"isLockTaskMode\"}\n\
                 {\"method\":\"doSomethingElse\"}\n";

    cmd()
        .args(["--platform", "simulated", "serve"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(
            "{\"result\":false}\n\
             {\"result\":true}\n\
             {\"result\":true}\n\
             {\"result\":true}\n\
             {\"result\":false}\n\
             {\"notImplemented\":true}\n",
        );
}

#[test]
fn show_config_prints_yaml() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = config_file(&dir, "platform: simulated\nmin_api_level: 23\n");

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("show-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("platform: simulated"))
        .stdout(predicate::str::contains("min_api_level: 23"));
}

#[test]
fn platform_flag_overrides_config() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = config_file(&dir, "platform: android\n");

    cmd()
        .arg("--config")
        .arg(config.path())
        .args(["--platform", "simulated", "show-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("platform: simulated"));
}

#[test]
fn android_without_tools_reports_false() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = config_file(
        &dir,
        "platform: android\nandroid:\n  task_id: 7\n  command_prefix: [nonexistent_command_xyz]\n",
    );

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("start")
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn missing_config_file_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    cmd()
        .arg("--config")
        .arg(dir.child("missing.yaml").path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn invalid_config_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = config_file(&dir, "min_api_level: 0\n");

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_api_level"));
}
