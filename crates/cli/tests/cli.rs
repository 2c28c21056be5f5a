use assert_cmd::Command;

fn bookshelf() -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.env("BOOKSHELF_CONFIG_DIR", std::env::temp_dir().join("bookshelf-cli-no-config"))
        .env_remove("BOOKSHELF_ENV");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let output = bookshelf().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("config"));
}

#[test]
fn config_prints_defaults_as_json() {
    let output = bookshelf().arg("config").output().unwrap();
    assert!(output.status.success());

    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["environment"], "local");
    assert_eq!(settings["server"]["port"], 9000);
    assert_eq!(settings["books"]["id_length"], 16);
}

#[test]
fn config_honours_environment_overrides() {
    let output = bookshelf()
        .arg("config")
        .env("BOOKSHELF_SERVER__PORT", "9321")
        .output()
        .unwrap();
    assert!(output.status.success());

    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["server"]["port"], 9321);
}

#[test]
fn unknown_environment_fails() {
    bookshelf()
        .arg("config")
        .env("BOOKSHELF_ENV", "qa")
        .assert()
        .failure();
}
