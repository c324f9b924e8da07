use std::process::{Command, Output};
use std::str;
use tempfile::TempDir;

fn cli_command(home: &TempDir, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_o365cli"));
    command
        .args(args)
        .env("HOME", home.path())
        .env_remove("O365CLI_ACCESS_TOKEN")
        .env_remove("RUST_LOG")
        .current_dir(home.path());
    command
}

/// Run the binary with an isolated home directory and no access token
fn run_cli(home: &TempDir, args: &[&str]) -> Output {
    cli_command(home, args)
        .output()
        .expect("Failed to execute command")
}

/// Run the binary with `token` supplied through the environment
fn run_cli_with_token(home: &TempDir, token: &str, args: &[&str]) -> Output {
    cli_command(home, args)
        .env("O365CLI_ACCESS_TOKEN", token)
        .output()
        .expect("Failed to execute command")
}

/// Write a configuration pointing the Graph resource at `resource`
fn graph_config(home: &TempDir, resource: &str) -> String {
    let path = home.path().join("o365cli.toml");
    std::fs::write(&path, format!("[graph]\nresource = \"{}\"\n", resource)).unwrap();
    path.display().to_string()
}

const TEAM: &str = "5f5d7b71-1161-44d8-bcc1-3da710eb4171";
const CHANNEL: &str = "19:88f7e66a8dfe42be92db19505ae912a8@thread.skype";
const MESSAGE_BODY: &str = r#"{"id":"1540747442203","body":{"contentType":"text","content":"Hello"}}"#;

/// CLI interface tests
#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_cli_help() {
        let home = TempDir::new().unwrap();
        let output = run_cli(&home, &["--help"]);
        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");

        assert!(output.status.success());
        assert!(stdout.contains("Usage:"));
        assert!(stdout.contains("Commands:"));
        assert!(stdout.contains("graph"));
        assert!(stdout.contains("spo"));
        assert!(stdout.contains("status"));
        assert!(stdout.contains("config"));
    }

    #[test]
    fn test_cli_version() {
        let home = TempDir::new().unwrap();
        let output = run_cli(&home, &["version"]);
        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");

        assert!(output.status.success());
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_teams_message_get_help() {
        let home = TempDir::new().unwrap();
        let output = run_cli(&home, &["graph", "teams-channel-message-get", "--help"]);
        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");

        assert!(stdout.contains("--teamId"));
        assert!(stdout.contains("--channelId"));
        assert!(stdout.contains("--messageId"));
    }

    #[test]
    fn test_cli_invalid_command() {
        let home = TempDir::new().unwrap();
        let output = run_cli(&home, &["invalid-command"]);
        assert!(!output.status.success());
    }

    #[test]
    fn test_invalid_team_id_fails_before_any_request() {
        let home = TempDir::new().unwrap();
        let output = run_cli(
            &home,
            &[
                "graph",
                "teams-channel-message-get",
                "--teamId",
                "not-a-guid",
                "--channelId",
                "19:abc@thread.skype",
                "--messageId",
                "1",
            ],
        );
        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr.contains("Error: not-a-guid is not a valid GUID"));
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn test_missing_message_id() {
        let home = TempDir::new().unwrap();
        let output = run_cli(
            &home,
            &[
                "graph",
                "teams-channel-message-get",
                "-i",
                "5f5d7b71-1161-44d8-bcc1-3da710eb4171",
                "-c",
                "19:abc@thread.skype",
            ],
        );
        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr.contains("Required parameter messageId missing"));
    }

    #[test]
    fn test_app_get_mutually_exclusive_options() {
        let home = TempDir::new().unwrap();
        let output = run_cli(
            &home,
            &[
                "spo",
                "app-get",
                "--id",
                "b2307a39-e878-458b-bc90-03bc578531d6",
                "--name",
                "solution.sppkg",
            ],
        );
        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr.contains("Specify either the id or the name but not both"));
    }

    #[test]
    fn test_app_get_sitecollection_requires_catalog_url() {
        let home = TempDir::new().unwrap();
        let output = run_cli(
            &home,
            &["spo", "app-get", "--name", "solution.sppkg", "--scope", "sitecollection"],
        );
        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr.contains("You must specify appCatalogUrl when the scope is sitecollection"));
    }

    #[test]
    fn test_app_get_without_login() {
        let home = TempDir::new().unwrap();
        let output = run_cli(&home, &["spo", "app-get", "--name", "solution.sppkg"]);
        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr.contains("Error: Log in to SharePoint Online first"));
    }

    #[test]
    fn test_status_without_login() {
        let home = TempDir::new().unwrap();
        let output = run_cli(&home, &["status"]);
        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");

        assert!(output.status.success());
        assert_eq!(
            stdout.trim(),
            r#"{"graph":{"connected":false},"spo":{"connected":false}}"#
        );
    }

    #[test]
    fn test_config_init_and_show() {
        let home = TempDir::new().unwrap();
        let output = run_cli(&home, &["config", "init"]);
        assert!(output.status.success());
        assert!(home.path().join(".o365cli").join("config.toml").exists());

        let output = run_cli(&home, &["--output", "text", "config", "show"]);
        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");
        assert!(output.status.success());
        assert!(stdout.contains("Graph resource: https://graph.microsoft.com"));
    }

    #[test]
    fn test_teams_message_get_verbose_prints_body_then_done() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock(
                "GET",
                mockito::Matcher::Regex(format!(r"^/beta/teams/{}/channels/.+/messages/1540747442203$", TEAM)),
            )
            .match_header("authorization", "Bearer env-token")
            .match_header("accept", "application/json;odata.metadata=none")
            .with_status(200)
            .with_body(MESSAGE_BODY)
            .expect(1)
            .create();

        let home = TempDir::new().unwrap();
        let config = graph_config(&home, &server.url());
        let output = run_cli_with_token(
            &home,
            "env-token",
            &[
                "--config",
                &config,
                "graph",
                "teams-channel-message-get",
                "--teamId",
                TEAM,
                "--channelId",
                CHANNEL,
                "--messageId",
                "1540747442203",
                "--verbose",
            ],
        );
        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");
        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");

        mock.assert();
        assert!(output.status.success(), "stderr: {}", stderr);
        assert_eq!(stdout, format!("{}\n", MESSAGE_BODY));
        assert_eq!(stderr.lines().last(), Some("DONE"));
    }

    #[test]
    fn test_quiet_suppresses_done() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .match_header("authorization", "Bearer env-token")
            .with_status(200)
            .with_body(MESSAGE_BODY)
            .expect(1)
            .create();

        let home = TempDir::new().unwrap();
        let config = graph_config(&home, &server.url());
        let output = run_cli_with_token(
            &home,
            "env-token",
            &[
                "--config",
                &config,
                "--quiet",
                "--verbose",
                "graph",
                "teams-channel-message-get",
                "-i",
                TEAM,
                "-c",
                CHANNEL,
                "-m",
                "1540747442203",
            ],
        );
        let stdout = str::from_utf8(&output.stdout).expect("Invalid UTF-8");
        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");

        mock.assert();
        assert!(output.status.success(), "stderr: {}", stderr);
        assert_eq!(stdout, format!("{}\n", MESSAGE_BODY));
        assert!(!stderr.contains("DONE"));
    }

    #[test]
    fn test_remote_error_message_is_printed() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(404)
            .with_body(r#"{"error":{"code":"NotFound","message":"Message does not exist"}}"#)
            .create();

        let home = TempDir::new().unwrap();
        let config = graph_config(&home, &server.url());
        let output = run_cli_with_token(
            &home,
            "env-token",
            &[
                "--config",
                &config,
                "graph",
                "teams-channel-message-get",
                "-i",
                TEAM,
                "-c",
                CHANNEL,
                "-m",
                "1",
                "--verbose",
            ],
        );
        let stderr = str::from_utf8(&output.stderr).expect("Invalid UTF-8");

        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        assert!(stderr.contains("Error: Message does not exist"));
        assert!(!stderr.contains("DONE"));
    }
}
