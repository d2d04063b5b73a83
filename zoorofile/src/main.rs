//! Command-line interface for the Zoorofile binary.
//!
//! `generate` fetches the trailing week's activity and rewrites the managed
//! region of README.md; `check-assets` verifies that every mood has a pet
//! image. Invoking the binary without a subcommand runs `generate`.

use std::{
    io,
    path::{Path, PathBuf},
    process
};

use clap::{ArgAction, Args, Parser, Subcommand};
use time::OffsetDateTime;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zoorofile::{
    Activity, ContributionClient, END_MARKER, Error, START_MARKER, Settings, Window,
    build_document, load_config, missing_pet_images, patch, read_readme, readme_io_error,
    update_readme
};

/// Command line interface for rendering the Zoorofile README section.
#[derive(Debug, Parser)]
#[command(
    name = "zoorofile",
    version,
    about = "Render your git pet into README.md",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Arguments used when no subcommand is given.
    #[command(flatten)]
    generate: GenerateArgs
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch weekly activity and update the README.
    Generate(GenerateArgs),
    /// Verify that a pet image exists for every mood.
    #[command(name = "check-assets")]
    CheckAssets(CheckAssetsArgs)
}

#[derive(Debug, Args, Clone)]
struct GenerateArgs {
    /// Path to the JSON or YAML configuration file.
    #[arg(long = "config", value_name = "PATH", default_value = "config.json")]
    config: PathBuf,

    /// Project root containing the assets directory.
    #[arg(long = "root", value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// README to update; defaults to README.md under the project root.
    #[arg(long = "readme", value_name = "PATH")]
    readme: Option<PathBuf>,

    /// Print the updated README to stdout instead of writing it.
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Overrides the configured GitHub username.
    #[arg(long = "username", env = "ZOOROFILE_USERNAME", value_name = "LOGIN")]
    username: Option<String>,

    /// Token used for every GitHub API call; a run without one fails before
    /// any request is made.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>
}

#[derive(Debug, Args)]
struct CheckAssetsArgs {
    /// Path to the JSON or YAML configuration file.
    #[arg(long = "config", value_name = "PATH", default_value = "config.json")]
    config: PathBuf,

    /// Project root containing the assets directory.
    #[arg(long = "root", value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Overrides the configured GitHub username.
    #[arg(long = "username", env = "ZOOROFILE_USERNAME", value_name = "LOGIN")]
    username: Option<String>
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(io::stderr)
        .init();

    if let Err(error) = run(Cli::parse()).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Some(Command::Generate(args)) => run_generate(args).await,
        Some(Command::CheckAssets(args)) => run_check_assets(&args),
        None => run_generate(cli.generate).await
    }
}

fn load_settings(config: &Path, username: Option<&str>) -> Result<Settings, Error> {
    load_config(config)?.resolve(username)
}

fn require_token(token: Option<&str>) -> Result<&str, Error> {
    token
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::validation("GITHUB_TOKEN must be set"))
}

/// Runs the full pipeline. The README write is the last action.
///
/// # Errors
///
/// Returns an [`Error`] for invalid configuration, a missing token, a missing
/// pet image, or a failed README write. Remote failures only degrade output.
async fn run_generate(args: GenerateArgs) -> Result<(), Error> {
    let token = require_token(args.token.as_deref())?;
    let settings = load_settings(&args.config, args.username.as_deref())?;
    info!("Generating Zoorofile for {} with a {}", settings.username, settings.animal);

    let now = OffsetDateTime::now_utc();
    let client =
        ContributionClient::new(token, settings.username.clone(), Window::trailing_week(now))?;
    let snapshot = Activity::collect(&client).await.into_snapshot();

    let document = build_document(&settings, &snapshot, &args.root, now)?;
    let readme_path = args.readme.unwrap_or_else(|| args.root.join("README.md"));

    if args.dry_run {
        let existing = read_readme(&readme_path)?;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        return write_document(&mut handle, &patch(&existing, &document, START_MARKER, END_MARKER));
    }

    update_readme(&readme_path, &document)?;
    Ok(())
}

fn write_document<W: io::Write>(writer: &mut W, document: &str) -> Result<(), Error> {
    writer
        .write_all(document.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| readme_io_error(Path::new("<stdout>"), e))
}

fn run_check_assets(args: &CheckAssetsArgs) -> Result<(), Error> {
    let settings = load_settings(&args.config, args.username.as_deref())?;
    let missing = missing_pet_images(&args.root, &settings.animal);

    match missing.into_iter().next() {
        None => {
            info!("All pet images for '{}' are present", settings.animal);
            Ok(())
        }
        Some(path) => Err(Error::MissingAsset {
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use clap::Parser;
    use tempfile::tempdir;
    use zoorofile::Mood;

    use super::{
        Cli, Command, GenerateArgs, require_token, run_check_assets, run_generate, write_document
    };

    #[test]
    fn cli_defaults_to_generate_arguments() {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "--dry-run"])
            .expect("failed to parse CLI");

        assert!(cli.command.is_none());
        assert!(cli.generate.dry_run);
        assert_eq!(cli.generate.config.to_str(), Some("config.json"));
        assert_eq!(cli.generate.root.to_str(), Some("."));
        assert!(cli.generate.readme.is_none());
    }

    #[test]
    fn generate_subcommand_accepts_overrides() {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "generate",
            "--config",
            "zoo.yaml",
            "--readme",
            "profile/README.md",
            "--username",
            "hubot",
            "--token",
            "ghp_example"
        ])
        .expect("failed to parse CLI");

        let args = match cli.command.expect("missing generate command") {
            Command::Generate(args) => args,
            other => panic!("unexpected command variant: {other:?}")
        };
        assert_eq!(args.config.to_str(), Some("zoo.yaml"));
        assert_eq!(args.username.as_deref(), Some("hubot"));
        assert_eq!(args.token.as_deref(), Some("ghp_example"));
    }

    #[test]
    fn top_level_arguments_conflict_with_subcommands() {
        let result = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "--dry-run", "generate"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "generate", "--dry-run"])
            .expect("failed to parse CLI");
        match cli.command.expect("missing generate command") {
            Command::Generate(args) => assert!(args.dry_run),
            other => panic!("unexpected command variant: {other:?}")
        }
    }

    #[tokio::test]
    async fn generate_without_token_fails_before_loading_config() {
        let temp = tempdir().expect("failed to create tempdir");
        let args = GenerateArgs {
            config:   temp.path().join("absent.json"),
            root:     temp.path().to_path_buf(),
            readme:   None,
            dry_run:  false,
            username: Some("octocat".to_owned()),
            token:    None
        };

        let error = run_generate(args).await.expect_err("expected validation error");
        assert!(matches!(error, zoorofile::Error::Validation { .. }));
        assert!(!temp.path().join("README.md").exists());
    }

    #[test]
    fn missing_token_is_rejected() {
        let error = require_token(None).expect_err("expected validation error");
        match error {
            zoorofile::Error::Validation {
                message
            } => assert_eq!(message, "GITHUB_TOKEN must be set"),
            other => panic!("unexpected error variant: {other:?}")
        }
        assert!(require_token(Some("   ")).is_err());
        assert_eq!(require_token(Some(" ghp_x ")).expect("token"), "ghp_x");
    }

    #[test]
    fn write_document_writes_bytes() {
        let mut buffer = Cursor::new(Vec::new());
        write_document(&mut buffer, "hello").expect("write failed");
        assert_eq!(buffer.into_inner(), b"hello");
    }

    #[test]
    fn check_assets_passes_when_all_images_exist() {
        let temp = tempdir().expect("failed to create tempdir");
        let config_path = temp.path().join("config.json");
        fs::write(&config_path, r#"{ "github_username": "octocat", "animal": "cat" }"#)
            .expect("failed to write config");
        fs::create_dir_all(temp.path().join("assets")).expect("failed to create assets");
        for mood in Mood::ALL {
            fs::write(temp.path().join(format!("assets/cat_{}.png", mood.key())), b"png")
                .expect("failed to write image");
        }

        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "check-assets",
            "--config",
            config_path.to_str().expect("utf8"),
            "--root",
            temp.path().to_str().expect("utf8")
        ])
        .expect("failed to parse CLI");

        let args = match cli.command.expect("missing command") {
            Command::CheckAssets(args) => args,
            other => panic!("unexpected command variant: {other:?}")
        };
        run_check_assets(&args).expect("all assets present");
    }

    #[test]
    fn check_assets_reports_first_missing_image() {
        let temp = tempdir().expect("failed to create tempdir");
        let config_path = temp.path().join("config.json");
        fs::write(&config_path, r#"{ "github_username": "octocat" }"#)
            .expect("failed to write config");

        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "check-assets",
            "--config",
            config_path.to_str().expect("utf8"),
            "--root",
            temp.path().to_str().expect("utf8")
        ])
        .expect("failed to parse CLI");

        let args = match cli.command.expect("missing command") {
            Command::CheckAssets(args) => args,
            other => panic!("unexpected command variant: {other:?}")
        };
        let error = run_check_assets(&args).expect_err("expected missing asset");
        match error {
            zoorofile::Error::MissingAsset {
                path
            } => assert!(path.ends_with("assets/raccoon_sleeping.png")),
            other => panic!("unexpected error variant: {other:?}")
        }
    }
}
