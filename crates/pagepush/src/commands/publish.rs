//! `pagepush publish` command implementation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use pagepush_config::{CliSettings, Config, ConfluenceConfig};
use pagepush_confluence::{ConfluenceApi, ConfluenceClient};
use pagepush_confluence::publisher::{
    AssetOutcome, PagePublisher, PublishReport, TreeWalker, WalkSummary,
};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the publish command.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Page to publish onto, or to mirror the tree under with --recursive.
    #[arg(long)]
    page_id: u64,

    /// HTML file, or directory with --recursive.
    #[arg(short, long)]
    input_path: PathBuf,

    /// Mirror the directory tree as child pages.
    #[arg(short, long)]
    recursive: bool,

    /// Space in which pages are created (overrides config).
    #[arg(long)]
    space_key: Option<String>,

    /// Confluence server URL (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Path to configuration file (default: auto-discover pagepush.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log progress of every page and attachment.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid arguments or configuration, when a page
    /// of the tree cannot be created, or when a single-file publish fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
            space_key: self.space_key.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let conf_config = config.require_confluence()?;

        check_input(&self.input_path, self.recursive)?;

        let client = create_confluence_client(conf_config);
        let page_id = self.page_id.to_string();

        if self.recursive {
            let space_key = conf_config.space_key.as_deref().ok_or_else(|| {
                CliError::Validation(
                    "--space-key (or confluence.space_key) is required with --recursive"
                        .to_owned(),
                )
            })?;
            output.info(&format!(
                "Publishing {} under page {} in {}...",
                self.input_path.display(),
                page_id,
                space_key
            ));
            let summary = TreeWalker::new(&client, space_key).walk(&self.input_path, &page_id)?;
            print_walk_summary(&output, &summary);
        } else {
            output.info(&format!(
                "Publishing {} to page {}...",
                self.input_path.display(),
                page_id
            ));
            let report = PagePublisher::new(&client).publish(&self.input_path, &page_id)?;
            print_publish_report(&output, &report, client.base_url());
        }

        Ok(())
    }
}

/// Check the input path kind against the mode.
fn check_input(path: &Path, recursive: bool) -> Result<(), CliError> {
    if recursive && !path.is_dir() {
        return Err(CliError::Validation(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    if !recursive && !path.is_file() {
        return Err(CliError::Validation(format!(
            "{} is not a file (use --recursive for directories)",
            path.display()
        )));
    }
    Ok(())
}

fn create_confluence_client(conf_config: &ConfluenceConfig) -> ConfluenceClient {
    ConfluenceClient::new(
        &conf_config.base_url,
        &conf_config.token,
        Duration::from_secs(conf_config.timeout),
    )
}

fn print_publish_report(output: &Output, report: &PublishReport, base_url: &str) {
    output.success("\nPage updated successfully!");
    output.info(&format!("ID: {}", report.page.id));
    output.info(&format!("Title: {}", report.page.title));
    output.info(&format!("Version: {}", report.page.version.number));
    output.info(&format!(
        "URL: {base_url}/pages/viewpage.action?pageId={}",
        report.page.id
    ));

    if report.uploaded() > 0 {
        output.info(&format!("Attachments uploaded: {}", report.uploaded()));
    }
    if report.already_present() > 0 {
        output.info(&format!(
            "Attachments already present: {}",
            report.already_present()
        ));
    }
    for asset in &report.assets {
        match &asset.outcome {
            AssetOutcome::Missing => {
                output.warning(&format!("  - {}: file not found", asset.href));
            }
            AssetOutcome::Failed(detail) => {
                output.warning(&format!("  - {}: upload failed: {detail}", asset.href));
            }
            AssetOutcome::Uploaded | AssetOutcome::AlreadyExists => {}
        }
    }
}

fn print_walk_summary(output: &Output, summary: &WalkSummary) {
    output.highlight("\nPublish complete.");
    output.info(&format!("Directory pages: {}", summary.directory_pages));
    output.info(&format!("File pages: {}", summary.file_pages));
    output.info(&format!("Reused pages: {}", summary.reused_pages));
    output.info(&format!("Published: {}", summary.published));
    output.info(&format!(
        "Attachments uploaded: {}",
        summary.attachments_uploaded
    ));
    output.info(&format!(
        "Attachments already present: {}",
        summary.attachments_existing
    ));

    if summary.skipped.is_empty() {
        output.success("\nNothing skipped.");
    } else {
        output.warning(&format!("\nSkipped ({}):", summary.skipped.len()));
        for item in &summary.skipped {
            output.info(&format!("  - {}: {}", item.path.display(), item.reason));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_check_input_recursive_needs_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("index.html");
        std::fs::write(&file, "<p>x</p>").unwrap();

        assert!(check_input(dir.path(), true).is_ok());
        let err = check_input(&file, true).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_check_input_single_needs_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("index.html");
        std::fs::write(&file, "<p>x</p>").unwrap();

        assert!(check_input(&file, false).is_ok());
        let err = check_input(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("use --recursive"));
    }

    #[test]
    fn test_check_input_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(check_input(&missing, false).is_err());
        assert!(check_input(&missing, true).is_err());
    }

    #[test]
    fn test_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            args: PublishArgs,
        }

        let cli = TestCli::try_parse_from([
            "pagepush",
            "--page-id",
            "12345",
            "--input-path",
            "site/docs",
            "--recursive",
            "--space-key",
            "DOCS",
        ])
        .unwrap();

        assert_eq!(cli.args.page_id, 12345);
        assert_eq!(cli.args.input_path, PathBuf::from("site/docs"));
        assert!(cli.args.recursive);
        assert_eq!(cli.args.space_key.as_deref(), Some("DOCS"));
        assert!(!cli.args.verbose);
    }

    #[test]
    fn test_page_id_must_be_integer() {
        use clap::Parser;

        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            args: PublishArgs,
        }

        let result =
            TestCli::try_parse_from(["pagepush", "--page-id", "abc", "--input-path", "x.html"]);
        assert!(result.is_err());
    }
}
