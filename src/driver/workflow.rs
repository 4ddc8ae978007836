//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::info;

use std::sync::Arc;

use crate::adapter::azure::AzureBlobClientFactory;
use crate::adapter::config::Config;
use crate::adapter::logging::ConsoleTaskLogger;
use crate::adapter::repositories::local_file_repository::LocalFileRepository;
use crate::application::dto::upload_request::UploadRequest;
use crate::application::use_cases::copy_to_storage::{CopySummary, CopyToStorageUseCase};
use crate::domain::entities::upload_plan::{PlannedAction, UploadPlan};
use crate::domain::repositories::blob_storage::BlobClientFactory;

use super::cli::Args;

/// Merge CLI arguments over the configuration file
///
/// Command-line sources replace the configured source list, and likewise for destinations
pub fn build_request(config: &Config, args: &Args) -> UploadRequest {
    let pick = |arg: &Option<String>, configured: &Option<String>| {
        arg.clone().or_else(|| configured.clone()).unwrap_or_default()
    };

    let source_files = if args.sources.is_empty() {
        config.source_files.clone()
    } else {
        args.sources.clone()
    };

    let destination_files = if args.destinations.is_empty() {
        config.destination_files.clone()
    } else {
        Some(args.destinations.clone())
    };

    UploadRequest {
        container_name: pick(&args.container, &config.container_name),
        endpoint: pick(&args.endpoint, &config.endpoint),
        storage_account_name: pick(&args.account_name, &config.storage_account_name),
        storage_account_key: pick(&args.account_key, &config.storage_account_key),
        source_files,
        destination_files,
    }
}

/// Render one plan entry for dry-run output
pub fn describe_plan_entry(source: &str, destination: &str, action: &PlannedAction) -> String {
    match action {
        PlannedAction::Upload => format!("{} -> {}", source, destination),
        PlannedAction::Skip { content_type } => {
            format!("{} -> {} (skipped, ContentType: {})", source, destination, content_type)
        }
    }
}

/// Copy To Storage Workflow
pub struct CopyToStorageWorkflow {
    config: Config,
    client_factory: Arc<dyn BlobClientFactory>,
    file_repository: Arc<LocalFileRepository>,
}

impl CopyToStorageWorkflow {
    /// Create a new workflow backed by Azure Blob Storage
    pub fn new(config: Config) -> Self {
        Self::with_client_factory(config, Arc::new(AzureBlobClientFactory::new()))
    }

    /// Create a new workflow with an injected storage client factory
    pub fn with_client_factory(config: Config, client_factory: Arc<dyn BlobClientFactory>) -> Self {
        Self {
            config,
            client_factory,
            file_repository: Arc::new(LocalFileRepository::new()),
        }
    }

    /// Execute the copy workflow
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting blob copy...");
        info!("Dry run: {}", args.dry_run);

        let request = build_request(&self.config, &args);
        request.validate()?;

        if !args.quiet {
            println!("✓ Using configuration:");
            println!("  Container: {}", request.container_name);
            println!("  Endpoint: {}", request.endpoint);
            println!("  Account: {}", request.storage_account_name);
            println!("  Source files: {}", request.source_files.len());
        }

        if args.dry_run {
            let plan = request.plan()?;
            Self::print_plan(&plan);
            return Ok(());
        }

        let logger = Arc::new(ConsoleTaskLogger::new(args.quiet));
        let use_case = CopyToStorageUseCase::new(
            self.client_factory.clone(),
            self.file_repository.clone(),
            logger,
        );

        let summary = use_case.execute(&request).await?;
        Self::report(&summary, args.quiet);

        Ok(())
    }

    fn print_plan(plan: &UploadPlan) {
        println!("✓ Dry-run mode (not actually uploading)");
        println!(
            "  Would upload {} file(s), skip {}:",
            plan.upload_count(),
            plan.skip_count()
        );
        for entry in plan.entries() {
            println!(
                "    - {}",
                describe_plan_entry(&entry.source, &entry.destination, &entry.action)
            );
        }
    }

    fn report(summary: &CopySummary, quiet: bool) {
        info!(
            "Uploaded {} file(s), {} bytes ({} replaced, {} skipped)",
            summary.uploaded, summary.bytes_uploaded, summary.replaced, summary.skipped
        );
        if !quiet {
            println!(
                "✓ Uploaded {} file(s) ({} replaced, {} skipped)",
                summary.uploaded, summary.replaced, summary.skipped
            );
            println!("✓ Copy complete!");
        }
    }
}
