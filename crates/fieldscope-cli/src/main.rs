//! FieldScope CLI - terminal host for the dev-tools widgets
//!
//! Provides `fieldscope tools`, `fieldscope profiles`, `fieldscope validate`,
//! and `fieldscope export`.

mod config;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fieldscope_apex::ApexRestClient;
use fieldscope_core::transform::SortDirection;
use fieldscope_core::{ApexGateway, ProfileValidator, ToolLauncher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fieldscope")]
#[command(about = "FieldScope - Salesforce dev-tools companion")]
#[command(version)]
struct Cli {
    /// Org base URL (e.g. https://example.my.salesforce.com)
    #[arg(long, global = true)]
    instance_url: Option<String>,

    /// OAuth access token for the org
    #[arg(long, global = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered dev tools
    Tools,
    /// List the profiles available for validation
    Profiles,
    /// Run an FLS validation and print the results
    Validate {
        /// Profile id or label (defaults to the standard selection)
        #[arg(short, long)]
        profile: Option<String>,

        /// Validate the fixed System Administrator profile
        #[arg(long)]
        sys_admin: bool,

        /// Case-insensitive substring filter for the permission list
        #[arg(short, long)]
        filter: Option<String>,

        /// Sort order for the permission list
        #[arg(short, long, value_enum, default_value = "asc")]
        sort: SortOrder,
    },
    /// Run an FLS validation and write the CSV artifact
    Export {
        /// Profile id or label (defaults to the standard selection)
        #[arg(short, long)]
        profile: Option<String>,

        /// Validate the fixed System Administrator profile
        #[arg(long)]
        sys_admin: bool,

        /// Output directory for the CSV file
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for SortDirection {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => SortDirection::Ascending,
            SortOrder::Desc => SortDirection::Descending,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let gateway = match connect(&cli) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Tools => run_tools(gateway).await,
        Commands::Profiles => run_profiles(gateway).await,
        Commands::Validate {
            profile,
            sys_admin,
            filter,
            sort,
        } => run_validate(gateway, profile, sys_admin, filter, sort).await,
        Commands::Export {
            profile,
            sys_admin,
            output,
        } => run_export(gateway, profile, sys_admin, &output).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn connect(cli: &Cli) -> Result<Arc<dyn ApexGateway>> {
    let connection =
        config::resolve_connection(cli.instance_url.clone(), cli.access_token.clone())?;
    Ok(Arc::new(ApexRestClient::new(
        connection.instance_url,
        connection.access_token,
    )))
}

async fn run_tools(gateway: Arc<dyn ApexGateway>) -> Result<()> {
    let mut launcher = ToolLauncher::new(gateway);
    launcher.load_tools().await;

    if let Some(message) = launcher.error_message() {
        bail!("{message}");
    }
    if !launcher.has_tools() {
        println!("No tools registered.");
        return Ok(());
    }

    println!("Tools:");
    for tool in launcher.tools() {
        println!("  {} - {}", tool.label, tool.description);
        if let Some(url) = launcher.navigation_target(&tool.key) {
            println!("      {url}");
        }
    }
    Ok(())
}

async fn run_profiles(gateway: Arc<dyn ApexGateway>) -> Result<()> {
    let mut validator = ProfileValidator::new(gateway);
    validator.load_profiles().await;

    if let Some(message) = validator.error_message() {
        bail!("{message}");
    }
    if validator.profiles().options().is_empty() {
        println!("No profiles available.");
        return Ok(());
    }

    println!("Profiles:");
    for option in validator.profiles().options() {
        let marker = if validator.profiles().selected_id() == Some(option.value.as_str()) {
            " (default)"
        } else {
            ""
        };
        println!("  {} - {}{marker}", option.value, option.label);
    }
    Ok(())
}

/// Drive one validation run the way the widget does: load profiles, apply
/// the requested selection, run, and hand back the settled controller.
async fn run_widget(
    gateway: Arc<dyn ApexGateway>,
    profile: Option<String>,
    sys_admin: bool,
) -> Result<ProfileValidator> {
    let mut validator = ProfileValidator::new(gateway);

    if sys_admin {
        validator.run_sys_admin_validation().await;
    } else {
        validator.load_profiles().await;
        if let Some(message) = validator.error_message() {
            bail!("{message}");
        }
        if let Some(wanted) = profile {
            let Some(option) = validator.profiles().resolve(&wanted) else {
                bail!("Profile not found: {wanted}");
            };
            let id = option.value.clone();
            validator.select_profile(&id);
        }
        validator.run_validation().await?;
    }

    if let Some(message) = validator.run_state().failure() {
        bail!("{message}");
    }
    Ok(validator)
}

async fn run_validate(
    gateway: Arc<dyn ApexGateway>,
    profile: Option<String>,
    sys_admin: bool,
    filter: Option<String>,
    sort: SortOrder,
) -> Result<()> {
    let mut validator = run_widget(gateway, profile, sys_admin).await?;

    if let Some(text) = filter {
        validator.set_filter_text(text);
    }
    validator.set_sort(sort.into());

    let Some(report) = validator.run_state().report() else {
        bail!("Validation produced no result.");
    };

    let profile_name = validator
        .profiles()
        .selected_label()
        .unwrap_or("(unknown profile)");
    println!("Profile: {profile_name}");
    println!("Fields checked: {}", report.total_fields_checked);

    if let Some(summary) = validator.summary() {
        println!("{}", summary.subtitle);
    }

    if validator.missing_permission_count() > 0 {
        println!(
            "\nMissing permissions ({} of {} shown):",
            validator.displayed_missing_permission_count(),
            validator.missing_permission_count()
        );
        for row in validator.displayed_missing_permissions() {
            println!("  {}", row.label);
        }
        println!("\nObjects affected: {}", validator.object_count());
    }

    if let Some(info) = validator.info_message() {
        println!("\n{info}");
    }
    Ok(())
}

async fn run_export(
    gateway: Arc<dyn ApexGateway>,
    profile: Option<String>,
    sys_admin: bool,
    output: &Path,
) -> Result<()> {
    let mut validator = run_widget(gateway, profile, sys_admin).await?;

    let export = validator.export_csv()?;

    std::fs::create_dir_all(output)?;
    let path = output.join(&export.filename);
    std::fs::write(&path, export.content)?;

    println!("Wrote CSV export to: {}", path.display());
    if let Some(info) = validator.info_message() {
        println!("{info}");
    }
    Ok(())
}
