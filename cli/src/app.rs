use std::path::Path;

use guard_core::api::{
    credential_description, load_config as load_guard_config, node_description, AppConfig,
    AppContext, CliError, ScanParameters, ScanRecord, ScanType, ServicesFactory,
};
use guard_plugins::factory::build_http_client;
use guard_plugins::PluginServicesFactory;
use serde::Serialize;
use serde_json::{json, Value};

use crate::commands::cli::{Args, Commands, ScanKind, ValidateArgs};
use crate::stdio::{parse_records, read_input_text};

/// Exit code when at least one item landed in "not valid".
pub const EXIT_NOT_VALID: u8 = 2;

impl From<ScanKind> for ScanType {
    fn from(k: ScanKind) -> Self {
        match k {
            ScanKind::Input => ScanType::Input,
            ScanKind::Output => ScanType::Output,
        }
    }
}

pub fn load_config(args: &Args) -> Result<AppConfig, CliError> {
    Ok(load_guard_config(args.config.as_deref().map(Path::new))?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let s = serde_json::to_string_pretty(value).map_err(|e| CliError::Command(e.to_string()))?;
    println!("{s}");
    Ok(())
}

fn context(cfg: AppConfig) -> Result<AppContext, CliError> {
    let factory = PluginServicesFactory;
    let ctx = AppContext::from_factory(cfg, &factory as &dyn ServicesFactory)?;
    Ok(ctx)
}

pub async fn run_app(args: Args, cfg: AppConfig) -> Result<u8, CliError> {
    match args.command {
        Commands::Describe(d) => {
            if d.credential {
                print_json(&credential_description())?;
            } else {
                print_json(&node_description())?;
            }
        }
        Commands::Verify => {
            let client = build_http_client(&cfg).map_err(|e| CliError::Command(e.to_string()))?;
            client.verify_credentials().await?;
            tracing::info!(target: "guard.cli", "credentials verified");
            print_json(&json!({"ok": true}))?;
        }
        Commands::Projects => {
            let mut ctx = context(cfg)?;
            print_json(&ctx.list_projects().await?)?;
        }
        Commands::Scanners(s) => {
            let mut ctx = context(cfg)?;
            let category: ScanType = s.category.into();
            let opts = ctx
                .list_scanners(category.category(), s.project_id.as_deref())
                .await?;
            print_json(&opts)?;
        }
        Commands::Defaults(d) => {
            let mut ctx = context(cfg)?;
            print_json(&ctx.defaults_for(&d.project_id).await?)?;
        }
        Commands::Validate(v) => return validate(v, cfg).await,
    }
    Ok(0)
}

fn build_records(v: &ValidateArgs, project_id: String, items: Vec<Value>) -> Vec<ScanRecord> {
    let scan_type: ScanType = v.scan_type.into();
    let params = ScanParameters {
        scan_type,
        project_id,
        prompt: v.prompt.clone(),
        output: v.output.clone(),
        scanners_input: if scan_type == ScanType::Input { v.scanners.clone() } else { Vec::new() },
        scanners_output: if scan_type == ScanType::Output { v.scanners.clone() } else { Vec::new() },
    };
    items
        .into_iter()
        .map(|json| ScanRecord::new(params.clone(), json))
        .collect()
}

async fn validate(v: ValidateArgs, mut cfg: AppConfig) -> Result<u8, CliError> {
    if v.continue_on_fail {
        cfg.execution.continue_on_fail = true;
    }
    let project_id = v
        .project_id
        .clone()
        .unwrap_or_else(|| cfg.execution.project_id.clone());

    let items = match &v.input {
        Some(path) => parse_records(&read_input_text(path)?)?,
        None => vec![json!({})],
    };
    let records = build_records(&v, project_id, items);
    tracing::info!(target: "guard.cli", items = records.len(), scan_type = ?v.scan_type, "validating");

    let mut ctx = context(cfg)?;
    let outputs = ctx.execute(records).await?;
    print_json(&outputs)?;

    Ok(if outputs.not_valid.is_empty() { 0 } else { EXIT_NOT_VALID })
}
