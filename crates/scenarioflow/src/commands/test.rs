use crate::render::PlainRenderer;
use crate::tui::TuiRenderer;
use clap::Args;
use colored::Colorize;
use scenarioflow_cloud::{Environment, MarkerReporter, StatusFileReporter, StatusSink};
use scenarioflow_cloud_azure::AzurePlatform;
use scenarioflow_config::EngineConfig;
use scenarioflow_engine::{Collaborators, Phase, RunReport, Runtime, ShellExecutor};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Instrument;

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Scenario file (.yaml, .yml or .json)
    pub file: PathBuf,

    /// Subscription to select before running
    #[arg(long, env = "SCENARIOFLOW_SUBSCRIPTION")]
    pub subscription: Option<String>,

    /// Target environment (local, github-action, azure)
    #[arg(short, long, env = "SCENARIOFLOW_ENVIRONMENT")]
    pub environment: Option<String>,

    /// Extra variable for every command
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Directory commands run in
    #[arg(short, long)]
    pub working_directory: Option<PathBuf>,

    /// Keep the latest status snapshot in this JSON file
    #[arg(long)]
    pub status_file: Option<PathBuf>,

    /// Identifier attached to every log line of this run
    #[arg(long)]
    pub correlation_id: Option<String>,

    /// Show progress in a terminal UI
    #[arg(long)]
    pub tui: bool,
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

/// Settings after CLI flags are laid over the config file
#[derive(Debug)]
struct RunSettings {
    subscription: String,
    environment: Environment,
    env: HashMap<String, String>,
    working_directory: Option<PathBuf>,
    status_file: Option<PathBuf>,
    correlation_id: Option<String>,
    shell: String,
    capture_environment: bool,
}

fn resolve(
    args: &TestArgs,
    config: EngineConfig,
    scenario_environment: Option<&str>,
) -> anyhow::Result<RunSettings> {
    let environment = args
        .environment
        .as_deref()
        .or(scenario_environment)
        .unwrap_or(&config.environment)
        .parse::<Environment>()?;

    let mut env = config.variables;
    env.extend(args.vars.iter().cloned());

    Ok(RunSettings {
        subscription: args.subscription.clone().or(config.subscription).unwrap_or_default(),
        environment,
        env,
        working_directory: args.working_directory.clone().or(config.working_directory),
        status_file: args.status_file.clone().or(config.status_file),
        correlation_id: args.correlation_id.clone().or(config.correlation_id),
        shell: config.shell,
        capture_environment: config.capture_environment,
    })
}

pub async fn handle(args: TestArgs, verbose: bool) -> anyhow::Result<()> {
    let config = scenarioflow_config::load_config()?;
    let verbose = verbose || config.verbose;

    let scenario = scenarioflow_core::load_scenario(&args.file)?;
    let settings = resolve(&args, config, scenario.environment.as_deref())?;

    let span = tracing::info_span!(
        "scenario",
        title = %scenario.title,
        correlation_id = settings.correlation_id.as_deref().unwrap_or_default()
    );

    let report = async {
        let mut executor = ShellExecutor::new(&settings.shell)
            .with_capture_environment(settings.capture_environment);
        if let Some(dir) = &settings.working_directory {
            executor = executor.with_working_directory(dir);
        }

        let platform = Arc::new(AzurePlatform::new());
        let mut sinks: Vec<Arc<dyn StatusSink>> = vec![Arc::new(MarkerReporter::stdout())];
        if let Some(path) = &settings.status_file {
            sinks.push(Arc::new(StatusFileReporter::new(path)));
        }

        let collaborators = Collaborators {
            executor: Arc::new(executor),
            control_plane: platform.clone(),
            extractor: platform,
            sinks,
            environment: settings.environment,
        };

        let runtime = Runtime::establish(
            &scenario,
            settings.env.clone(),
            &settings.subscription,
            collaborators,
        )
        .await?;

        let report = if args.tui {
            let mut renderer = TuiRenderer::new(runtime.sender())?;
            runtime.run(&mut renderer).await?
        } else {
            let mut renderer = PlainRenderer::new(verbose);
            runtime.run(&mut renderer).await?
        };
        anyhow::Ok(report)
    }
    .instrument(span)
    .await?;

    finish(&report)
}

fn finish(report: &RunReport) -> anyhow::Result<()> {
    match report.phase {
        Phase::Completed => {
            println!("{}", "✓ All code blocks passed".green().bold());
            Ok(())
        }
        Phase::Cancelled => Err(anyhow::anyhow!("Scenario cancelled")),
        _ => {
            let error = report.status.error().unwrap_or("unknown error");
            Err(anyhow::anyhow!("Scenario failed: {}", error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: TestArgs,
    }

    fn args(argv: &[&str]) -> TestArgs {
        let mut full = vec!["scenarioflow", "scenario.yaml"];
        full.extend_from_slice(argv);
        Wrapper::parse_from(full).args
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(
            parse_var("KEY=a=b").unwrap(),
            ("KEY".to_string(), "a=b".to_string())
        );
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=x").is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = EngineConfig {
            subscription: Some("from-config".to_string()),
            environment: "github-action".to_string(),
            ..Default::default()
        };
        config
            .variables
            .insert("LOCATION".to_string(), "westus".to_string());

        let args = args(&["--subscription", "from-cli", "--var", "LOCATION=eastus", "-e", "OCD"]);
        let settings = resolve(&args, config, Some("local")).unwrap();

        assert_eq!(settings.subscription, "from-cli");
        assert_eq!(settings.environment, Environment::Azure);
        assert_eq!(settings.env.get("LOCATION").unwrap(), "eastus");
    }

    #[test]
    fn test_scenario_environment_beats_config() {
        let config = EngineConfig {
            environment: "azure".to_string(),
            ..Default::default()
        };
        let settings = resolve(&args(&[]), config, Some("github-action")).unwrap();
        assert_eq!(settings.environment, Environment::GithubAction);
        assert_eq!(settings.subscription, "");
        assert_eq!(settings.shell, "bash");
    }

    #[test]
    fn test_unknown_environment() {
        assert!(resolve(&args(&["-e", "mars"]), EngineConfig::default(), None).is_err());
    }
}
