//! CLI command handling
//!
//! Applies flag overrides to the loaded configuration and runs the
//! requested scenarios.

use std::time::Instant;

use crate::api::{self, ApiClient};
use crate::commands::{ApiArgs, Commands, FormArgs};
use crate::common::{ApiConfig, Config, FormConfig, Result};
use crate::form::{self, DriverProcess};
use crate::scenario::{print_header, print_result, print_summary, ScenarioResult, Summary};

/// Dispatch a CLI command, returning the run's totals
pub async fn dispatch(command: Commands, config: Config) -> Result<Summary> {
    let results = match command {
        Commands::Form(args) => run_form(args, config.form).await,
        Commands::Api(args) => run_api(args, config.api).await?,
        Commands::All { form, api } => {
            let mut results = run_form(form, config.form).await;
            results.extend(run_api(api, config.api).await?);
            results
        }
    };

    Ok(print_summary(&results))
}

/// A chromedriver that fails to start fails the form scenario only
async fn run_form(args: FormArgs, mut config: FormConfig) -> Vec<ScenarioResult> {
    apply_form_args(&args, &mut config);
    print_header("practice form", &config.url);

    // Held until the scenario finishes; dropping it kills chromedriver.
    let _driver = if args.spawn_driver {
        let start = Instant::now();
        match DriverProcess::spawn(&config.webdriver_url).await {
            Ok(driver) => Some(driver),
            Err(e) => {
                tracing::error!("Could not start chromedriver: {}", e);
                let result = ScenarioResult::from_run(form::SCENARIO_NAME, Err(e), start.elapsed());
                print_result(&result);
                return vec![result];
            }
        }
    } else {
        None
    };

    vec![form::run_practice_form(&config).await]
}

async fn run_api(args: ApiArgs, mut config: ApiConfig) -> Result<Vec<ScenarioResult>> {
    apply_api_args(&args, &mut config);

    let client = ApiClient::new(&config)?;
    print_header("REST API", client.base_url());
    Ok(api::run_api_suite(&client, &args.only).await)
}

fn apply_form_args(args: &FormArgs, config: &mut FormConfig) {
    if args.headless {
        config.headless = true;
    }
    if let Some(url) = &args.webdriver {
        config.webdriver_url = url.clone();
    }
}

fn apply_api_args(args: &ApiArgs, config: &mut ApiConfig) {
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiScenario;
    use crate::Outcome;

    /// Non-local, so spawning is refused before any process starts
    const REMOTE_WEBDRIVER: &str = "http://grid.example.com:4444";

    /// Nothing listens on the discard port
    const DEAD_API: &str = "http://127.0.0.1:9/api";

    fn spawning_form_args() -> FormArgs {
        FormArgs {
            headless: true,
            webdriver: Some(REMOTE_WEBDRIVER.to_string()),
            spawn_driver: true,
        }
    }

    #[tokio::test]
    async fn test_driver_spawn_failure_fails_form_scenario() {
        let results = run_form(spawning_form_args(), FormConfig::default()).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, form::SCENARIO_NAME);
        match &results[0].outcome {
            Outcome::Failed { error } => assert!(error.contains("local WebDriver URL")),
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_all_continues_to_api_after_driver_spawn_failure() {
        let command = Commands::All {
            form: spawning_form_args(),
            api: ApiArgs {
                base_url: Some(DEAD_API.to_string()),
                only: vec![ApiScenario::GetMissingUser],
            },
        };

        let summary = dispatch(command, Config::default()).await.unwrap();
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.failed, 2);
        assert!(!summary.success());
    }

    #[test]
    fn test_flags_override_config() {
        let mut form = FormConfig::default();
        apply_form_args(
            &FormArgs {
                headless: true,
                webdriver: Some("http://localhost:4444".to_string()),
                spawn_driver: false,
            },
            &mut form,
        );
        assert!(form.headless);
        assert_eq!(form.webdriver_url, "http://localhost:4444");

        let mut api = ApiConfig::default();
        apply_api_args(
            &ApiArgs {
                base_url: Some("http://127.0.0.1:3000/api".to_string()),
                only: Vec::new(),
            },
            &mut api,
        );
        assert_eq!(api.base_url, "http://127.0.0.1:3000/api");
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut form = FormConfig {
            headless: true,
            ..FormConfig::default()
        };
        apply_form_args(&FormArgs::default(), &mut form);
        assert!(form.headless);
        assert_eq!(form.webdriver_url, "http://localhost:9515");

        let mut api = ApiConfig::default();
        apply_api_args(&ApiArgs::default(), &mut api);
        assert_eq!(api.base_url, "https://reqres.in/api");
    }
}
