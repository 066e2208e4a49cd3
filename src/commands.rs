//! CLI command definitions
//!
//! Defines the clap commands for the qa CLI.

use clap::{Args, Subcommand};

use crate::api::ApiScenario;

#[derive(Subcommand)]
pub enum Commands {
    /// Fill and submit the demoqa practice form in a browser
    Form(FormArgs),

    /// Run the REST API scenarios against reqres.in
    Api(ApiArgs),

    /// Run the form scenario, then the API scenarios
    All {
        #[command(flatten)]
        form: FormArgs,

        #[command(flatten)]
        api: ApiArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct FormArgs {
    /// Run Chrome without a window
    #[arg(long)]
    pub headless: bool,

    /// WebDriver server URL (default: http://localhost:9515)
    #[arg(long)]
    pub webdriver: Option<String>,

    /// Start chromedriver from PATH for the duration of the run
    #[arg(long)]
    pub spawn_driver: bool,
}

#[derive(Args, Debug, Default)]
pub struct ApiArgs {
    /// Base URL of the API (default: https://reqres.in/api)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Run only these scenarios; can be given multiple times
    #[arg(long, value_enum)]
    pub only: Vec<ApiScenario>,
}
