//! Browser flow for the demoqa practice form
//!
//! Fills every field with generated data, submits, and checks the
//! confirmation dialog echoes it back. The state and city dropdowns and the
//! submit button sit under overlays that swallow pointer events, so those
//! are clicked through JavaScript.

mod chromedriver;
mod dialog;
mod driver;
mod person;

use std::time::{Duration, Instant};

use thirtyfour::prelude::*;

use crate::common::{FormConfig, Result};
use crate::scenario::{print_result, Outcome, ScenarioResult};

pub use chromedriver::DriverProcess;
pub use dialog::{day_class, expected_fragments, label_xpath, verify_dialog, FormSelections};
pub use driver::{BrowserSession, ElementState, Locator};
pub use person::{single_line, Person, MOBILE_DIGITS};

/// Scenario name used in reports
pub const SCENARIO_NAME: &str = "practice-form";

/// Run the form scenario and report it
pub async fn run_practice_form(config: &FormConfig) -> ScenarioResult {
    let start = Instant::now();
    let run = practice_form(config).await;
    let result = ScenarioResult::from_run(SCENARIO_NAME, run, start.elapsed());
    print_result(&result);
    result
}

async fn practice_form(config: &FormConfig) -> Result<Outcome> {
    let session = BrowserSession::connect(config).await?;
    let selections = FormSelections::default();

    let run = submit_form(&session, config, &selections).await;

    // The browser goes away on every path; a step error outranks a quit error.
    let quit = session.quit().await;
    run?;
    quit?;

    Ok(Outcome::Passed)
}

async fn submit_form(
    session: &BrowserSession,
    config: &FormConfig,
    selections: &FormSelections,
) -> Result<()> {
    session.goto(&config.url).await?;
    session.wait_present(&Locator::id("firstName")).await?;

    let person = Person::random();
    tracing::debug!("Generated {:?}", person);

    type_into(session, "firstName", &person.first_name).await?;
    type_into(session, "lastName", &person.last_name).await?;
    type_into(session, "userEmail", &person.email).await?;

    session
        .wait_clickable(&Locator::xpath(label_xpath(&selections.gender)))
        .await?
        .click()
        .await?;

    type_into(session, "userNumber", &person.mobile).await?;

    pick_birth_date(session, selections).await?;

    let subjects = session.wait_clickable(&Locator::id("subjectsInput")).await?;
    subjects.send_keys(selections.subject.as_str()).await?;
    subjects.send_keys(Key::Enter + "").await?;

    session
        .wait_clickable(&Locator::xpath(label_xpath(&selections.hobby)))
        .await?
        .click()
        .await?;

    type_into(session, "currentAddress", &person.address).await?;

    pick_state_and_city(session).await?;

    let submit = session.wait_clickable(&Locator::id("submit")).await?;
    session.scroll_into_view(&submit).await?;
    tokio::time::sleep(Duration::from_millis(config.settle_ms)).await;
    session.js_click(&submit).await?;

    let modal = session.wait_visible(&Locator::class("modal-content")).await?;
    let text = modal.text().await?;
    verify_dialog(&text, &person, selections)?;

    session
        .wait_clickable(&Locator::id("closeLargeModal"))
        .await?
        .click()
        .await?;

    Ok(())
}

async fn type_into(session: &BrowserSession, id: &str, text: &str) -> Result<()> {
    session.find(&Locator::id(id)).await?.send_keys(text).await?;
    Ok(())
}

async fn pick_birth_date(session: &BrowserSession, selections: &FormSelections) -> Result<()> {
    session
        .wait_clickable(&Locator::id("dateOfBirthInput"))
        .await?
        .click()
        .await?;

    session
        .wait_clickable(&Locator::class("react-datepicker__month-select"))
        .await?
        .send_keys(selections.birth_month.as_str())
        .await?;
    session
        .wait_clickable(&Locator::class("react-datepicker__year-select"))
        .await?
        .send_keys(selections.birth_year.to_string())
        .await?;
    session
        .wait_clickable(&Locator::class(day_class(selections.birth_day)))
        .await?
        .click()
        .await?;

    Ok(())
}

// The city list only populates once a state is chosen; both take their
// first option.
async fn pick_state_and_city(session: &BrowserSession) -> Result<()> {
    let state = session.wait_clickable(&Locator::id("state")).await?;
    session.scroll_into_view(&state).await?;
    session.js_click(&state).await?;
    let first_state = session
        .wait_clickable(&Locator::id("react-select-3-option-0"))
        .await?;
    session.js_click(&first_state).await?;

    let city = session.wait_clickable(&Locator::id("city")).await?;
    session.js_click(&city).await?;
    let first_city = session
        .wait_clickable(&Locator::id("react-select-4-option-0"))
        .await?;
    session.js_click(&first_city).await?;

    Ok(())
}
