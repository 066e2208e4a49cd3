//! The REST API scenarios
//!
//! Scenarios run in the fixed order of [`ApiScenario::ALL`]. Update, patch
//! and delete target the user created by `create-user` and skip when no id
//! was captured.

use std::time::Instant;

use rand::Rng;
use serde_json::{json, Value};

use crate::common::Result;
use crate::scenario::assert::{
    expect_contains, expect_eq, expect_status, require_field, require_fields, require_i64,
    require_integer, require_str,
};
use crate::scenario::{Outcome, ScenarioResult};

use super::client::{ApiClient, ApiResponse};

/// User known to exist on the server
const KNOWN_USER_ID: i64 = 2;
/// User known to be absent
const MISSING_USER_ID: i64 = 999;
/// Account the API accepts for register and login
const KNOWN_EMAIL: &str = "eve.holt@reqres.in";
const REGISTER_PASSWORD: &str = "pistol";
const LOGIN_PASSWORD: &str = "cityslicka";
/// Address the API refuses to register without a password
const UNREGISTERED_EMAIL: &str = "sydney@fife";

const PAGE: u64 = 2;
const PER_PAGE: u64 = 3;

const USER_FIELDS: [&str; 4] = ["id", "email", "first_name", "last_name"];
const PAGE_FIELDS: [&str; 5] = ["page", "per_page", "total", "total_pages", "data"];

/// State threaded between scenarios of one run
#[derive(Debug, Default)]
pub struct RunContext {
    /// Id returned by `create-user`
    pub created_user_id: Option<String>,
}

/// One API scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ApiScenario {
    ListUsers,
    GetUser,
    CreateUser,
    UpdateUser,
    PatchUser,
    DeleteUser,
    GetMissingUser,
    CreateEmptyUser,
    Register,
    RegisterMissingPassword,
    PaginateUsers,
    Login,
}

impl ApiScenario {
    /// Every scenario, in execution order
    pub const ALL: [ApiScenario; 12] = [
        ApiScenario::ListUsers,
        ApiScenario::GetUser,
        ApiScenario::CreateUser,
        ApiScenario::UpdateUser,
        ApiScenario::PatchUser,
        ApiScenario::DeleteUser,
        ApiScenario::GetMissingUser,
        ApiScenario::CreateEmptyUser,
        ApiScenario::Register,
        ApiScenario::RegisterMissingPassword,
        ApiScenario::PaginateUsers,
        ApiScenario::Login,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ApiScenario::ListUsers => "list-users",
            ApiScenario::GetUser => "get-user",
            ApiScenario::CreateUser => "create-user",
            ApiScenario::UpdateUser => "update-user",
            ApiScenario::PatchUser => "patch-user",
            ApiScenario::DeleteUser => "delete-user",
            ApiScenario::GetMissingUser => "get-missing-user",
            ApiScenario::CreateEmptyUser => "create-empty-user",
            ApiScenario::Register => "register",
            ApiScenario::RegisterMissingPassword => "register-missing-password",
            ApiScenario::PaginateUsers => "paginate-users",
            ApiScenario::Login => "login",
        }
    }

    /// Whether the scenario needs the id captured by `create-user`
    pub fn needs_created_user(&self) -> bool {
        matches!(
            self,
            ApiScenario::UpdateUser | ApiScenario::PatchUser | ApiScenario::DeleteUser
        )
    }

    /// Run the scenario; dependents skip when `create-user` captured no id
    pub async fn run(&self, client: &ApiClient, ctx: &mut RunContext) -> Result<Outcome> {
        let created = ctx.created_user_id.clone();
        if self.needs_created_user() && created.is_none() {
            return Ok(Outcome::skipped("no user id captured by create-user"));
        }
        let id = created.unwrap_or_default();

        match self {
            ApiScenario::ListUsers => list_users(client).await,
            ApiScenario::GetUser => get_user(client).await,
            ApiScenario::CreateUser => create_user(client, ctx).await,
            ApiScenario::UpdateUser => update_user(client, &id).await,
            ApiScenario::PatchUser => patch_user(client, &id).await,
            ApiScenario::DeleteUser => delete_user(client, &id).await,
            ApiScenario::GetMissingUser => get_missing_user(client).await,
            ApiScenario::CreateEmptyUser => create_empty_user(client).await,
            ApiScenario::Register => register(client).await,
            ApiScenario::RegisterMissingPassword => register_missing_password(client).await,
            ApiScenario::PaginateUsers => paginate_users(client).await,
            ApiScenario::Login => login(client).await,
        }
    }
}

/// Run the selected scenarios in their fixed order
///
/// An empty selection runs everything. A failing scenario does not stop the
/// ones after it.
pub async fn run_api_suite(client: &ApiClient, selection: &[ApiScenario]) -> Vec<ScenarioResult> {
    let mut ctx = RunContext::default();
    let mut results = Vec::new();

    for scenario in ApiScenario::ALL {
        if !selection.is_empty() && !selection.contains(&scenario) {
            continue;
        }

        tracing::debug!("Scenario {}", scenario.name());
        let start = Instant::now();
        let run = scenario.run(client, &mut ctx).await;
        let result = ScenarioResult::from_run(scenario.name(), run, start.elapsed());
        crate::scenario::print_result(&result);
        results.push(result);
    }

    results
}

/// Random ASCII letters, used to make created names unique
pub fn random_letters(len: usize) -> String {
    random_letters_with(&mut rand::thread_rng(), len)
}

pub fn random_letters_with<R: Rng>(rng: &mut R, len: usize) -> String {
    const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    (0..len)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}

/// An address with an `@` and a dotted domain after it
pub fn email_looks_valid(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((_, domain)) => domain.contains('.'),
        None => false,
    }
}

/// Pages needed to hold `total` items, `per_page` at a time
pub fn expected_total_pages(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Resource ids come back as strings from create, numbers elsewhere
pub fn resource_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn check_user(user: &Value) -> Result<()> {
    require_fields(user, &USER_FIELDS)?;
    let email = require_str(user, "email")?;
    expect_contains(&format!("email of user {}", user["id"]), email, "@")
}

async fn list_users(client: &ApiClient) -> Result<Outcome> {
    let response = client.get("/users").await?;
    expect_status(response.status, 200)?;

    let body = response.json()?;
    require_fields(&body, &PAGE_FIELDS)?;
    let users = require_array(&body, "data")?;
    if users.is_empty() {
        return Err(crate::Error::assertion("user list is empty"));
    }
    for user in users {
        check_user(user)?;
    }

    Ok(Outcome::Passed)
}

async fn get_user(client: &ApiClient) -> Result<Outcome> {
    let response = client.get(&format!("/users/{}", KNOWN_USER_ID)).await?;
    expect_status(response.status, 200)?;

    let body = response.json()?;
    let user = require_field(&body, "data")?;
    require_fields(user, &USER_FIELDS)?;
    expect_eq("user id", KNOWN_USER_ID, require_i64(user, "id")?)?;

    let email = require_str(user, "email")?;
    if !email_looks_valid(email) {
        return Err(crate::Error::assertion(format!(
            "email {:?} should contain '@' followed by a dotted domain",
            email
        )));
    }

    Ok(Outcome::Passed)
}

async fn create_user(client: &ApiClient, ctx: &mut RunContext) -> Result<Outcome> {
    let name = format!("Test User {}", random_letters(8));
    let request = json!({ "name": name, "job": "QA Engineer" });

    let response = client.post("/users", &request).await?;
    expect_status(response.status, 201)?;

    let body = response.json()?;
    expect_eq("echoed name", name.as_str(), require_str(&body, "name")?)?;
    let id = resource_id(require_field(&body, "id")?).ok_or_else(|| {
        crate::Error::assertion(format!("created user id is not usable: {}", body["id"]))
    })?;

    tracing::debug!("Captured user id {}", id);
    ctx.created_user_id = Some(id);
    Ok(Outcome::Passed)
}

async fn update_user(client: &ApiClient, id: &str) -> Result<Outcome> {
    let name = format!("Updated User {}", random_letters(8));
    let request = json!({ "name": name, "job": "Senior QA Engineer" });

    let response = client.put(&format!("/users/{}", id), &request).await?;
    expect_status(response.status, 200)?;

    let body = response.json()?;
    expect_eq("echoed name", name.as_str(), require_str(&body, "name")?)?;

    Ok(Outcome::Passed)
}

async fn patch_user(client: &ApiClient, id: &str) -> Result<Outcome> {
    let job = "Lead QA Engineer";
    let response = client
        .patch(&format!("/users/{}", id), &json!({ "job": job }))
        .await?;
    expect_status(response.status, 200)?;

    let body = response.json()?;
    expect_eq("echoed job", job, require_str(&body, "job")?)?;

    Ok(Outcome::Passed)
}

async fn delete_user(client: &ApiClient, id: &str) -> Result<Outcome> {
    let response = client.delete(&format!("/users/{}", id)).await?;
    check_deleted(&response)?;
    Ok(Outcome::Passed)
}

fn check_deleted(response: &ApiResponse) -> Result<()> {
    expect_status(response.status, 204)?;
    expect_eq("DELETE response body", "", response.body.as_str())
}

async fn get_missing_user(client: &ApiClient) -> Result<Outcome> {
    let response = client.get(&format!("/users/{}", MISSING_USER_ID)).await?;
    expect_status(response.status, 404)?;
    Ok(Outcome::Passed)
}

// The API accepts an empty create. This pins that behaviour so a change
// upstream shows up here; nothing else relies on it.
async fn create_empty_user(client: &ApiClient) -> Result<Outcome> {
    let response = client.post("/users", &json!({})).await?;
    expect_status(response.status, 201)?;
    Ok(Outcome::Passed)
}

async fn register(client: &ApiClient) -> Result<Outcome> {
    let request = json!({ "email": KNOWN_EMAIL, "password": REGISTER_PASSWORD });
    let response = client.post("/register", &request).await?;
    expect_status(response.status, 200)?;

    let body = response.json()?;
    require_fields(&body, &["token", "id"])?;
    Ok(Outcome::Passed)
}

async fn register_missing_password(client: &ApiClient) -> Result<Outcome> {
    let request = json!({ "email": UNREGISTERED_EMAIL });
    let response = client.post("/register", &request).await?;
    expect_status(response.status, 400)?;

    let body = response.json()?;
    require_field(&body, "error")?;
    Ok(Outcome::Passed)
}

async fn paginate_users(client: &ApiClient) -> Result<Outcome> {
    let query = [("page", PAGE.to_string()), ("per_page", PER_PAGE.to_string())];
    let response = client.get_with_query("/users", &query).await?;
    expect_status(response.status, 200)?;

    let body = response.json()?;
    require_fields(&body, &PAGE_FIELDS)?;
    expect_eq("page", PAGE, require_u64(&body, "page")?)?;
    expect_eq("per_page", PER_PAGE, require_u64(&body, "per_page")?)?;

    let users = require_array(&body, "data")?;
    expect_eq("users on page", PER_PAGE as usize, users.len())?;

    let total = require_u64(&body, "total")?;
    expect_eq(
        &format!("total_pages for total={} per_page={}", total, PER_PAGE),
        expected_total_pages(total, PER_PAGE),
        require_u64(&body, "total_pages")?,
    )?;

    for user in users {
        check_user(user)?;
    }

    Ok(Outcome::Passed)
}

async fn login(client: &ApiClient) -> Result<Outcome> {
    let request = json!({ "email": KNOWN_EMAIL, "password": LOGIN_PASSWORD });
    let response = client.post("/login", &request).await?;
    expect_status(response.status, 200)?;

    let body = response.json()?;
    let token = require_str(&body, "token")?;
    if token.is_empty() {
        return Err(crate::Error::assertion("token should not be empty"));
    }
    if body.get("id").is_some() {
        require_integer(&body, "id")?;
    }

    tracing::info!("Logged in, token {}", token);
    Ok(Outcome::Passed)
}

fn require_array<'a>(object: &'a Value, field: &str) -> Result<&'a Vec<Value>> {
    let value = require_field(object, field)?;
    value.as_array().ok_or_else(|| {
        crate::Error::assertion(format!("field '{}' should be an array, got {}", field, value))
    })
}

fn require_u64(object: &Value, field: &str) -> Result<u64> {
    let value = require_field(object, field)?;
    value.as_u64().ok_or_else(|| {
        crate::Error::assertion(format!(
            "field '{}' should be a non-negative integer, got {}",
            field, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_scenario_names_match_cli_values() {
        for scenario in ApiScenario::ALL {
            let value = scenario.to_possible_value().unwrap();
            assert_eq!(value.get_name(), scenario.name());
        }
    }

    #[test]
    fn test_only_mutations_need_created_user() {
        let dependent: Vec<&str> = ApiScenario::ALL
            .iter()
            .filter(|s| s.needs_created_user())
            .map(|s| s.name())
            .collect();
        assert_eq!(dependent, ["update-user", "patch-user", "delete-user"]);
    }

    #[test]
    fn test_create_runs_before_dependents() {
        let position = |s: ApiScenario| ApiScenario::ALL.iter().position(|x| *x == s).unwrap();
        let create = position(ApiScenario::CreateUser);
        for scenario in ApiScenario::ALL.iter().filter(|s| s.needs_created_user()) {
            assert!(position(*scenario) > create);
        }
        assert!(position(ApiScenario::PatchUser) < position(ApiScenario::DeleteUser));
    }

    fn deleted(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            method: reqwest::Method::DELETE,
            url: "https://reqres.in/api/users/483".to_string(),
            status: reqwest::StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_delete_needs_204_and_empty_body() {
        assert!(check_deleted(&deleted(204, "")).is_ok());

        let err = check_deleted(&deleted(204, "{}")).unwrap_err();
        assert!(err.to_string().contains("DELETE response body: expected \"\", got \"{}\""));

        let err = check_deleted(&deleted(200, "")).unwrap_err();
        assert!(err.to_string().contains("expected status code 204, got 200"));
    }

    #[test]
    fn test_random_letters() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = random_letters_with(&mut rng, 8);
        assert_eq!(s.len(), 8);
        assert!(s.chars().all(|c| c.is_ascii_alphabetic()));
        assert_eq!(random_letters(0), "");
    }

    #[test]
    fn test_email_looks_valid() {
        assert!(email_looks_valid("janet.weaver@reqres.in"));
        assert!(email_looks_valid("a@b.c"));
        assert!(!email_looks_valid("janet.weaver@reqres"));
        assert!(!email_looks_valid("janet.weaver.reqres.in"));
    }

    #[test]
    fn test_expected_total_pages_rounds_up() {
        assert_eq!(expected_total_pages(12, 3), 4);
        assert_eq!(expected_total_pages(13, 3), 5);
        assert_eq!(expected_total_pages(0, 3), 0);
        assert_eq!(expected_total_pages(12, 0), 0);
    }

    #[test]
    fn test_resource_id_normalisation() {
        assert_eq!(resource_id(&json!("482")), Some("482".to_string()));
        assert_eq!(resource_id(&json!(482)), Some("482".to_string()));
        assert_eq!(resource_id(&json!("")), None);
        assert_eq!(resource_id(&json!(null)), None);
    }

    #[test]
    fn test_check_user_requires_all_fields() {
        let good = json!({"id": 7, "email": "michael.lawson@reqres.in", "first_name": "Michael", "last_name": "Lawson"});
        assert!(check_user(&good).is_ok());

        let no_at = json!({"id": 7, "email": "michael.lawson", "first_name": "Michael", "last_name": "Lawson"});
        let err = check_user(&no_at).unwrap_err();
        assert!(err.to_string().contains("email of user 7"));

        let missing = json!({"id": 7, "email": "m@reqres.in", "first_name": "Michael"});
        assert!(check_user(&missing).is_err());
    }
}
