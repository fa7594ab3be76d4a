//! Demo routes exercising each failure kind

use std::str::FromStr;
use std::sync::OnceLock;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use faultline_config::Config;
use faultline_core::{Failure, Validate, Violations};
use faultline_server::{ApiError, ApiResult, DownstreamClient, PathParam, ValidForm, ValidJson, ValidQuery};
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("must be valid regex"))
}

#[derive(Clone)]
struct AppState {
    downstream: Option<DownstreamClient>,
}

/// Build the demo router; handlers share one downstream client
pub fn router(config: &Config) -> anyhow::Result<Router> {
    let downstream = config.downstream.as_ref().map(DownstreamClient::new).transpose()?;

    Ok(Router::new()
        .route("/users", post(create_user).get(find_user))
        .route("/users/{id}", get(get_user))
        .route("/subscriptions", post(subscribe))
        .route("/paint/{color}", get(paint))
        .route("/inventory/{sku}", get(inventory))
        .route("/boom", get(boom))
        .with_state(AppState { downstream }))
}

#[derive(Debug, Deserialize)]
struct NewUser {
    name: String,
    email: Option<String>,
    age: Option<u32>,
}

impl Validate for NewUser {
    fn validate(&self) -> Violations {
        Violations::new()
            .not_blank("name", Some(self.name.as_str()))
            .size("name", Some(self.name.chars().count()), 1, 64)
            .not_null("email", self.email.as_ref())
            .pattern("email", self.email.as_deref(), email_re())
            .min("age", self.age, 18)
            .max("age", self.age, 150)
    }
}

#[derive(Debug, Serialize)]
struct User {
    id: u64,
    name: String,
    email: String,
}

async fn create_user(ValidJson(user): ValidJson<NewUser>) -> (StatusCode, Json<User>) {
    let created = User {
        id: 1,
        name: user.name,
        email: user.email.unwrap_or_default(),
    };
    (StatusCode::CREATED, Json(created))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserQuery {
    user_id: u64,
}

impl Validate for UserQuery {
    fn validate(&self) -> Violations {
        Violations::new().min("userId", Some(self.user_id), 1)
    }
}

async fn find_user(ValidQuery(query): ValidQuery<UserQuery>) -> ApiResult<Json<User>> {
    lookup(query.user_id)
}

async fn get_user(PathParam(id): PathParam<u64>) -> ApiResult<Json<User>> {
    lookup(id)
}

fn lookup(id: u64) -> ApiResult<Json<User>> {
    if id > 1000 {
        return Err(Failure::illegal_argument(format!("No user with id {id}")).into());
    }

    Ok(Json(User {
        id,
        name: format!("user-{id}"),
        email: format!("user-{id}@example.com"),
    }))
}

#[derive(Debug, Deserialize)]
struct Subscription {
    plan: String,
    seats: u32,
}

impl Validate for Subscription {
    fn validate(&self) -> Violations {
        Violations::new()
            .not_blank("plan", Some(self.plan.as_str()))
            .min("seats", Some(self.seats), 1)
    }
}

async fn subscribe(ValidForm(form): ValidForm<Subscription>) -> String {
    format!("{} x{}", form.plan, form.seats)
}

#[derive(Debug, Clone, Copy, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Color {
    Red,
    Green,
    Blue,
}

fn parse_color(value: &str) -> Result<Color, Failure> {
    Color::from_str(value).map_err(|_| Failure::illegal_argument(format!("No enum constant paint.Color.{value}")))
}

async fn paint(PathParam(color): PathParam<String>) -> ApiResult<String> {
    let color = parse_color(&color)?;
    Ok(format!("painted {color}"))
}

#[derive(Debug, Deserialize, Serialize)]
struct Stock {
    sku: String,
    available: u32,
}

async fn inventory(State(state): State<AppState>, PathParam(sku): PathParam<String>) -> ApiResult<Json<Stock>> {
    let Some(client) = state.downstream else {
        return Err(ApiError(Failure::unclassified("no downstream service configured")));
    };

    let stock = client.get_json(&format!("stock/{sku}")).await?;
    Ok(Json(stock))
}

#[allow(clippy::unused_async)]
async fn boom() -> &'static str {
    panic!("boom route always panics")
}
