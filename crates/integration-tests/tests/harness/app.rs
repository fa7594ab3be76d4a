//! Routes the integration tests drive, one per failure path

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use faultline_config::Config;
use faultline_core::{Failure, Validate, Violations};
use faultline_server::{ApiResult, DownstreamClient, PathParam, ValidForm, ValidJson, ValidQuery};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
struct AppState {
    downstream: Option<DownstreamClient>,
}

pub fn router(config: &Config) -> anyhow::Result<Router> {
    let downstream = config.downstream.as_ref().map(DownstreamClient::new).transpose()?;

    Ok(Router::new()
        .route("/users", post(create_user).get(find_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/orders/{order_id}", get(get_order))
        .route("/subscriptions", post(subscribe))
        .route("/colors/{name}", get(color))
        .route("/stock/{sku}", get(stock))
        .route("/crash", get(crash))
        .with_state(AppState { downstream }))
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub email: Option<String>,
    pub age: Option<u32>,
}

impl Validate for NewUser {
    fn validate(&self) -> Violations {
        Violations::new()
            .not_null("email", self.email.as_ref())
            .min("age", self.age, 18)
            .max("age", self.age, 130)
    }
}

async fn create_user(ValidJson(user): ValidJson<NewUser>) -> String {
    user.email.unwrap_or_default()
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

async fn find_user(ValidQuery(query): ValidQuery<UserQuery>) -> String {
    query.user_id.to_string()
}

async fn get_user(PathParam(id): PathParam<u64>) -> String {
    id.to_string()
}

async fn get_order(PathParam((id, order_id)): PathParam<(u64, u64)>) -> String {
    format!("{id}/{order_id}")
}

#[derive(Debug, Deserialize)]
struct Subscription {
    seats: u32,
}

impl Validate for Subscription {
    fn validate(&self) -> Violations {
        Violations::new().min("seats", Some(self.seats), 1)
    }
}

async fn subscribe(ValidForm(form): ValidForm<Subscription>) -> String {
    form.seats.to_string()
}

async fn color(PathParam(name): PathParam<String>) -> ApiResult<String> {
    match name.as_str() {
        "red" | "green" | "blue" => Ok(name),
        other => Err(Failure::illegal_argument(format!("No enum constant com.example.Color.{other}")).into()),
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Stock {
    pub sku: String,
    pub available: u32,
}

async fn stock(State(state): State<AppState>, PathParam(sku): PathParam<String>) -> ApiResult<Json<Stock>> {
    let client = state
        .downstream
        .ok_or_else(|| Failure::unclassified("no downstream configured"))?;

    Ok(Json(client.get_json(&format!("stock/{sku}")).await?))
}

async fn crash() -> &'static str {
    panic!("database connection string leaked: postgres://secret")
}
