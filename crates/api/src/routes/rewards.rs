//! Admin rewards routes: customer list and point adjustments.
//!
//! Mirrors the admin UI surfaces: a read of the shop's customer table and a
//! single action endpoint discriminated by an `action` field. Invalid
//! submissions are rejected with 422 before the ledger is touched; after a
//! successful action the handler re-reads and returns the refreshed
//! customer list (a plain read, outside the atomic unit).

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, extractors::ShopDomain};
use rewards_core::rewards::{validate_award, validate_redemption};
use rewards_db::repositories::ledger::{
    AddPointsInput, CustomerWithTransactions, LedgerError, LedgerRepository,
};
use rewards_shared::AppError;

/// Creates the rewards routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rewards/customers", get(list_customers))
        .route("/rewards/actions", post(submit_action))
}

/// Admin action request, discriminated by the `action` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ActionRequest {
    /// Award points to an email, creating the account if needed.
    #[serde(rename_all = "camelCase")]
    AddPoints {
        /// Customer email.
        email: String,
        /// Optional first name.
        #[serde(default)]
        first_name: Option<String>,
        /// Optional last name.
        #[serde(default)]
        last_name: Option<String>,
        /// Points to award; must be positive.
        points: i64,
        /// Optional order amount for the audit trail.
        #[serde(default)]
        order_amount: Option<Decimal>,
    },
    /// Redeem points from an existing customer.
    #[serde(rename_all = "camelCase")]
    RemovePoints {
        /// Customer ID.
        customer_id: Uuid,
        /// Points to remove; must be positive.
        points: i64,
    },
}

/// Response for a single transaction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Signed point delta.
    pub points: i64,
    /// Reason for the change.
    pub description: String,
    /// Order amount, for order-driven awards.
    pub order_amount: Option<Decimal>,
    /// Originating order identifier.
    pub order_id: Option<String>,
    /// Record timestamp.
    pub created_at: DateTime<FixedOffset>,
}

/// Response for a customer with their transaction history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    /// Customer ID.
    pub id: Uuid,
    /// Customer email.
    pub email: String,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Current point balance.
    pub total_points: i64,
    /// Number of ledger transactions.
    pub transaction_count: usize,
    /// Join date.
    pub created_at: DateTime<FixedOffset>,
    /// Transaction history, most recent first.
    pub transactions: Vec<TransactionResponse>,
}

impl From<CustomerWithTransactions> for CustomerResponse {
    fn from(state: CustomerWithTransactions) -> Self {
        Self {
            id: state.customer.id,
            email: state.customer.email,
            first_name: state.customer.first_name,
            last_name: state.customer.last_name,
            total_points: state.customer.total_points,
            transaction_count: state.transactions.len(),
            created_at: state.customer.created_at,
            transactions: state
                .transactions
                .into_iter()
                .map(|t| TransactionResponse {
                    id: t.id,
                    points: t.points,
                    description: t.description,
                    order_amount: t.order_amount,
                    order_id: t.order_id,
                    created_at: t.created_at,
                })
                .collect(),
        }
    }
}

/// Maps an application error onto its HTTP response.
fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// GET `/rewards/customers` - List the shop's customers, highest balance
/// first.
async fn list_customers(State(state): State<AppState>, ShopDomain(shop): ShopDomain) -> Response {
    let ledger = LedgerRepository::new((*state.db).clone());

    match ledger.list_customers(&shop).await {
        Ok(customers) => {
            let customers: Vec<CustomerResponse> =
                customers.into_iter().map(CustomerResponse::from).collect();
            (StatusCode::OK, Json(json!({ "customers": customers }))).into_response()
        }
        Err(e) => {
            error!(error = %e, shop = %shop, "Failed to list reward customers");
            error_response(&AppError::from(e))
        }
    }
}

/// POST `/rewards/actions` - Apply an admin point adjustment, then return
/// the refreshed customer list.
async fn submit_action(
    State(state): State<AppState>,
    ShopDomain(shop): ShopDomain,
    Json(payload): Json<ActionRequest>,
) -> Response {
    let ledger = LedgerRepository::new((*state.db).clone());

    let outcome = match payload {
        ActionRequest::AddPoints {
            email,
            first_name,
            last_name,
            points,
            order_amount,
        } => {
            if let Err(e) = validate_award(&email, points) {
                return error_response(&AppError::from(e));
            }

            ledger
                .add_points(AddPointsInput {
                    email,
                    shop: shop.clone(),
                    first_name,
                    last_name,
                    points,
                    description: "Order purchase".to_string(),
                    order_amount,
                    order_id: None,
                })
                .await
        }
        ActionRequest::RemovePoints {
            customer_id,
            points,
        } => {
            if let Err(e) = validate_redemption(points) {
                return error_response(&AppError::from(e));
            }

            match ledger
                .remove_points(customer_id, points, "Points redeemed".to_string())
                .await
            {
                // The admin form submits an id it believes exists; if it
                // does not, that is a bad field, not a missing page.
                Err(LedgerError::CustomerNotFound(id)) => {
                    return error_response(&AppError::Validation(format!(
                        "Unknown customer: {id}"
                    )));
                }
                other => other,
            }
        }
    };

    match outcome {
        Ok(updated) => {
            info!(
                shop = %shop,
                customer_id = %updated.customer.id,
                total_points = updated.customer.total_points,
                "Reward points adjusted"
            );

            match ledger.list_customers(&shop).await {
                Ok(customers) => {
                    let customers: Vec<CustomerResponse> =
                        customers.into_iter().map(CustomerResponse::from).collect();
                    (StatusCode::OK, Json(json!({ "customers": customers }))).into_response()
                }
                Err(e) => {
                    error!(error = %e, shop = %shop, "Failed to refresh customer list");
                    error_response(&AppError::from(e))
                }
            }
        }
        Err(e) => {
            error!(error = %e, shop = %shop, "Failed to adjust reward points");
            error_response(&AppError::from(e))
        }
    }
}
