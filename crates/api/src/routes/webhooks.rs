//! Webhook ingestion routes.
//!
//! The delivery contract with the event source is: once a payload is
//! parsed, the endpoint acknowledges receipt with `200 OK` no matter what
//! the ledger did. An award that fails is reported through the error log so
//! operators can detect missed points, but it is never surfaced to the
//! source — redeliveries are handled by the ledger's order dedup, not by
//! failing the webhook.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use tracing::{error, info};

use crate::{AppState, extractors::ShopDomain};
use rewards_core::rewards::{OrderCreatedEvent, accrual_for_order};
use rewards_db::repositories::ledger::{AddPointsInput, LedgerRepository};

/// Creates the webhook routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/webhooks/orders/create", post(orders_create))
}

/// POST `/webhooks/orders/create` - Award points for a completed order.
async fn orders_create(
    State(state): State<AppState>,
    ShopDomain(shop): ShopDomain,
    Json(event): Json<OrderCreatedEvent>,
) -> StatusCode {
    info!(shop = %shop, order_number = event.order_number, "Received orders/create webhook");

    // Orders without a customer, without an email, or below one currency
    // unit are legitimately point-less: acknowledge and move on.
    let Some(accrual) = accrual_for_order(&event) else {
        return StatusCode::OK;
    };

    let ledger = LedgerRepository::new((*state.db).clone());
    let outcome = ledger
        .add_points(AddPointsInput {
            email: accrual.email.clone(),
            shop: shop.clone(),
            first_name: accrual.first_name,
            last_name: accrual.last_name,
            points: accrual.points,
            description: accrual.description,
            order_amount: Some(accrual.order_amount),
            order_id: Some(accrual.order_id.clone()),
        })
        .await;

    match outcome {
        Ok(state) => {
            info!(
                shop = %shop,
                email = %accrual.email,
                order_id = %accrual.order_id,
                points = accrual.points,
                total_points = state.customer.total_points,
                "Awarded points for order"
            );
        }
        Err(e) => {
            // The source still sees success; this log line is the channel
            // operators watch for missed awards.
            error!(
                error = %e,
                shop = %shop,
                email = %accrual.email,
                order_id = %accrual.order_id,
                points = accrual.points,
                "Failed to award points for order"
            );
        }
    }

    StatusCode::OK
}
