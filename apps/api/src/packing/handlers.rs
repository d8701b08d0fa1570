//! Axum route handlers for the packing API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::packing::{solve, OptimizationResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CalculateQuery {
    /// Kept as a string so a bad value is reported by us, not by the extractor.
    pub qty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PackageSizesResponse {
    pub package_sizes: Vec<usize>,
}

/// GET /api/calculate?qty=<quantity> (also served at the legacy /calculate)
///
/// Validates and caps the quantity, then runs the solver on a blocking thread.
pub async fn handle_calculate(
    State(state): State<AppState>,
    Query(params): Query<CalculateQuery>,
) -> Result<Json<OptimizationResult>, AppError> {
    let quantity = parse_quantity(params.qty.as_deref(), state.config.max_quantity)
        .inspect_err(|e| warn!("Rejected calculate request: {e}"))?;

    let catalog = state.catalog.clone();
    let result = tokio::task::spawn_blocking(move || solve(&catalog, quantity))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in solve: {e}")))?
        .inspect_err(|e| warn!("Optimization error: {e}"))?;

    debug!(
        requested = result.requested,
        total_delivered = result.total_delivered,
        over_delivery = result.over_delivery,
        packages = result.package_count(),
        "Solved"
    );

    Ok(Json(result))
}

/// GET /api/package-sizes
///
/// Returns the catalog's sizes, smallest first.
pub async fn handle_package_sizes(State(state): State<AppState>) -> Json<PackageSizesResponse> {
    Json(PackageSizesResponse {
        package_sizes: state.catalog.sizes().iter().rev().copied().collect(),
    })
}

/// Checks presence, integer syntax and the upper bound. Negative values pass
/// through so the solver reports them as an invalid quantity.
fn parse_quantity(raw: Option<&str>, max_quantity: i64) -> Result<i64, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("missing 'qty' parameter".to_string()))?;

    let quantity = raw.parse::<i64>().map_err(|_| {
        AppError::Validation("invalid 'qty' parameter: must be an integer".to_string())
    })?;

    if quantity > max_quantity {
        return Err(AppError::QuantityTooLarge {
            quantity,
            max: max_quantity,
        });
    }
    Ok(quantity)
}
