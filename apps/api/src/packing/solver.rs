//! Optimization Solver — bounded dynamic program over reachable delivered sums.
//!
//! # Objectives
//! 1. Minimize over-delivery (`total_delivered - requested`).
//! 2. Among equal over-delivery, minimize the total number of packages.
//!
//! # Table
//! One cell per delivered quantity in `0..=quantity + max_size`. A cell keeps
//! the accumulated over-delivery, the package count and the last package size
//! used to reach it; the breakdown is recovered by walking `last` back to 0.
//! Cells are final once their index has been processed, so the walk yields
//! exactly the breakdown that was current when the cell was last improved.
//!
//! Sizes are tried largest first and only strict improvements overwrite a
//! cell, so the first-found combination wins ties.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::packing::catalog::PackageCatalog;
use crate::packing::error::PackingError;

/// Result of one solve. Serialized as the public `/api/calculate` response.
///
/// `packages` maps package size to count; only sizes with a positive count
/// appear and the map is empty iff `requested == 0`. Sizes render as decimal
/// string keys in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationResult {
    pub requested: u64,
    pub total_delivered: u64,
    pub over_delivery: u64,
    pub packages: BTreeMap<u64, u64>,
}

impl OptimizationResult {
    /// Total number of packages in the breakdown.
    pub fn package_count(&self) -> u64 {
        self.packages.values().sum()
    }
}

/// Every field fits in `u32` because the table bound does; see `fill_table`.
#[derive(Debug, Clone, Copy)]
struct Cell {
    over_delivery: u32,
    packages: u32,
    last: u32,
}

impl Cell {
    const ORIGIN: Cell = Cell {
        over_delivery: 0,
        packages: 0,
        last: 0,
    };

    fn improves_on(&self, current: Option<Cell>) -> bool {
        match current {
            None => true,
            Some(cur) => {
                self.over_delivery < cur.over_delivery
                    || (self.over_delivery == cur.over_delivery && self.packages < cur.packages)
            }
        }
    }
}

/// Computes the optimal package breakdown for `quantity`.
///
/// Borrows the catalog for the duration of the call only; every call builds
/// and drops its own table. Cost is `O((quantity + max_size) * catalog size)`
/// in time and `O(quantity + max_size)` in memory (one 16-byte cell per
/// delivered quantity), unbounded in `quantity`: callers must cap it before
/// calling. A table past `u32::MAX` entries or too large to allocate fails
/// with `NoFeasiblePlan`.
pub fn solve(catalog: &PackageCatalog, quantity: i64) -> Result<OptimizationResult, PackingError> {
    if quantity < 0 {
        return Err(PackingError::InvalidQuantity(quantity));
    }
    if quantity == 0 {
        return Ok(OptimizationResult {
            requested: 0,
            total_delivered: 0,
            over_delivery: 0,
            packages: BTreeMap::new(),
        });
    }

    let requested = quantity.unsigned_abs();
    let target = usize::try_from(quantity)
        .map_err(|_| PackingError::NoFeasiblePlan { quantity: requested })?;
    let bound = target
        .checked_add(catalog.max_size())
        .ok_or(PackingError::NoFeasiblePlan { quantity: requested })?;

    let table = fill_table(catalog, target, bound)
        .ok_or(PackingError::NoFeasiblePlan { quantity: requested })?;

    // Scan every delivered quantity that satisfies the request. `min_by_key`
    // keeps the first of equal keys, i.e. the smallest delivered quantity.
    let (delivered, _) = (target..=bound)
        .filter_map(|i| table[i].map(|cell| (i, cell)))
        .min_by_key(|(_, cell)| (cell.over_delivery, cell.packages))
        .ok_or(PackingError::NoFeasiblePlan { quantity: requested })?;

    let packages = trace_breakdown(&table, delivered);
    let total_delivered = delivered as u64;

    Ok(OptimizationResult {
        requested,
        total_delivered,
        over_delivery: total_delivered - requested,
        packages,
    })
}

/// Returns `None` when the table for `0..=bound` cannot be allocated or
/// `bound` does not fit in `u32`.
fn fill_table(catalog: &PackageCatalog, target: usize, bound: usize) -> Option<Vec<Option<Cell>>> {
    u32::try_from(bound).ok()?;
    let len = bound.checked_add(1)?;
    let mut table: Vec<Option<Cell>> = Vec::new();
    table.try_reserve_exact(len).ok()?;
    table.resize(len, None);
    table[0] = Some(Cell::ORIGIN);

    for i in 1..=bound {
        // i, size and overshoot are all <= bound <= u32::MAX.
        let overshoot = i.saturating_sub(target) as u32;
        for size in catalog.iter().filter(|&size| size <= i) {
            let Some(prev) = table[i - size] else {
                continue;
            };
            // Accumulated over-delivery only saturates on paths that
            // overshoot repeatedly, and those never win the final scan.
            let candidate = Cell {
                over_delivery: prev.over_delivery.saturating_add(overshoot),
                packages: prev.packages + 1,
                last: size as u32,
            };
            if candidate.improves_on(table[i]) {
                table[i] = Some(candidate);
            }
        }
    }

    Some(table)
}

fn trace_breakdown(table: &[Option<Cell>], delivered: usize) -> BTreeMap<u64, u64> {
    let mut packages = BTreeMap::new();
    let mut cursor = delivered;
    while cursor > 0 {
        let Some(cell) = table[cursor] else {
            break;
        };
        *packages.entry(u64::from(cell.last)).or_insert(0) += 1;
        cursor -= cell.last as usize;
    }
    packages
}
