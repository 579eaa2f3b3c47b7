//! Rent paid over a horizon with yearly escalation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{self, DomainError};
use crate::yearly_blocks;

/// Input parameters for a rent projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentTerms {
    /// Rent charged in the first month.
    pub initial_monthly_rent: f64,
    /// Yearly rent increase as a percentage (e.g., 5.0 for 5%).
    pub annual_inflation_pct: f64,
    pub horizon_months: u32,
}

impl RentTerms {
    /// Evaluates these terms with [`compute_rent`].
    pub fn evaluate(&self) -> Result<RentResult, DomainError> {
        compute_rent(self.initial_monthly_rent, self.annual_inflation_pct, self.horizon_months)
    }
}

/// Rent totals at the end of the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentResult {
    /// Sum of every monthly rent charged.
    pub total_rent_paid: f64,
    /// `total_rent_paid` divided by the months charged.
    pub average_monthly_rent: f64,
    /// Rent after the escalation that follows the last charged block.
    pub final_monthly_rent: f64,
}

/// Projects rent over `horizon_months`, escalating once per block of up to 12 months.
///
/// A horizon that ends mid-year still escalates after its short final block, so
/// `final_monthly_rent` for 30 months reflects three increases, not two.
///
/// # Errors
///
/// Returns a [`DomainError`] for a zero horizon, a non-positive rent, or an
/// inflation rate at or below -100%.
pub fn compute_rent(
    initial_monthly_rent: f64,
    annual_inflation_pct: f64,
    horizon_months: u32,
) -> Result<RentResult, DomainError> {
    error::positive("initial_monthly_rent", initial_monthly_rent)?;
    error::growth_pct("annual_inflation_pct", annual_inflation_pct)?;
    error::months("horizon_months", horizon_months)?;

    let inflation_rate = annual_inflation_pct / 100.0;
    let mut monthly_rent = initial_monthly_rent;
    let mut total_rent_paid = 0.0;
    let mut months = 0u32;

    for block in yearly_blocks(horizon_months) {
        for _ in 0..block {
            total_rent_paid += monthly_rent;
            months += 1;
        }
        monthly_rent *= 1.0 + inflation_rate;
    }

    let result = RentResult {
        total_rent_paid,
        average_monthly_rent: total_rent_paid / f64::from(months),
        final_monthly_rent: monthly_rent,
    };
    debug!(
        total_rent_paid = result.total_rent_paid,
        final_monthly_rent = result.final_monthly_rent,
        months,
        "rent projected"
    );
    Ok(result)
}
