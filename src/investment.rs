//! Compound growth of a deposit plus monthly contributions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{self, DomainError};
use crate::yearly_blocks;

/// Input parameters for an investment projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentTerms {
    pub initial_deposit: f64,
    /// Added at the end of every month. Negative values withdraw from the balance.
    pub monthly_contribution: f64,
    /// The annual return as a percentage, compounded monthly at `annual / 12`.
    pub annual_return_pct: f64,
    pub horizon_months: u32,
    /// Yearly change of the contribution as a percentage; may be negative.
    #[serde(default)]
    pub annual_contribution_growth_pct: f64,
}

impl InvestmentTerms {
    /// Evaluates these terms with [`compute_investment`].
    pub fn evaluate(&self) -> Result<InvestmentResult, DomainError> {
        compute_investment(
            self.initial_deposit,
            self.monthly_contribution,
            self.annual_return_pct,
            self.horizon_months,
            self.annual_contribution_growth_pct,
        )
    }
}

/// Account totals at the end of the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    /// Deposit plus every contribution made.
    pub total_contributed: f64,
    /// `final_balance - total_contributed`.
    pub total_gains: f64,
    /// Balance after the last month of the horizon.
    pub final_balance: f64,
}

/// Projects the balance of an investment account over `horizon_months`.
///
/// Each month the balance first earns its monthly return and then receives the
/// contribution, so a contribution starts earning in the month after it is made.
/// The contribution escalates after every block of up to 12 months, including a
/// short final block, the same way rent does in [`crate::rent::compute_rent`].
///
/// # Errors
///
/// Returns a [`DomainError`] for a zero horizon, a negative deposit, or a
/// non-finite amount or rate.
pub fn compute_investment(
    initial_deposit: f64,
    monthly_contribution: f64,
    annual_return_pct: f64,
    horizon_months: u32,
    annual_contribution_growth_pct: f64,
) -> Result<InvestmentResult, DomainError> {
    error::non_negative("initial_deposit", initial_deposit)?;
    error::finite("monthly_contribution", monthly_contribution)?;
    error::finite("annual_return_pct", annual_return_pct)?;
    error::growth_pct("annual_contribution_growth_pct", annual_contribution_growth_pct)?;
    error::months("horizon_months", horizon_months)?;

    let monthly_return = annual_return_pct / 12.0 / 100.0;
    let contribution_growth = annual_contribution_growth_pct / 100.0;
    let mut contribution = monthly_contribution;
    let mut balance = initial_deposit;
    let mut total_contributed = initial_deposit;

    for block in yearly_blocks(horizon_months) {
        for _ in 0..block {
            balance += balance * monthly_return + contribution;
            total_contributed += contribution;
        }
        contribution *= 1.0 + contribution_growth;
    }

    let result = InvestmentResult {
        total_contributed,
        total_gains: balance - total_contributed,
        final_balance: balance,
    };
    debug!(
        total_contributed = result.total_contributed,
        final_balance = result.final_balance,
        horizon_months,
        "investment projected"
    );
    Ok(result)
}
