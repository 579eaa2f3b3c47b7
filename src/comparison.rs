//! Buying with a loan versus renting and investing what would have gone into the mortgage.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amortization::{AmortizationResult, LoanTerms};
use crate::error::{self, DomainError};
use crate::investment::{compute_investment, InvestmentResult};
use crate::rent::{compute_rent, RentResult};

/// A home purchase and the rental alternative, evaluated over the loan's horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyVsRentScenario {
    /// The loan taken to buy the home.
    pub loan: LoanTerms,
    /// Gain on the sale price expected when the home is sold at the horizon.
    pub sale_profit: f64,
    /// Rent for the same home in the first month.
    pub initial_monthly_rent: f64,
    /// Yearly rent increase as a percentage.
    pub annual_rent_inflation_pct: f64,
    /// Cash that would go into the down payment; invested instead when renting.
    pub down_payment: f64,
    /// The annual return on the renter's investments, as a percentage.
    pub annual_return_pct: f64,
}

impl Default for BuyVsRentScenario {
    /// A 1.1M loan at 7% sold after five years, against a 3,100 rent.
    fn default() -> Self {
        Self {
            loan: LoanTerms {
                annual_interest_rate: 7.0,
                principal: 1_100_000.0,
                horizon_months: 60,
                monthly_fixed_cost: 200.0,
                annual_recurring_cost: 1_200.0,
                tenor_months: 360,
            },
            sale_profit: 140_000.0,
            initial_monthly_rent: 3_100.0,
            annual_rent_inflation_pct: 5.0,
            down_payment: 40_344.74,
            annual_return_pct: 5.0,
        }
    }
}

/// Which side of a comparison ends the horizon with the better position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Owning comes out ahead.
    Buy,
    /// Renting and investing comes out ahead.
    Rent,
    /// Both positions are equal.
    Even,
}

/// Both sides of a [`BuyVsRentScenario`] at the loan's horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyVsRentComparison {
    /// The loan evaluated at its horizon.
    pub ownership: AmortizationResult,
    /// Rent paid over the same horizon.
    pub rent: RentResult,
    /// The renter's invested down payment and monthly savings.
    pub investment: InvestmentResult,
    /// Sale profit less interest, fixed and recurring costs paid while owning.
    pub buying_position: f64,
    /// Investment balance less all rent paid.
    pub renting_position: f64,
    /// `renting_position - buying_position`; positive when renting comes out ahead.
    pub renting_advantage: f64,
    pub verdict: Verdict,
}

/// Evaluates both sides of a scenario over the loan's horizon.
///
/// The renter invests the down payment and, every month, the difference between the
/// mortgage payment and the rent. That contribution shrinks by the rent inflation rate
/// each year as more of it goes to rent, and turns into a withdrawal once rent exceeds
/// the mortgage payment.
///
/// # Errors
///
/// Returns the first [`DomainError`] raised by the loan, rent or investment inputs.
pub fn compare(scenario: &BuyVsRentScenario) -> Result<BuyVsRentComparison, DomainError> {
    error::finite("sale_profit", scenario.sale_profit)?;

    let ownership = scenario.loan.evaluate()?;
    let buying_position = scenario.sale_profit
        - ownership.cumulative_interest_paid
        - ownership.fixed_cost_paid
        - ownership.recurring_cost_paid;

    let horizon_months = scenario.loan.horizon_months;
    let rent = compute_rent(
        scenario.initial_monthly_rent,
        scenario.annual_rent_inflation_pct,
        horizon_months,
    )?;

    let investment = compute_investment(
        scenario.down_payment,
        ownership.monthly_payment - scenario.initial_monthly_rent,
        scenario.annual_return_pct,
        horizon_months,
        -scenario.annual_rent_inflation_pct,
    )?;
    let renting_position = investment.final_balance - rent.total_rent_paid;

    let renting_advantage = renting_position - buying_position;
    let verdict = if renting_advantage > 0.0 {
        Verdict::Rent
    } else if renting_advantage < 0.0 {
        Verdict::Buy
    } else {
        Verdict::Even
    };

    debug!(buying_position, renting_position, ?verdict, "buy vs rent compared");

    Ok(BuyVsRentComparison {
        ownership,
        rent,
        investment,
        buying_position,
        renting_position,
        renting_advantage,
        verdict,
    })
}
