//! Fixed-rate, fully amortizing loan evaluated month by month.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{self, DomainError};

/// Tenor used when a loan does not specify one: 30 years.
pub const DEFAULT_TENOR_MONTHS: u32 = 360;

fn default_tenor_months() -> u32 {
    DEFAULT_TENOR_MONTHS
}

/// Terms of a home loan and the ownership costs that come with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// The annual interest rate as a percentage (e.g., 7.0 for 7%).
    pub annual_interest_rate: f64,
    /// The amount borrowed.
    pub principal: f64,
    /// The month at which the loan is evaluated (sale or early redemption).
    pub horizon_months: u32,
    /// Flat monthly ownership cost, such as HOA fees.
    #[serde(default)]
    pub monthly_fixed_cost: f64,
    /// Yearly ownership cost such as maintenance or property taxes.
    ///
    /// Charged as a twelfth each month.
    #[serde(default)]
    pub annual_recurring_cost: f64,
    /// The total number of scheduled monthly payments.
    #[serde(default = "default_tenor_months")]
    pub tenor_months: u32,
}

impl LoanTerms {
    /// Evaluates these terms with [`compute_amortization`].
    pub fn evaluate(&self) -> Result<AmortizationResult, DomainError> {
        compute_amortization(
            self.annual_interest_rate,
            self.principal,
            self.horizon_months,
            self.monthly_fixed_cost,
            self.annual_recurring_cost,
            self.tenor_months,
        )
    }

    fn validate(&self) -> Result<(), DomainError> {
        error::non_negative("annual_interest_rate", self.annual_interest_rate)?;
        error::positive("principal", self.principal)?;
        error::non_negative("monthly_fixed_cost", self.monthly_fixed_cost)?;
        error::non_negative("annual_recurring_cost", self.annual_recurring_cost)?;
        error::months("tenor_months", self.tenor_months)?;
        error::months("horizon_months", self.horizon_months)?;
        if self.horizon_months > self.tenor_months {
            return Err(DomainError::HorizonBeyondTenor {
                horizon_months: self.horizon_months,
                tenor_months: self.tenor_months,
            });
        }
        Ok(())
    }
}

/// Totals of a loan as of its evaluation horizon, or as of payoff if that came first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// The interest portion of every payment made so far.
    pub cumulative_interest_paid: f64,
    /// The principal portion of every payment made so far.
    pub cumulative_principal_paid: f64,
    /// Balance still owed, never below zero.
    pub outstanding_principal: f64,
    /// The level payment, constant for the whole tenor.
    pub monthly_payment: f64,
    /// Monthly fixed costs paid so far.
    pub fixed_cost_paid: f64,
    /// Recurring yearly costs paid so far, accrued monthly.
    pub recurring_cost_paid: f64,
    /// Months actually simulated; smaller than the horizon only when the loan was paid off early.
    pub months_elapsed: u32,
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based payment number.
    pub payment_number: u32,
    /// 1-based loan year the payment falls in.
    pub year: u32,
    /// 1..=12 within `year`.
    pub month_of_year: u32,
    /// The level payment made this month.
    pub payment: f64,
    /// The portion of the payment that covers interest.
    pub interest: f64,
    /// The portion of the payment that reduces the balance.
    pub principal: f64,
    pub cumulative_interest_paid: f64,
    /// Balance after this payment, never below zero.
    pub outstanding_principal: f64,
    pub fixed_cost_paid: f64,
    pub recurring_cost_paid: f64,
}

/// Level payment that retires `principal` in `tenor_months` payments.
///
/// PMT = P * [i(1 + i)^n] / [(1 + i)^n – 1], or P / n when the rate is zero.
pub fn level_payment(monthly_rate: f64, principal: f64, tenor_months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return principal / f64::from(tenor_months);
    }
    let i_plus_1_pow_n = (1.0 + monthly_rate).powf(f64::from(tenor_months));
    monthly_rate * principal * i_plus_1_pow_n / (i_plus_1_pow_n - 1.0)
}

/// Evaluates a loan at `horizon_months`.
///
/// Rates are percentages (`7.0` for 7%); the monthly rate is `annual / 12 / 100`.
/// The loop stops as soon as the balance reaches zero, so a horizon past the payoff
/// month reports the totals at payoff.
///
/// # Errors
///
/// Returns a [`DomainError`] for a non-positive principal, a zero tenor or horizon,
/// a horizon past the tenor, and negative or non-finite rates and costs.
pub fn compute_amortization(
    annual_interest_rate: f64,
    principal: f64,
    horizon_months: u32,
    monthly_fixed_cost: f64,
    annual_recurring_cost: f64,
    tenor_months: u32,
) -> Result<AmortizationResult, DomainError> {
    let terms = LoanTerms {
        annual_interest_rate,
        principal,
        horizon_months,
        monthly_fixed_cost,
        annual_recurring_cost,
        tenor_months,
    };
    terms.validate()?;

    let result = walk(&terms, |_| {});
    debug!(
        principal,
        monthly_payment = result.monthly_payment,
        cumulative_interest_paid = result.cumulative_interest_paid,
        outstanding_principal = result.outstanding_principal,
        months_elapsed = result.months_elapsed,
        "amortization evaluated"
    );
    Ok(result)
}

/// Month-by-month breakdown of the same walk [`compute_amortization`] performs.
///
/// The last row matches the totals reported by [`compute_amortization`] for the same terms.
pub fn amortization_schedule(terms: &LoanTerms) -> Result<Vec<ScheduleRow>, DomainError> {
    terms.validate()?;

    let mut rows = Vec::with_capacity(terms.horizon_months as usize);
    walk(terms, |row| {
        trace!(
            payment_number = row.payment_number,
            interest = row.interest,
            outstanding_principal = row.outstanding_principal,
            "schedule month"
        );
        rows.push(row);
    });
    Ok(rows)
}

fn walk(terms: &LoanTerms, mut on_month: impl FnMut(ScheduleRow)) -> AmortizationResult {
    let monthly_rate = terms.annual_interest_rate / 12.0 / 100.0;
    let monthly_recurring_cost = terms.annual_recurring_cost / 12.0;
    let payment = level_payment(monthly_rate, terms.principal, terms.tenor_months);

    let mut result = AmortizationResult {
        cumulative_interest_paid: 0.0,
        cumulative_principal_paid: 0.0,
        outstanding_principal: terms.principal,
        monthly_payment: payment,
        fixed_cost_paid: 0.0,
        recurring_cost_paid: 0.0,
        months_elapsed: 0,
    };

    for month in 1..=terms.horizon_months {
        let interest_payment = result.outstanding_principal * monthly_rate;
        let principal_payment = payment - interest_payment;

        result.cumulative_interest_paid += interest_payment;
        result.cumulative_principal_paid += principal_payment;
        result.fixed_cost_paid += terms.monthly_fixed_cost;
        result.recurring_cost_paid += monthly_recurring_cost;
        result.outstanding_principal -= principal_payment;
        result.months_elapsed = month;

        let paid_off = result.outstanding_principal <= 0.0;
        if paid_off {
            result.outstanding_principal = 0.0;
        }

        on_month(ScheduleRow {
            payment_number: month,
            year: (month - 1) / 12 + 1,
            month_of_year: (month - 1) % 12 + 1,
            payment,
            interest: interest_payment,
            principal: principal_payment,
            cumulative_interest_paid: result.cumulative_interest_paid,
            outstanding_principal: result.outstanding_principal,
            fixed_cost_paid: result.fixed_cost_paid,
            recurring_cost_paid: result.recurring_cost_paid,
        });

        if paid_off {
            break;
        }
    }

    result
}
