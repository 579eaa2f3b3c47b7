//! Break-even table: the all-in monthly cost of owning, swept over loan amounts.
//!
//! Each row spreads the whole cost of a loan held to term (interest, HOA and yearly
//! costs) evenly over its months and adds the average principal repaid. A rent close
//! to a row's all-in cost buys roughly that loan amount.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amortization::{compute_amortization, DEFAULT_TENOR_MONTHS};
use crate::error::{self, DomainError};

/// Most rows a single sweep may produce.
pub const MAX_SWEEP_ROWS: usize = 10_000;

fn default_tenor_months() -> u32 {
    DEFAULT_TENOR_MONTHS
}

fn default_min_loan() -> f64 {
    100_000.0
}

fn default_max_loan() -> f64 {
    1_200_000.0
}

fn default_loan_step() -> f64 {
    10_000.0
}

/// Loan conditions shared by every row, plus the sweep of loan amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenTerms {
    pub annual_interest_rate: f64,
    #[serde(default = "default_tenor_months")]
    pub tenor_months: u32,
    #[serde(default)]
    pub monthly_fixed_cost: f64,
    #[serde(default)]
    pub annual_recurring_cost: f64,
    #[serde(default = "default_min_loan")]
    pub min_loan: f64,
    /// Inclusive upper end of the sweep.
    #[serde(default = "default_max_loan")]
    pub max_loan: f64,
    #[serde(default = "default_loan_step")]
    pub loan_step: f64,
}

impl BreakEvenTerms {
    /// Sweep with the default range of 100,000 to 1,200,000 in steps of 10,000.
    pub fn new(
        annual_interest_rate: f64,
        tenor_months: u32,
        monthly_fixed_cost: f64,
        annual_recurring_cost: f64,
    ) -> Self {
        Self {
            annual_interest_rate,
            tenor_months,
            monthly_fixed_cost,
            annual_recurring_cost,
            min_loan: default_min_loan(),
            max_loan: default_max_loan(),
            loan_step: default_loan_step(),
        }
    }

    fn loan_amounts(&self) -> Result<Vec<f64>, DomainError> {
        error::positive("min_loan", self.min_loan)?;
        error::finite("max_loan", self.max_loan)?;
        error::positive("loan_step", self.loan_step)?;
        if self.max_loan < self.min_loan {
            return Err(DomainError::EmptySweep {
                min_loan: self.min_loan,
                max_loan: self.max_loan,
                loan_step: self.loan_step,
            });
        }

        let steps = ((self.max_loan - self.min_loan) / self.loan_step).floor();
        if !steps.is_finite() || steps >= MAX_SWEEP_ROWS as f64 {
            return Err(DomainError::SweepTooLarge {
                rows: steps + 1.0,
                max_rows: MAX_SWEEP_ROWS,
            });
        }

        let steps = steps as usize;
        Ok((0..=steps)
            .map(|k| self.min_loan + self.loan_step * k as f64)
            .collect())
    }
}

/// Averages of one loan amount held for its full tenor, rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenRow {
    pub loan_amount: Decimal,
    /// Loan year of the last evaluated month.
    pub year: u32,
    /// Cumulative interest spread over the months evaluated.
    pub avg_monthly_interest: Decimal,
    /// Loan amount spread over the tenor.
    pub avg_monthly_principal: Decimal,
    /// HOA and yearly costs spread over the months evaluated.
    pub avg_monthly_fees: Decimal,
    /// Interest, fees and principal averages added together; the figure to hold against rent.
    pub avg_monthly_all_in: Decimal,
    pub cumulative_interest_paid: Decimal,
}

/// Break-even rows for every loan amount in a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenTable {
    /// Ascending by loan amount.
    pub rows: Vec<BreakEvenRow>,
}

impl BreakEvenTable {
    /// The largest loan whose all-in monthly cost does not exceed `monthly_rent`.
    pub fn affordable_loan(&self, monthly_rent: Decimal) -> Option<&BreakEvenRow> {
        self.rows
            .iter()
            .rev()
            .find(|row| row.avg_monthly_all_in <= monthly_rent)
    }
}

fn cents(field: &'static str, value: f64) -> Result<Decimal, DomainError> {
    Decimal::from_f64(value)
        .map(|amount| amount.round_dp(2))
        .ok_or(DomainError::Unrepresentable { field, value })
}

/// Builds one row per loan amount in the sweep, each evaluated over the full tenor.
///
/// # Errors
///
/// Returns a [`DomainError`] for invalid loan conditions, a non-positive step or
/// starting amount, a sweep whose upper end lies below its start, or a sweep of
/// more than [`MAX_SWEEP_ROWS`] loan amounts.
pub fn break_even_table(terms: &BreakEvenTerms) -> Result<BreakEvenTable, DomainError> {
    let loan_amounts = terms.loan_amounts()?;

    let mut rows = Vec::with_capacity(loan_amounts.len());
    for loan_amount in loan_amounts {
        let loan = compute_amortization(
            terms.annual_interest_rate,
            loan_amount,
            terms.tenor_months,
            terms.monthly_fixed_cost,
            terms.annual_recurring_cost,
            terms.tenor_months,
        )?;

        let months = f64::from(loan.months_elapsed);
        let avg_monthly_interest = loan.cumulative_interest_paid / months;
        let avg_monthly_fees = (loan.fixed_cost_paid + loan.recurring_cost_paid) / months;
        let avg_monthly_principal = loan_amount / f64::from(terms.tenor_months);
        let avg_monthly_all_in = avg_monthly_interest + avg_monthly_fees + avg_monthly_principal;

        rows.push(BreakEvenRow {
            loan_amount: cents("loan_amount", loan_amount)?,
            year: (loan.months_elapsed - 1) / 12 + 1,
            avg_monthly_interest: cents("avg_monthly_interest", avg_monthly_interest)?,
            avg_monthly_principal: cents("avg_monthly_principal", avg_monthly_principal)?,
            avg_monthly_fees: cents("avg_monthly_fees", avg_monthly_fees)?,
            avg_monthly_all_in: cents("avg_monthly_all_in", avg_monthly_all_in)?,
            cumulative_interest_paid: cents(
                "cumulative_interest_paid",
                loan.cumulative_interest_paid,
            )?,
        });
    }

    debug!(rows = rows.len(), tenor_months = terms.tenor_months, "break-even table built");
    Ok(BreakEvenTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_sweep_covers_the_whole_range() {
        let table = break_even_table(&BreakEvenTerms::new(7.0, 360, 200.0, 15_000.0)).unwrap();

        assert_eq!(table.rows.len(), 111);
        assert_eq!(table.rows[0].loan_amount, dec!(100000));
        assert_eq!(table.rows[110].loan_amount, dec!(1200000));
        assert!(table.rows.iter().all(|row| row.year == 30));
        assert!(
            table
                .rows
                .windows(2)
                .all(|pair| pair[0].avg_monthly_all_in < pair[1].avg_monthly_all_in)
        );
    }

    #[test]
    fn test_one_year_loan_row() {
        let terms = BreakEvenTerms {
            min_loan: 12_000.0,
            max_loan: 12_000.0,
            ..BreakEvenTerms::new(12.0, 12, 0.0, 0.0)
        };
        let table = break_even_table(&terms).unwrap();
        let row = &table.rows[0];

        assert_eq!(table.rows.len(), 1);
        assert_eq!(row.year, 1);
        assert_eq!(row.avg_monthly_principal, dec!(1000.00));
        assert_eq!(row.avg_monthly_interest, dec!(66.19));
        assert_eq!(row.avg_monthly_fees, dec!(0));
        assert_eq!(row.avg_monthly_all_in, dec!(1066.19));
        assert_eq!(row.cumulative_interest_paid, dec!(794.23));
    }

    #[test]
    fn test_fees_are_spread_per_month() {
        let terms = BreakEvenTerms {
            min_loan: 100_000.0,
            max_loan: 100_000.0,
            ..BreakEvenTerms::new(0.0, 120, 200.0, 2_400.0)
        };
        let row = &break_even_table(&terms).unwrap().rows[0];

        assert_eq!(row.avg_monthly_fees, dec!(400.00));
        assert_eq!(row.avg_monthly_interest, dec!(0));
        assert_eq!(row.avg_monthly_all_in, dec!(1233.33));
    }

    #[test]
    fn test_affordable_loan_for_rent() {
        let table = break_even_table(&BreakEvenTerms::new(7.0, 360, 200.0, 15_000.0)).unwrap();

        let row = table.affordable_loan(dec!(5000)).unwrap();
        assert!(row.avg_monthly_all_in <= dec!(5000));
        let next = table
            .rows
            .iter()
            .find(|candidate| candidate.loan_amount > row.loan_amount)
            .unwrap();
        assert!(next.avg_monthly_all_in > dec!(5000));

        assert!(table.affordable_loan(dec!(100)).is_none());
    }

    #[test]
    fn test_invalid_sweeps() {
        let reversed = BreakEvenTerms {
            min_loan: 500_000.0,
            max_loan: 100_000.0,
            ..BreakEvenTerms::new(7.0, 360, 0.0, 0.0)
        };
        assert!(matches!(break_even_table(&reversed), Err(DomainError::EmptySweep { .. })));

        let no_step = BreakEvenTerms {
            loan_step: 0.0,
            ..BreakEvenTerms::new(7.0, 360, 0.0, 0.0)
        };
        assert_eq!(break_even_table(&no_step).unwrap_err().field(), "loan_step");

        let no_tenor = BreakEvenTerms::new(7.0, 0, 0.0, 0.0);
        assert_eq!(break_even_table(&no_tenor).unwrap_err().field(), "tenor_months");
    }

    #[test]
    fn test_oversized_sweeps_are_rejected() {
        let endless = BreakEvenTerms {
            min_loan: 1.0,
            max_loan: 1e300,
            loan_step: 1.0,
            ..BreakEvenTerms::new(7.0, 12, 0.0, 0.0)
        };
        let err = break_even_table(&endless).unwrap_err();
        assert!(matches!(err, DomainError::SweepTooLarge { max_rows: MAX_SWEEP_ROWS, .. }));
        assert_eq!(err.field(), "loan_step");

        let one_dollar_steps = BreakEvenTerms {
            max_loan: 1e12,
            loan_step: 1.0,
            ..BreakEvenTerms::new(7.0, 12, 0.0, 0.0)
        };
        assert!(matches!(
            break_even_table(&one_dollar_steps),
            Err(DomainError::SweepTooLarge { .. })
        ));
    }

    #[test]
    fn test_sweep_at_the_row_limit() {
        let terms = BreakEvenTerms {
            min_loan: 10_000.0,
            max_loan: 10_000.0 + 100.0 * (MAX_SWEEP_ROWS - 1) as f64,
            loan_step: 100.0,
            ..BreakEvenTerms::new(5.0, 12, 0.0, 0.0)
        };
        assert_eq!(break_even_table(&terms).unwrap().rows.len(), MAX_SWEEP_ROWS);

        let one_more = BreakEvenTerms {
            max_loan: terms.max_loan + 100.0,
            ..terms
        };
        assert!(matches!(
            break_even_table(&one_more),
            Err(DomainError::SweepTooLarge { .. })
        ));
    }
}
