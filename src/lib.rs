//! `rent_vs_buy` is a Rust library for comparing the cost of buying a home on a loan
//! against renting it and investing the difference.
//!
//! It is built from three independent projections:
//! - **Amortization**: a fixed-rate, fully amortizing loan walked month by month up to
//!   the month the home is sold, together with its HOA and maintenance costs.
//! - **Rent**: rent paid over the same period, escalating once a year.
//! - **Investment**: a deposit and monthly contributions compounding at a fixed return.
//!
//! On top of those, [`comparison::compare`] puts buying and renting side by side and
//! [`breakeven::break_even_table`] shows which loan amount a given rent pays for.
//!
//! All amounts are plain `f64` currency values and all rates are percentages
//! (`7.0` for 7%). Every function validates its inputs up front and returns a
//! [`DomainError`] naming the offending parameter.
//!
//! ## Usage
//!
//! ```rust
//! use rent_vs_buy::{compute_amortization, compute_investment, compute_rent};
//!
//! fn main() {
//!     match compute_amortization(7.0, 1_100_000.0, 60, 200.0, 1_200.0, 360) {
//!         Ok(loan) => {
//!             println!("Monthly Payment:       {:.2}", loan.monthly_payment);
//!             println!("Interest Paid:         {:.2}", loan.cumulative_interest_paid);
//!             println!("Outstanding Principal: {:.2}", loan.outstanding_principal);
//!         }
//!         Err(e) => {
//!             eprintln!("Error evaluating loan: {}", e);
//!         }
//!     }
//!
//!     let rent = compute_rent(3_100.0, 5.0, 60).unwrap();
//!     println!("Total Rent Paid:   {:.2}", rent.total_rent_paid);
//!
//!     let savings = compute_investment(40_000.0, 1_000.0, 5.0, 60, 0.0).unwrap();
//!     println!("Investment Balance: {:.2}", savings.final_balance);
//! }
//! ```

pub mod amortization;
pub mod breakeven;
pub mod comparison;
pub mod error;
pub mod investment;
pub mod rent;

pub use amortization::{
    amortization_schedule, compute_amortization, AmortizationResult, LoanTerms, ScheduleRow,
};
pub use breakeven::{break_even_table, BreakEvenRow, BreakEvenTable, BreakEvenTerms};
pub use comparison::{compare, BuyVsRentComparison, BuyVsRentScenario, Verdict};
pub use error::DomainError;
pub use investment::{compute_investment, InvestmentResult, InvestmentTerms};
pub use rent::{compute_rent, RentResult, RentTerms};

/// Splits a horizon into consecutive blocks of 12 months, the last one possibly shorter.
pub(crate) fn yearly_blocks(horizon_months: u32) -> impl Iterator<Item = u32> {
    (0..horizon_months)
        .step_by(12)
        .map(move |start| (horizon_months - start).min(12))
}
