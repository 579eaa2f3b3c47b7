use thiserror::Error;

/// Rejected input for one of the projections.
///
/// Every variant names the parameter that failed validation. Inputs are
/// checked before any month is simulated, so an error never comes with a
/// partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("`{field}` cannot be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("`{field}` must be at least one month")]
    ZeroMonths { field: &'static str },

    #[error("horizon of {horizon_months} months is past the loan tenor of {tenor_months} months")]
    HorizonBeyondTenor { horizon_months: u32, tenor_months: u32 },

    #[error("`{field}` of {value}% would wipe out the whole amount in one period")]
    RateBelowTotalLoss { field: &'static str, value: f64 },

    #[error("loan sweep from {min_loan} to {max_loan} by {loan_step} has no loan amounts")]
    EmptySweep { min_loan: f64, max_loan: f64, loan_step: f64 },

    #[error("loan sweep would produce {rows} rows, more than the limit of {max_rows}")]
    SweepTooLarge { rows: f64, max_rows: usize },

    #[error("`{field}` of {value} cannot be represented as a decimal amount")]
    Unrepresentable { field: &'static str, value: f64 },
}

impl DomainError {
    /// The parameter that was rejected.
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::NotFinite { field, .. }
            | DomainError::NotPositive { field, .. }
            | DomainError::Negative { field, .. }
            | DomainError::ZeroMonths { field }
            | DomainError::RateBelowTotalLoss { field, .. }
            | DomainError::Unrepresentable { field, .. } => field,
            DomainError::HorizonBeyondTenor { .. } => "horizon_months",
            DomainError::EmptySweep { .. } | DomainError::SweepTooLarge { .. } => "loan_step",
        }
    }
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NotFinite { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::NotPositive { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if finite(field, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::Negative { field, value })
    }
}

pub(crate) fn months(field: &'static str, value: u32) -> Result<u32, DomainError> {
    if value == 0 {
        Err(DomainError::ZeroMonths { field })
    } else {
        Ok(value)
    }
}

/// Accepts any finite percentage above -100 for a single period.
pub(crate) fn growth_pct(field: &'static str, pct: f64) -> Result<f64, DomainError> {
    if finite(field, pct)? > -100.0 {
        Ok(pct)
    } else {
        Err(DomainError::RateBelowTotalLoss { field, value: pct })
    }
}
