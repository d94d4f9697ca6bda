//! Configuration types for settlement calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the resolved
//! [`SettlementRules`] the calculator runs against.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How whole months of service are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenureBasis {
    /// Elapsed days divided by the reference month length, rounded down.
    #[default]
    ThirtyDayMonths,
    /// Whole calendar months, anchored on the admission day-of-month.
    CalendarMonths,
}

/// Metadata about the settlement policy, from `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyMetadata {
    /// Short policy code.
    pub code: String,
    /// The human-readable name of the policy.
    pub name: String,
    /// The version of the policy.
    pub version: String,
    /// How tenure is measured under this policy.
    #[serde(default)]
    pub tenure_basis: TenureBasis,
}

/// Severance fund rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceFundRates {
    /// Share of the monthly salary deposited into the fund each month.
    pub deposit_rate: Decimal,
    /// Penalty on the fund balance owed on dismissal without cause.
    pub penalty_rate: Decimal,
}

/// A social security band.
///
/// The rate of the first band whose ceiling covers the taxable amount
/// applies to the whole amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityBand {
    /// Inclusive upper bound of the band, or `None` for no ceiling.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// The withholding rate for amounts in this band.
    pub rate: Decimal,
}

/// Social security section of a rate file.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialSecurityConfig {
    /// Bands ordered by ascending ceiling.
    pub bands: Vec<SocialSecurityBand>,
}

/// Rate configuration for a specific effective date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// Length of the reference month in days.
    pub reference_month_days: u32,
    /// Severance fund rates.
    pub severance_fund: SeveranceFundRates,
    /// Social security withholding bands.
    pub social_security: SocialSecurityConfig,
}

impl RateConfig {
    /// Checks values serde cannot rule out on its own.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.reference_month_days == 0 {
            return Err("reference_month_days must be greater than zero".to_string());
        }
        if self.severance_fund.deposit_rate < Decimal::ZERO {
            return Err("severance_fund.deposit_rate must not be negative".to_string());
        }
        if self.severance_fund.penalty_rate < Decimal::ZERO {
            return Err("severance_fund.penalty_rate must not be negative".to_string());
        }
        if self.social_security.bands.is_empty() {
            return Err("social_security.bands must not be empty".to_string());
        }
        let ceilings: Vec<Decimal> = self
            .social_security
            .bands
            .iter()
            .filter_map(|b| b.up_to)
            .collect();
        if ceilings.windows(2).any(|w| w[0] >= w[1]) {
            return Err("social_security.bands ceilings must be ascending".to_string());
        }
        if self.social_security.bands.iter().any(|b| b.rate < Decimal::ZERO) {
            return Err("social_security.bands rates must not be negative".to_string());
        }
        Ok(())
    }
}

/// The resolved rules a settlement is calculated against.
///
/// [`SettlementRules::default`] is the standard policy: 30-day months, an 8%
/// monthly fund deposit, a 40% fund penalty and a flat 11% social security
/// withholding.
///
/// # Example
///
/// ```
/// use settlement_engine::config::SettlementRules;
/// use rust_decimal::Decimal;
///
/// let rules = SettlementRules::default();
/// assert_eq!(rules.reference_month_days, 30);
/// assert_eq!(rules.social_security_rate(Decimal::new(1_000_000, 0)), Decimal::new(11, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRules {
    /// How tenure is measured.
    pub tenure_basis: TenureBasis,
    /// Length of the reference month in days.
    pub reference_month_days: u32,
    /// Severance fund rates.
    pub severance_fund: SeveranceFundRates,
    /// Social security withholding bands, ascending.
    pub social_security_bands: Vec<SocialSecurityBand>,
}

impl Default for SettlementRules {
    fn default() -> Self {
        Self {
            tenure_basis: TenureBasis::ThirtyDayMonths,
            reference_month_days: 30,
            severance_fund: SeveranceFundRates {
                deposit_rate: Decimal::new(8, 2),
                penalty_rate: Decimal::new(40, 2),
            },
            social_security_bands: vec![SocialSecurityBand {
                up_to: None,
                rate: Decimal::new(11, 2),
            }],
        }
    }
}

impl SettlementRules {
    /// Builds rules from the policy metadata and one rate file.
    pub fn from_parts(policy: &PolicyMetadata, rates: &RateConfig) -> Self {
        Self {
            tenure_basis: policy.tenure_basis,
            reference_month_days: rates.reference_month_days,
            severance_fund: rates.severance_fund.clone(),
            social_security_bands: rates.social_security.bands.clone(),
        }
    }

    /// The social security rate applicable to a taxable amount.
    ///
    /// Amounts above every ceiling fall into the last band.
    pub fn social_security_rate(&self, taxable: Decimal) -> Decimal {
        self.social_security_bands
            .iter()
            .find(|band| band.up_to.is_none_or(|ceiling| taxable <= ceiling))
            .or_else(|| self.social_security_bands.last())
            .map(|band| band.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

/// The complete settlement configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct SettlementConfig {
    /// Policy metadata.
    policy: PolicyMetadata,
    /// Rate configurations by effective date (sorted oldest first).
    rates: Vec<RateConfig>,
}

impl SettlementConfig {
    /// Creates a new SettlementConfig from its component parts.
    pub fn new(policy: PolicyMetadata, mut rates: Vec<RateConfig>) -> Self {
        rates.sort_by_key(|r| r.effective_date);
        Self { policy, rates }
    }

    /// Returns the policy metadata.
    pub fn policy(&self) -> &PolicyMetadata {
        &self.policy
    }

    /// Returns all rate configurations, oldest first.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }

    /// Resolves the rules effective on `date`.
    ///
    /// The most recent rate file whose effective date is on or before
    /// `date` wins.
    pub fn rules_for(&self, date: NaiveDate) -> EngineResult<SettlementRules> {
        self.rates
            .iter()
            .rfind(|r| r.effective_date <= date)
            .map(|rates| SettlementRules::from_parts(&self.policy, rates))
            .ok_or(EngineError::RulesNotFound { date })
    }
}
