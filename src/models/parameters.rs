//! Financial parameters and their documented defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default minimum wage applied when none is configured.
pub const DEFAULT_MINIMUM_WAGE: Decimal = Decimal::from_parts(141200, 0, 0, false, 2);

/// Default income-tax deduction per dependent.
pub const DEFAULT_DEPENDENT_DEDUCTION: Decimal = Decimal::from_parts(18959, 0, 0, false, 2);

/// Default employer social-security rate (20%).
pub const DEFAULT_EMPLOYER_SOCIAL_SECURITY_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Default employer risk-insurance rate (2%).
pub const DEFAULT_EMPLOYER_RISK_INSURANCE_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Default employer "other entities" rate (5.8%).
pub const DEFAULT_EMPLOYER_OTHER_ENTITIES_RATE: Decimal = Decimal::from_parts(58, 0, 0, false, 1);

/// Default consignable-margin percentage (35%).
pub const DEFAULT_CONSIGNABLE_MARGIN_RATE: Decimal = Decimal::from_parts(35, 0, 0, false, 0);

/// Scalar configuration values for a payroll calculation.
///
/// Every field is optional. [`FinancialParameters::resolve`] substitutes
/// the documented default for each absent value, except the
/// social-security ceiling, whose absence means "uncapped".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialParameters {
    /// The national minimum wage.
    #[serde(default)]
    pub minimum_wage: Option<Decimal>,
    /// Income-tax deduction per dependent.
    #[serde(default)]
    pub dependent_deduction: Option<Decimal>,
    /// Cap on the social-security contribution base.
    #[serde(default)]
    pub social_security_ceiling: Option<Decimal>,
    /// Employer social-security rate, as a percentage.
    #[serde(default)]
    pub employer_social_security_rate: Option<Decimal>,
    /// Employer risk-insurance rate, as a percentage.
    #[serde(default)]
    pub employer_risk_insurance_rate: Option<Decimal>,
    /// Employer "other entities" rate, as a percentage.
    #[serde(default)]
    pub employer_other_entities_rate: Option<Decimal>,
    /// Share of net pay that may be pledged, as a percentage.
    #[serde(default)]
    pub consignable_margin_rate: Option<Decimal>,
}

/// Parameters with every documented default applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedParameters {
    /// The national minimum wage.
    pub minimum_wage: Decimal,
    /// Income-tax deduction per dependent.
    pub dependent_deduction: Decimal,
    /// Cap on the social-security contribution base, if any.
    pub social_security_ceiling: Option<Decimal>,
    /// Employer social-security rate, as a percentage.
    pub employer_social_security_rate: Decimal,
    /// Employer risk-insurance rate, as a percentage.
    pub employer_risk_insurance_rate: Decimal,
    /// Employer "other entities" rate, as a percentage.
    pub employer_other_entities_rate: Decimal,
    /// Share of net pay that may be pledged, as a percentage.
    pub consignable_margin_rate: Decimal,
}

impl Default for ResolvedParameters {
    fn default() -> Self {
        FinancialParameters::default().resolve().0
    }
}

impl FinancialParameters {
    /// Applies the documented defaults.
    ///
    /// Returns the resolved parameters together with the names of the
    /// parameters that took their default, in declaration order.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{FinancialParameters, DEFAULT_CONSIGNABLE_MARGIN_RATE};
    ///
    /// let (resolved, defaulted) = FinancialParameters::default().resolve();
    /// assert_eq!(resolved.consignable_margin_rate, DEFAULT_CONSIGNABLE_MARGIN_RATE);
    /// assert_eq!(resolved.social_security_ceiling, None);
    /// assert!(defaulted.contains(&"minimum_wage"));
    /// ```
    pub fn resolve(&self) -> (ResolvedParameters, Vec<&'static str>) {
        let mut defaulted = Vec::new();
        let mut pick = |value: Option<Decimal>, name: &'static str, default: Decimal| {
            value.unwrap_or_else(|| {
                defaulted.push(name);
                default
            })
        };

        let resolved = ResolvedParameters {
            minimum_wage: pick(self.minimum_wage, "minimum_wage", DEFAULT_MINIMUM_WAGE),
            dependent_deduction: pick(
                self.dependent_deduction,
                "dependent_deduction",
                DEFAULT_DEPENDENT_DEDUCTION,
            ),
            social_security_ceiling: self.social_security_ceiling,
            employer_social_security_rate: pick(
                self.employer_social_security_rate,
                "employer_social_security_rate",
                DEFAULT_EMPLOYER_SOCIAL_SECURITY_RATE,
            ),
            employer_risk_insurance_rate: pick(
                self.employer_risk_insurance_rate,
                "employer_risk_insurance_rate",
                DEFAULT_EMPLOYER_RISK_INSURANCE_RATE,
            ),
            employer_other_entities_rate: pick(
                self.employer_other_entities_rate,
                "employer_other_entities_rate",
                DEFAULT_EMPLOYER_OTHER_ENTITIES_RATE,
            ),
            consignable_margin_rate: pick(
                self.consignable_margin_rate,
                "consignable_margin_rate",
                DEFAULT_CONSIGNABLE_MARGIN_RATE,
            ),
        };

        (resolved, defaulted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_constants_have_documented_values() {
        assert_eq!(DEFAULT_MINIMUM_WAGE, dec("1412.00"));
        assert_eq!(DEFAULT_DEPENDENT_DEDUCTION, dec("189.59"));
        assert_eq!(DEFAULT_EMPLOYER_SOCIAL_SECURITY_RATE, dec("20"));
        assert_eq!(DEFAULT_EMPLOYER_RISK_INSURANCE_RATE, dec("2"));
        assert_eq!(DEFAULT_EMPLOYER_OTHER_ENTITIES_RATE, dec("5.8"));
        assert_eq!(DEFAULT_CONSIGNABLE_MARGIN_RATE, dec("35"));
    }

    #[test]
    fn test_empty_parameters_resolve_to_all_defaults() {
        let (resolved, defaulted) = FinancialParameters::default().resolve();

        assert_eq!(resolved.minimum_wage, dec("1412.00"));
        assert_eq!(resolved.dependent_deduction, dec("189.59"));
        assert_eq!(resolved.employer_other_entities_rate, dec("5.8"));
        assert_eq!(resolved.social_security_ceiling, None);
        assert_eq!(
            defaulted,
            vec![
                "minimum_wage",
                "dependent_deduction",
                "employer_social_security_rate",
                "employer_risk_insurance_rate",
                "employer_other_entities_rate",
                "consignable_margin_rate",
            ]
        );
    }

    #[test]
    fn test_configured_values_are_kept_and_not_reported() {
        let parameters = FinancialParameters {
            minimum_wage: Some(dec("1518.00")),
            social_security_ceiling: Some(dec("8157.41")),
            consignable_margin_rate: Some(dec("30")),
            ..FinancialParameters::default()
        };

        let (resolved, defaulted) = parameters.resolve();

        assert_eq!(resolved.minimum_wage, dec("1518.00"));
        assert_eq!(resolved.social_security_ceiling, Some(dec("8157.41")));
        assert_eq!(resolved.consignable_margin_rate, dec("30"));
        assert!(!defaulted.contains(&"minimum_wage"));
        assert!(!defaulted.contains(&"consignable_margin_rate"));
        assert!(defaulted.contains(&"dependent_deduction"));
    }

    #[test]
    fn test_explicit_zero_is_not_replaced_by_default() {
        let parameters = FinancialParameters {
            employer_risk_insurance_rate: Some(Decimal::ZERO),
            ..FinancialParameters::default()
        };

        let (resolved, defaulted) = parameters.resolve();

        assert_eq!(resolved.employer_risk_insurance_rate, Decimal::ZERO);
        assert!(!defaulted.contains(&"employer_risk_insurance_rate"));
    }

    #[test]
    fn test_parameters_deserialize_from_partial_yaml() {
        let yaml = "minimum_wage: \"1412.00\"\nsocial_security_ceiling: \"7786.02\"\n";
        let parameters: FinancialParameters = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parameters.minimum_wage, Some(dec("1412.00")));
        assert_eq!(parameters.dependent_deduction, None);
    }
}
