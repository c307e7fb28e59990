//! Spanish VAT (IVA) and income-tax withholding (retención) tiers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autonomo_shared::types::Rate;

/// IVA rate tier applied to an invoice or expense base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IvaRate {
    /// 0%.
    Zero,
    /// 4%.
    SuperReduced,
    /// 10%.
    Reduced,
    /// 21%.
    Standard,
}

impl IvaRate {
    /// The tier's multiplier.
    #[must_use]
    pub fn decimal(self) -> Decimal {
        match self {
            Self::Zero => Decimal::new(0, 2),
            Self::SuperReduced => Decimal::new(4, 2),
            Self::Reduced => Decimal::new(10, 2),
            Self::Standard => Decimal::new(21, 2),
        }
    }

    /// The tier as a [`Rate`].
    #[must_use]
    pub fn to_rate(self) -> Rate {
        Rate::from_decimal(self.decimal())
    }
}

/// IRPF withholding tier applied to an invoice base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RetencionRate {
    /// No withholding.
    Zero,
    /// 7%, reduced rate during the first years of activity.
    NewProfessional,
    /// 15%.
    Standard,
}

impl RetencionRate {
    /// The tier's multiplier.
    #[must_use]
    pub fn decimal(self) -> Decimal {
        match self {
            Self::Zero => Decimal::new(0, 2),
            Self::NewProfessional => Decimal::new(7, 2),
            Self::Standard => Decimal::new(15, 2),
        }
    }

    /// The tier as a [`Rate`].
    #[must_use]
    pub fn to_rate(self) -> Rate {
        Rate::from_decimal(self.decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(IvaRate::Zero, dec!(0.00))]
    #[case(IvaRate::SuperReduced, dec!(0.04))]
    #[case(IvaRate::Reduced, dec!(0.10))]
    #[case(IvaRate::Standard, dec!(0.21))]
    fn test_iva_tiers(#[case] tier: IvaRate, #[case] expected: Decimal) {
        assert_eq!(tier.decimal(), expected);
        assert_eq!(tier.to_rate().decimal(), expected);
    }

    #[rstest]
    #[case(RetencionRate::Zero, dec!(0.00))]
    #[case(RetencionRate::NewProfessional, dec!(0.07))]
    #[case(RetencionRate::Standard, dec!(0.15))]
    fn test_retencion_tiers(#[case] tier: RetencionRate, #[case] expected: Decimal) {
        assert_eq!(tier.decimal(), expected);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&IvaRate::SuperReduced).unwrap(),
            "\"SUPER_REDUCED\""
        );
        let tier: RetencionRate = serde_json::from_str("\"NEW_PROFESSIONAL\"").unwrap();
        assert_eq!(tier, RetencionRate::NewProfessional);
    }
}
