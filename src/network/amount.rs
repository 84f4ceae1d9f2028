use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const NANO_PAC_PER_PAC: i64 = 1_000_000_000;

/// Amount of PAC, stored in NanoPAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub fn zero() -> Self {
        Self(0)
    }

    pub fn from_nano_pac(nano: i64) -> Self {
        Self(nano)
    }

    pub fn nano_pac(self) -> i64 {
        self.0
    }

    pub fn to_pac(self) -> f64 {
        self.0 as f64 / NANO_PAC_PER_PAC as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl FromStr for Amount {
    type Err = std::num::ParseIntError;

    /// Parse an integer NanoPAC string, as returned by the node.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / NANO_PAC_PER_PAC as u64;
        let frac = abs % NANO_PAC_PER_PAC as u64;

        if frac == 0 {
            write!(f, "{}{} PAC", sign, whole)
        } else {
            let digits = format!("{:09}", frac);
            write!(f, "{}{}.{} PAC", sign, whole, digits.trim_end_matches('0'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_string() {
        assert_eq!("1500000000".parse::<Amount>().unwrap().nano_pac(), 1_500_000_000);
        assert!("1.5".parse::<Amount>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_nano_pac(1_500_000_000).to_string(), "1.5 PAC");
        assert_eq!(Amount::from_nano_pac(2_000_000_000).to_string(), "2 PAC");
        assert_eq!(Amount::from_nano_pac(1).to_string(), "0.000000001 PAC");
        assert_eq!(Amount::from_nano_pac(-250_000_000).to_string(), "-0.25 PAC");
        assert_eq!(Amount::zero().to_string(), "0 PAC");
    }

    #[test]
    fn test_to_pac() {
        assert_eq!(Amount::from_nano_pac(2_500_000_000).to_pac(), 2.5);
    }
}
