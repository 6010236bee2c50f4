use std::fmt;

/// A dollar amount rendered the way the advice texts show money.
///
/// The value is a plain `f64` because request amounts are arbitrary reals;
/// rounding to cents only happens when displaying, at any magnitude.
///
/// # Examples
///
/// ```rust
/// use advisor::Usd;
///
/// assert_eq!(Usd(1234.5).to_string(), "$1,234.50");
/// assert_eq!(Usd(-80.0).to_string(), "-$80.00");
/// assert_eq!(Usd(0.004).to_string(), "$0.00");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Usd(pub f64);

impl fmt::Display for Usd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() {
            return write!(f, "${}", self.0);
        }

        let digits = format!("{:.2}", self.0.abs());
        let (dollars, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        let sign = if self.0 < 0.0 && digits != "0.00" { "-" } else { "" };
        write!(f, "{sign}${}.{cents}", group_thousands(dollars))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(Usd(0.0).to_string(), "$0.00");
        assert_eq!(Usd(999.99).to_string(), "$999.99");
        assert_eq!(Usd(1000.0).to_string(), "$1,000.00");
        assert_eq!(Usd(9_000_000.0).to_string(), "$9,000,000.00");
        assert_eq!(Usd(123_456.78).to_string(), "$123,456.78");
    }

    #[test]
    fn negative_amounts_carry_leading_sign() {
        assert_eq!(Usd(-2880.0).to_string(), "-$2,880.00");
        assert_eq!(Usd(-0.001).to_string(), "$0.00");
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(Usd(12.0).to_string(), "$12.00");
        assert_eq!(Usd(12.345_6).to_string(), "$12.35");
        assert_eq!(Usd(300.0 * 0.1).to_string(), "$30.00");
    }

    #[test]
    fn huge_amounts_keep_every_digit() {
        assert_eq!(Usd(1e20).to_string(), "$100,000,000,000,000,000,000.00");
        assert_eq!(Usd(-1e25).to_string(), "-$10,000,000,000,000,000,905,969,664.00");
    }
}
