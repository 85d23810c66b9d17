//! Component value strings such as `"220Ω"`, `"9V"` or `"100μF"`.
//!
//! A value is a leading decimal number, an optional SI multiplier letter and
//! any trailing unit symbols. Letters outside the multiplier table are kept
//! as part of the unit and scale by 1.

/// Multiplier letters recognised after the numeric part (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiPrefix {
    Giga,
    Kilo,
    Milli,
    Micro,
    Nano,
    Pico,
}

impl SiPrefix {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_lowercase().next()? {
            'g' => Some(Self::Giga),
            'k' => Some(Self::Kilo),
            'm' => Some(Self::Milli),
            'u' | 'μ' | 'µ' => Some(Self::Micro),
            'n' => Some(Self::Nano),
            'p' => Some(Self::Pico),
            _ => None,
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            Self::Giga => 1e9,
            Self::Kilo => 1e3,
            Self::Milli => 1e-3,
            Self::Micro => 1e-6,
            Self::Nano => 1e-9,
            Self::Pico => 1e-12,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Giga => 'G',
            Self::Kilo => 'k',
            Self::Milli => 'm',
            Self::Micro => 'μ',
            Self::Nano => 'n',
            Self::Pico => 'p',
        }
    }
}

/// Parses the magnitude of a value string, or `None` when it has no leading
/// number or the magnitude is not finite.
pub fn parse_value(input: &str) -> Option<f64> {
    let input = input.trim();

    let mut seen_dot = false;
    let numeric_end = input
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map(|(i, _)| i)
        .unwrap_or(input.len());

    let numeric_part = &input[..numeric_end];
    if !numeric_part.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let value: f64 = numeric_part.parse().ok()?;

    let multiplier = input[numeric_end..]
        .trim_start()
        .chars()
        .next()
        .and_then(SiPrefix::from_char)
        .map_or(1.0, SiPrefix::factor);

    // Overlong literals overflow to infinity; treat them as unparseable.
    Some(value * multiplier).filter(|v| v.is_finite())
}

/// Parses a value string, falling back to `default` when it is empty or has no leading number.
pub fn parse_value_or(input: Option<&str>, default: f64) -> f64 {
    input.and_then(parse_value).unwrap_or(default)
}
