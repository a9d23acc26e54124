//! Exact decimal values for path coordinates.
//!
//! Path data is rewritten as text, so coordinates must survive a round trip
//! through the splitter without any representation drift: `0.1` stays `0.1`
//! and `10.50` keeps its trailing zero. Only the two operations the splitter
//! needs are provided - addition and a sign test.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// A base-10 number stored as `digits * 10^-scale`.
///
/// `digits` never has leading zeros; zero is an empty digit list and is never
/// negative. Trailing zeros are significant (they define the scale), so `2.0`
/// and `2` compare unequal, as do `2e2` and `200`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Decimal {
    negative: bool,
    digits: Vec<u8>,
    scale: i32,
}

/// Largest exponent or scale magnitude accepted when parsing.
///
/// Addition and display materialise `|scale|` digits, so this bounds the
/// memory any single literal can demand.
pub const MAX_SCALE: i32 = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecimalError {
    /// Not a number according to the SVG number grammar
    Invalid,
    /// Well-formed, but the exponent or resulting scale is out of range
    Overflow,
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalError::Invalid => write!(f, "invalid number"),
            DecimalError::Overflow => write!(f, "number out of range"),
        }
    }
}

impl std::error::Error for DecimalError {}

impl Decimal {
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Number of digits after the decimal point; may be negative for values
    /// written with a positive exponent.
    pub fn scale(&self) -> i32 {
        self.scale
    }

    fn from_parts(negative: bool, mut digits: Vec<u8>, scale: i32) -> Self {
        let leading = digits.iter().take_while(|&&d| d == 0).count();
        digits.drain(..leading);
        Self {
            negative: negative && !digits.is_empty(),
            digits,
            scale,
        }
    }

    /// Magnitude digits extended with trailing zeros up to `scale`.
    fn digits_at_scale(&self, scale: i32) -> Vec<u8> {
        let mut digits = self.digits.clone();
        if !digits.is_empty() {
            let pad = (i64::from(scale) - i64::from(self.scale)) as usize;
            digits.resize(digits.len() + pad, 0);
        }
        digits
    }
}

fn cmp_magnitude(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn add_magnitude(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(a.len().max(b.len()) + 1);
    let mut carry = 0;
    let mut ia = a.iter().rev();
    let mut ib = b.iter().rev();
    loop {
        let (da, db) = (ia.next(), ib.next());
        if da.is_none() && db.is_none() {
            break;
        }
        let sum = da.copied().unwrap_or(0) + db.copied().unwrap_or(0) + carry;
        result.push(sum % 10);
        carry = sum / 10;
    }
    if carry > 0 {
        result.push(carry);
    }
    result.reverse();
    result
}

/// `a - b`, where `a >= b` in magnitude.
fn sub_magnitude(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(a.len());
    let mut borrow = 0;
    let mut ib = b.iter().rev();
    for &da in a.iter().rev() {
        let db = ib.next().copied().unwrap_or(0) + borrow;
        if da >= db {
            result.push(da - db);
            borrow = 0;
        } else {
            result.push(da + 10 - db);
            borrow = 1;
        }
    }
    result.reverse();
    result
}

impl Add<&Decimal> for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        let scale = self.scale.max(rhs.scale);
        let a = self.digits_at_scale(scale);
        let b = rhs.digits_at_scale(scale);

        if self.negative == rhs.negative {
            return Decimal::from_parts(self.negative, add_magnitude(&a, &b), scale);
        }
        match cmp_magnitude(&a, &b) {
            Ordering::Less => Decimal::from_parts(rhs.negative, sub_magnitude(&b, &a), scale),
            _ => Decimal::from_parts(self.negative, sub_magnitude(&a, &b), scale),
        }
    }
}

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        &self + &rhs
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    /// Parse an SVG number: `[+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let mut i = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                i += 1;
                true
            }
            Some(b'+') => {
                i += 1;
                false
            }
            _ => false,
        };

        let mut digits = Vec::new();
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            digits.push(bytes[i] - b'0');
            i += 1;
        }
        let int_len = digits.len();

        let mut frac_len: i64 = 0;
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                digits.push(bytes[i] - b'0');
                frac_len += 1;
                i += 1;
            }
        }
        if int_len == 0 && frac_len == 0 {
            return Err(DecimalError::Invalid);
        }

        let mut exponent: i64 = 0;
        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            i += 1;
            let exp_negative = match bytes.get(i) {
                Some(b'-') => {
                    i += 1;
                    true
                }
                Some(b'+') => {
                    i += 1;
                    false
                }
                _ => false,
            };
            let exp_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                exponent = exponent
                    .checked_mul(10)
                    .and_then(|e| e.checked_add(i64::from(bytes[i] - b'0')))
                    .ok_or(DecimalError::Overflow)?;
                i += 1;
            }
            if i == exp_start {
                return Err(DecimalError::Invalid);
            }
            if exp_negative {
                exponent = -exponent;
            }
            if exponent.abs() > i64::from(MAX_SCALE) {
                return Err(DecimalError::Overflow);
            }
        }
        if i != bytes.len() {
            return Err(DecimalError::Invalid);
        }

        let scale = frac_len - exponent;
        if scale.abs() > i64::from(MAX_SCALE) {
            return Err(DecimalError::Overflow);
        }
        let scale = i32::try_from(scale).map_err(|_| DecimalError::Overflow)?;
        Ok(Decimal::from_parts(negative, digits, scale))
    }
}

impl fmt::Display for Decimal {
    /// Plain notation, never scientific.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        let digits: String = self.digits.iter().map(|d| char::from(b'0' + d)).collect();
        if digits.is_empty() {
            out.push('0');
            if self.scale > 0 {
                out.push('.');
                out.extend(std::iter::repeat_n('0', self.scale as usize));
            }
        } else if self.scale <= 0 {
            out.push_str(&digits);
            out.extend(std::iter::repeat_n('0', self.scale.unsigned_abs() as usize));
        } else {
            let scale = self.scale as usize;
            if scale < digits.len() {
                let (int, frac) = digits.split_at(digits.len() - scale);
                out.push_str(int);
                out.push('.');
                out.push_str(frac);
            } else {
                out.push_str("0.");
                out.extend(std::iter::repeat_n('0', scale - digits.len()));
                out.push_str(&digits);
            }
        }
        f.pad(&out)
    }
}
