//! Presentation helpers for monetary amounts

use crate::constants::MAN_YEN_DIVISOR;

/// Convert whole currency units to man-yen (units of 10,000), rounding half
/// away from zero.
///
/// ```
/// use resplan_domain::utils::money::to_man_yen;
///
/// assert_eq!(to_man_yen(28_000_000), 2_800);
/// assert_eq!(to_man_yen(15_000), 2);
/// assert_eq!(to_man_yen(14_999), 1);
/// ```
#[must_use]
pub const fn to_man_yen(amount: u64) -> u64 {
    amount / MAN_YEN_DIVISOR + if amount % MAN_YEN_DIVISOR >= MAN_YEN_DIVISOR / 2 { 1 } else { 0 }
}

/// Render an amount as man-yen with thousands separators, e.g. `2,800万円`.
#[must_use]
pub fn format_man_yen(amount: u64) -> String {
    format!("{}万円", group_thousands(to_man_yen(amount)))
}

/// Decimal digits with a comma every three places, e.g. `40,000,000`.
#[must_use]
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
