//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Statuses, calculation modes, bands and allocation kinds all travel as
//! short snake_case strings (`"on_hold"`, `"pre_sales"`). This macro keeps
//! the string table for `Display` and `FromStr` in one place so the two can
//! never drift apart.
//!
//! # Example
//!
//! ```rust
//! use resplan_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ReviewState {
//!     Draft,
//!     Submitted,
//!     Approved,
//! }
//!
//! impl_domain_status_conversions!(ReviewState {
//!     Draft => "draft",
//!     Submitted => "submitted",
//!     Approved => "approved",
//! });
//!
//! assert_eq!(ReviewState::Submitted.to_string(), "submitted");
//! assert_eq!("APPROVED".parse::<ReviewState>().unwrap(), ReviewState::Approved);
//! ```

/// Implements Display and FromStr traits for wire-level enums
///
/// This macro generates:
/// - Display trait: writes the canonical lowercase string
/// - FromStr trait: parses case-insensitively, failing with
///   [`ResplanError::InvalidInput`](crate::ResplanError::InvalidInput)
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical wire string for this variant.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::ResplanError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err($crate::ResplanError::InvalidInput(format!(
                        "Invalid {}: {}",
                        stringify!($enum_name),
                        s
                    ))),
                }
            }
        }
    };
}
