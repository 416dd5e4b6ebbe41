//! Utility macros for the checker.
//!
//! - `MK_ERROR!` - Creates an `Error` that the enclosing item will locate
//!
//! The checking and decoding code builds a lot of errors; this keeps each
//! construction site to the variant and its fields.

/// Creates an `Error` with an `ErrorImpl` variant and `Location::Unknown`.
///
/// The struct or function being checked attaches its own location with
/// `Error::locate` once the error propagates out of it.
///
/// # Example
///
/// ```ignore
/// return Err(MK_ERROR!(UnboundIdentifier { name: name.clone() }));
/// return Err(MK_ERROR!(BreakOutsideLoop));
/// ```
#[macro_export]
macro_rules! MK_ERROR {
    ($variant:ident { $($field:ident : $value:expr),* $(,)? }) => {
        $crate::errors::errors::Error::new(
            $crate::errors::errors::ErrorImpl::$variant { $($field: $value),* },
            $crate::Location::Unknown,
        )
    };
    ($variant:ident) => {
        $crate::errors::errors::Error::new(
            $crate::errors::errors::ErrorImpl::$variant,
            $crate::Location::Unknown,
        )
    };
}
