//! Domain-specific assertion macros for logframe harnesses.
//!
//! These add context-rich failure messages that make it clear which role of
//! the normalized view was resolved wrongly.

use logframe_core::{Column, Frame};

// ---------------------------------------------------------------------------
// Role assertions
// ---------------------------------------------------------------------------

/// Assert that a view role resolved to the frame column with the given name.
/// Checks identity, not just equal contents.
///
/// ```rust
/// assert_role!(view.time_field, &frame, "ts");
/// assert_role!(view.id_field, &frame, "id");
/// ```
#[macro_export]
macro_rules! assert_role {
    ($role:expr, $frame:expr, $name:expr) => {{
        let frame: &logframe_core::Frame = $frame;
        let name: &str = $name;
        let actual: Option<&logframe_core::Column> = $role.into();
        match actual {
            Some(column) => $crate::common::assert_same_column(frame, column, name),
            None => panic!(
                "assert_role! failed: {} is unset, expected column {:?}",
                stringify!($role),
                name
            ),
        }
    }};
}

/// Assert that an optional view role is unset.
#[macro_export]
macro_rules! assert_role_absent {
    ($role:expr) => {{
        let actual: Option<&logframe_core::Column> = $role;
        if let Some(column) = actual {
            panic!(
                "assert_role_absent! failed: {} resolved to column {:?}",
                stringify!($role),
                column.name
            );
        }
    }};
}

/// Panic unless `column` is the very column named `name` inside `frame`.
pub fn assert_same_column(frame: &Frame, column: &Column, name: &str) {
    let expected = frame
        .column(name)
        .unwrap_or_else(|| panic!("fixture has no column {name:?}"));
    assert!(
        std::ptr::eq(expected, column),
        "expected column {:?}, got {:?}",
        name,
        column.name
    );
}
