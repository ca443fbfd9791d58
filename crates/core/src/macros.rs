// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros shared by the workspace crates.

/// Implement `Display` by mapping enum variants to string literals.
///
/// Data-carrying variants take `(..)`.
///
/// ```ignore
/// crate::simple_display! {
///     EnforcementLevel {
///         Advisory => "advisory",
///         Mandatory => "mandatory",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident $(( $($fields:tt)* ))? => $str:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant $(( $($fields)* ))? => $str, )+
                })
            }
        }
    };
}

/// Test-only builder for a wire record, every field preloaded with a default.
///
/// Each setter takes `impl Into<FieldType>`, so `Option` fields accept the
/// bare value. Gated behind `#[cfg(any(test, feature = "test-support"))]`.
#[macro_export]
macro_rules! record_builder {
    ($builder:ident => $target:ident { $( $field:ident : $ty:ty = $default:expr ),+ $(,)? }) => {
        #[cfg(any(test, feature = "test-support"))]
        pub struct $builder {
            $( $field: $ty, )+
        }

        #[cfg(any(test, feature = "test-support"))]
        impl Default for $builder {
            fn default() -> Self {
                Self { $( $field: $default, )+ }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $builder {
            $(
                pub fn $field(mut self, v: impl Into<$ty>) -> Self {
                    self.$field = v.into();
                    self
                }
            )+

            pub fn build(self) -> $target {
                $target { $( $field: self.$field, )+ }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $target {
            pub fn builder() -> $builder {
                $builder::default()
            }
        }
    };
}

/// Chained setters for the optional fields of a policy definition.
///
/// `field(v)` stores `Some(v.into())`.
#[macro_export]
macro_rules! optional_setters {
    ($( $field:ident : $ty:ty ),+ $(,)?) => {
        $(
            pub fn $field(mut self, v: impl Into<$ty>) -> Self {
                self.$field = Some(v.into());
                self
            }
        )+
    };
}
