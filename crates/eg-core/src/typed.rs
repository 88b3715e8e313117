//! Typed reads and generated accessor structs.

use eg_common::EnvValue;

/// Conversion from a validated value into a Rust type.
pub trait FromEnvValue: Sized {
    /// Label reported in [`eg_common::EnvError::TypeMismatch`].
    const EXPECTED: &'static str;

    fn from_env_value(value: &EnvValue) -> Option<Self>;
}

impl FromEnvValue for EnvValue {
    const EXPECTED: &'static str = "any";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromEnvValue for String {
    const EXPECTED: &'static str = "string";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromEnvValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromEnvValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_env_value(value: &EnvValue) -> Option<Self> {
        value.as_f64()
    }
}

macro_rules! integer_from_env_value {
    ($($ty:ty),*) => {
        $(
            impl FromEnvValue for $ty {
                const EXPECTED: &'static str = "integer";

                fn from_env_value(value: &EnvValue) -> Option<Self> {
                    value.as_i64().and_then(|n| <$ty>::try_from(n).ok())
                }
            }
        )*
    };
}

integer_from_env_value!(i32, i64, u16, u32, u64, usize);

/// Generate a struct with one policed accessor per declared variable.
///
/// ```ignore
/// typed_env! {
///     pub struct AppEnv {
///         database_url => "DATABASE_URL": String,
///         port => "PORT": u16,
///         api_base => "PUBLIC_API_BASE": String,
///     }
/// }
///
/// let env = AppEnv::new(composed);
/// let port: Option<u16> = env.port()?;
/// ```
///
/// Each accessor calls [`Env::get_as`](crate::Env::get_as), so client-context
/// reads of server-only names go through the invalid-access hook exactly like
/// untyped reads.
#[macro_export]
macro_rules! typed_env {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($field:ident => $key:literal : $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            inner: $crate::Env,
        }

        impl $name {
            /// Names of every declared accessor's variable.
            pub const VARIABLES: &'static [&'static str] = &[$($key),*];

            pub fn new(inner: $crate::Env) -> Self {
                Self { inner }
            }

            pub fn env(&self) -> &$crate::Env {
                &self.inner
            }

            $(
                pub fn $field(&self) -> ::std::result::Result<::std::option::Option<$ty>, $crate::EnvError> {
                    self.inner.get_as::<$ty>($key)
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(u16::from_env_value(&EnvValue::Number(8080.0)), Some(8080));
        assert_eq!(u16::from_env_value(&EnvValue::Number(70000.0)), None);
        assert_eq!(u32::from_env_value(&EnvValue::Number(-1.0)), None);
        assert_eq!(i64::from_env_value(&EnvValue::Number(1.5)), None);
    }

    #[test]
    fn strings_do_not_coerce() {
        assert_eq!(String::from_env_value(&EnvValue::Number(1.0)), None);
        assert_eq!(
            String::from_env_value(&EnvValue::from("x")),
            Some("x".to_string())
        );
        assert_eq!(bool::from_env_value(&EnvValue::from("true")), None);
    }
}
