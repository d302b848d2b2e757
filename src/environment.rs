//! CI detection.

use std::env;
use std::ffi::OsStr;

/// Variable set by practically every CI provider.
pub const CI_VAR: &str = "CI";

/// Whether the process runs under continuous integration.
#[allow(clippy::disallowed_methods)] // CLI tool needs direct env access
pub fn is_ci() -> bool {
    is_ci_value(env::var_os(CI_VAR).as_deref())
}

/// Any non-empty value counts, including `false` and values that are not
/// valid UTF-8: providers disagree on the value but all of them set the
/// variable. A value made only of whitespace does not count.
pub fn is_ci_value(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| match v.to_str() {
        Some(text) => !text.trim().is_empty(),
        None => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ci_value() {
        let ci = |v: &str| is_ci_value(Some(OsStr::new(v)));
        assert!(ci("true"));
        assert!(ci("1"));
        assert!(ci("false"));
        assert!(!ci(""));
        assert!(!ci("  "));
        assert!(!is_ci_value(None));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_value_counts_as_ci() {
        use std::os::unix::ffi::OsStrExt;

        assert!(is_ci_value(Some(OsStr::from_bytes(b"\xff"))));
    }

    #[test]
    #[serial_test::serial]
    fn test_is_ci_reads_environment() {
        let saved = env::var_os(CI_VAR);

        unsafe {
            env::set_var(CI_VAR, "true");
        }
        assert!(is_ci());

        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;

            unsafe {
                env::set_var(CI_VAR, OsStr::from_bytes(b"\xfe\xff"));
            }
            assert!(is_ci());
        }

        unsafe {
            env::remove_var(CI_VAR);
        }
        assert!(!is_ci());

        if let Some(value) = saved {
            unsafe {
                env::set_var(CI_VAR, value);
            }
        }
    }
}
