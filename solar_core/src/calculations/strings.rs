//! # String Configuration Planner
//!
//! Splits the array into series strings that stay under the inverter's DC
//! voltage limit, and describes the resulting layout.
//!
//! The safe series length is 19 modules (1000 V inverter input, ~50 V Voc
//! per module). Larger arrays are divided into the fewest strings that
//! respect that limit, which also keeps the strings balanced.
//!
//! ## Example
//!
//! ```rust
//! use solar_core::calculations::strings::{describe_strings, suggest_string_size};
//!
//! assert_eq!(suggest_string_size(12), 12);
//! assert_eq!(suggest_string_size(88), 18); // 5 strings of <= 18
//! assert_eq!(describe_strings(24, 12), "2 Strings de 12 módulos");
//! ```

use crate::catalog::{MAX_STRING_COUNT, SAFE_MAX_STRING_LENGTH};

/// Suggest how many modules to wire per string.
///
/// Arrays that fit in one string are returned whole. Otherwise the string
/// count grows from 2 until `ceil(total / n)` fits; past
/// [`MAX_STRING_COUNT`] strings the search gives up and returns 1.
pub fn suggest_string_size(total_modules: u32) -> u32 {
    if total_modules == 0 {
        return 0;
    }
    if total_modules <= SAFE_MAX_STRING_LENGTH {
        return total_modules;
    }

    let mut string_count = 2;
    loop {
        let per_string = total_modules.div_ceil(string_count);
        if per_string <= SAFE_MAX_STRING_LENGTH {
            return per_string;
        }
        string_count += 1;
        if string_count > MAX_STRING_COUNT {
            tracing::debug!(total_modules, "string search exceeded {MAX_STRING_COUNT} strings");
            return 1;
        }
    }
}

/// Describe the layout of `module_count` modules at `modules_per_string`.
///
/// An even split reads "N Strings de M módulos"; anything else is reported
/// as an approximate, mixed configuration. Without a string size there is
/// nothing to describe and the sentinel "---" is returned.
pub fn describe_strings(module_count: u32, modules_per_string: u32) -> String {
    if modules_per_string == 0 {
        return "---".to_string();
    }

    if module_count % modules_per_string == 0 {
        format!(
            "{} Strings de {} módulos",
            module_count / modules_per_string,
            modules_per_string
        )
    } else {
        format!(
            "~{} Strings (Config. Mista / Sugerido: {}/str)",
            module_count.div_ceil(modules_per_string),
            modules_per_string
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_string_identity() {
        for n in 1..=SAFE_MAX_STRING_LENGTH {
            assert_eq!(suggest_string_size(n), n);
        }
        assert_eq!(suggest_string_size(0), 0);
    }

    #[test]
    fn test_split_respects_limit() {
        for total in 20..=900 {
            let m = suggest_string_size(total);
            assert!(m <= SAFE_MAX_STRING_LENGTH, "total {total} gave {m}");
            assert!(total.div_ceil(m) * m >= total);
        }
    }

    #[test]
    fn test_known_splits() {
        assert_eq!(suggest_string_size(20), 10);
        assert_eq!(suggest_string_size(38), 19);
        assert_eq!(suggest_string_size(39), 13);
        assert_eq!(suggest_string_size(88), 18);
    }

    #[test]
    fn test_search_cap() {
        // 50 strings of 19 = 950 is the largest array the search resolves
        assert_eq!(suggest_string_size(950), 19);
        assert_eq!(suggest_string_size(951), 1);
        assert_eq!(suggest_string_size(5000), 1);
    }

    #[test]
    fn test_describe_even_split() {
        assert_eq!(describe_strings(16, 8), "2 Strings de 8 módulos");
        assert_eq!(describe_strings(8, 8), "1 Strings de 8 módulos");
        assert_eq!(describe_strings(0, 8), "0 Strings de 8 módulos");
    }

    #[test]
    fn test_describe_mixed_split() {
        assert_eq!(
            describe_strings(88, 18),
            "~5 Strings (Config. Mista / Sugerido: 18/str)"
        );
    }

    #[test]
    fn test_describe_without_string_size() {
        assert_eq!(describe_strings(10, 0), "---");
    }
}
