//! User-facing message templates.
//!
//! Templates are printf-style strings with positional `%s` placeholders. The
//! order of the substitutions is fixed per template; the wording is not, so
//! consumers can swap in a translated [`Catalog`].

/// Takes the option name.
pub const ERROR_MISSING_REQUIRED_OPTION: &str = "Missing required parameter '%s'";

/// Takes the alias the option was called as, then the raw token.
pub const ERROR_CONVERT_TO_INT: &str =
    "Argument error for option '%s': Can't convert string to int: '%s'";

/// Takes the alias the option was called as, then the raw token.
pub const ERROR_CONVERT_TO_FLOAT64: &str =
    "Argument error for option '%s': Can't convert string to float64: '%s'";

/// Takes the raw token.
pub const ERROR_ARGUMENT_IS_NOT_KEY_VALUE: &str =
    "Argument error: '%s' should be in the form 'key=value'";

/// Takes the alias, the raw token and the comma separated list of valid values.
pub const ERROR_INVALID_VALUE: &str =
    "Argument error for option '%s': Invalid argument '%s', valid values are: %s";

/// The set of templates an option renders its errors with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub missing_required_option: String,
    pub convert_to_int: String,
    pub convert_to_float64: String,
    pub argument_is_not_key_value: String,
    pub invalid_value: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            missing_required_option: ERROR_MISSING_REQUIRED_OPTION.to_string(),
            convert_to_int: ERROR_CONVERT_TO_INT.to_string(),
            convert_to_float64: ERROR_CONVERT_TO_FLOAT64.to_string(),
            argument_is_not_key_value: ERROR_ARGUMENT_IS_NOT_KEY_VALUE.to_string(),
            invalid_value: ERROR_INVALID_VALUE.to_string(),
        }
    }
}

impl Catalog {
    pub fn missing_required_option(&self, name: &str) -> String {
        format(&self.missing_required_option, &[name])
    }

    pub fn convert_to_int(&self, called_as: &str, token: &str) -> String {
        format(&self.convert_to_int, &[called_as, token])
    }

    pub fn convert_to_float64(&self, called_as: &str, token: &str) -> String {
        format(&self.convert_to_float64, &[called_as, token])
    }

    pub fn argument_is_not_key_value(&self, token: &str) -> String {
        format(&self.argument_is_not_key_value, &[token])
    }

    pub fn invalid_value(&self, called_as: &str, token: &str, valid: &[String]) -> String {
        format(&self.invalid_value, &[called_as, token, &valid.join(", ")])
    }
}

/// Substitute `args` into `template` in order.
///
/// `%s` and `%v` consume the next argument (empty once exhausted), `%%` is a
/// literal percent sign, and any other `%` sequence is copied through.
pub fn format(template: &str, args: &[&str]) -> String {
    let extra: usize = args.iter().map(|a| a.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') | Some('v') => {
                chars.next();
                if let Some(a) = args.next() {
                    out.push_str(a);
                }
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }
    out
}
