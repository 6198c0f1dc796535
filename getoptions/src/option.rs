//! A single declared option: identity, metadata, and the typed value it
//! collects from argument tokens.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use crate::cell::{Dest, Shape, Slot, Value};
use crate::convert;
use crate::error::{Error, Result};
use crate::text::Catalog;

// ============================================================================
// Kind
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    String,
    Int,
    Float,
    StringList,
    IntList,
    StringMap,
}

impl Kind {
    /// Argument placeholder shown in the synopsis when no help argument name
    /// was given. Empty for `Bool`, which takes no argument.
    pub fn placeholder(self) -> &'static str {
        match self {
            Kind::Bool => "",
            Kind::String | Kind::StringList => "string",
            Kind::Int | Kind::IntList => "int",
            Kind::Float => "float",
            Kind::StringMap => "key=value",
        }
    }
}

// ============================================================================
// Opt
// ============================================================================

/// One command-line option.
///
/// Configuration methods consume and return the option so a declaration reads
/// as a single chain. Once registered, the parser drives it through
/// [`set_called`](Opt::set_called) and [`save`](Opt::save).
#[derive(Debug, Clone, PartialEq)]
pub struct Opt {
    aliases: Vec<String>,
    kind: Kind,
    slot: Slot,
    called: bool,
    called_as: String,
    required: bool,
    required_msg: String,
    description: String,
    help_arg_name: String,
    default_str: String,
    env_var: String,
    help_synopsis: String,
    min_args: usize,
    max_args: usize,
    map_keys_to_lower: bool,
    valid_values: Vec<String>,
    catalog: Arc<Catalog>,
}

impl Opt {
    pub fn new(name: &str, kind: Kind) -> Self {
        let mut opt = Opt {
            aliases: vec![name.to_string()],
            kind,
            slot: Slot::new(kind),
            called: false,
            called_as: String::new(),
            required: false,
            required_msg: String::new(),
            description: String::new(),
            help_arg_name: String::new(),
            default_str: String::new(),
            env_var: String::new(),
            help_synopsis: String::new(),
            min_args: 1,
            max_args: 1,
            map_keys_to_lower: false,
            valid_values: Vec::new(),
            catalog: Arc::new(Catalog::default()),
        };
        opt.synopsis();
        opt
    }

    // -- destinations --

    pub fn set_bool_ptr(self, dest: &Dest<bool>) -> Self {
        self.bind(dest)
    }

    pub fn set_string_ptr(self, dest: &Dest<String>) -> Self {
        self.bind(dest)
    }

    pub fn set_int_ptr(self, dest: &Dest<i64>) -> Self {
        self.bind(dest)
    }

    pub fn set_float64_ptr(self, dest: &Dest<f64>) -> Self {
        self.bind(dest)
    }

    pub fn set_string_slice_ptr(self, dest: &Dest<Vec<String>>) -> Self {
        self.bind(dest)
    }

    pub fn set_int_slice_ptr(self, dest: &Dest<Vec<i64>>) -> Self {
        self.bind(dest)
    }

    pub fn set_string_map_ptr(self, dest: &Dest<HashMap<String, String>>) -> Self {
        self.bind(dest)
    }

    fn bind<T: Shape>(mut self, dest: &Dest<T>) -> Self {
        if let Some(bound) = T::bound_mut(&mut self.slot) {
            bound.bind(dest);
        } else {
            tracing::warn!(
                option = %self.aliases[0],
                kind = ?self.kind,
                destination = ?T::KIND,
                "destination does not match option kind, ignoring"
            );
        }
        self
    }

    // -- initial values --

    pub fn set_bool(self, value: bool) -> Self {
        self.preload(value)
    }

    pub fn set_string(self, value: &str) -> Self {
        self.preload(value.to_string())
    }

    pub fn set_int(self, value: i64) -> Self {
        self.preload(value)
    }

    pub fn set_float64(self, value: f64) -> Self {
        self.preload(value)
    }

    fn preload<T: Shape>(mut self, value: T) -> Self {
        if let Some(bound) = T::bound_mut(&mut self.slot) {
            bound.preset(value);
        } else {
            tracing::warn!(
                option = %self.aliases[0],
                kind = ?self.kind,
                value = ?T::KIND,
                "initial value does not match option kind, ignoring"
            );
        }
        self
    }

    // -- metadata --

    /// Append alternate names, in order, after the canonical name.
    pub fn set_alias(mut self, names: &[&str]) -> Self {
        self.aliases.extend(names.iter().map(|n| n.to_string()));
        self.synopsis();
        self
    }

    pub fn set_description(mut self, s: &str) -> Self {
        self.description = s.to_string();
        self
    }

    pub fn set_help_arg_name(mut self, s: &str) -> Self {
        self.help_arg_name = s.to_string();
        self.synopsis();
        self
    }

    pub fn set_default_str(mut self, s: &str) -> Self {
        self.default_str = s.to_string();
        self
    }

    pub fn set_env_var(mut self, s: &str) -> Self {
        self.env_var = s.to_string();
        self
    }

    /// Mark the option required. A non-empty `msg` replaces the catalog's
    /// missing-option message verbatim.
    pub fn set_required(mut self, msg: &str) -> Self {
        self.required = true;
        self.required_msg = msg.to_string();
        self
    }

    pub fn set_min_args(mut self, n: usize) -> Self {
        self.min_args = n.max(1);
        self.synopsis();
        self
    }

    pub fn set_max_args(mut self, n: usize) -> Self {
        self.max_args = n.max(1);
        self.synopsis();
        self
    }

    pub fn set_map_keys_to_lower(mut self) -> Self {
        self.map_keys_to_lower = true;
        self
    }

    /// Restrict `String` and `StringList` options to a fixed set of tokens.
    pub fn set_valid_values(mut self, values: &[&str]) -> Self {
        self.valid_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn set_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Record that the parser saw the option under `alias`.
    ///
    /// Unlike the builder setters this works in place: the parser calls it on
    /// an option that is already registered, right before `save`.
    pub fn set_called(&mut self, alias: &str) -> &mut Self {
        self.called = true;
        self.called_as = alias.to_string();
        self
    }

    // -- parsing --

    /// Convert `tokens` according to the option kind and store the result.
    ///
    /// Either every token is accepted and the value is updated once, or the
    /// first bad token is reported and nothing changes.
    pub fn save(&mut self, tokens: &[&str]) -> Result<()> {
        match self.apply(tokens) {
            Ok(()) => {
                self.called = true;
                tracing::trace!(
                    option = %self.aliases[0],
                    called_as = %self.called_as,
                    tokens = tokens.len(),
                    "saved"
                );
                Ok(())
            }
            Err(e) => {
                tracing::debug!(option = %self.aliases[0], error = %e, "save rejected");
                Err(e)
            }
        }
    }

    fn apply(&mut self, tokens: &[&str]) -> Result<()> {
        let first = tokens.first().copied().unwrap_or("");

        match self.kind {
            // The token is irrelevant; --no-x style options preload true.
            Kind::Bool => self.update(|b: bool| !b),
            Kind::String => {
                self.check_valid(&[first])?;
                let s = first.to_string();
                self.update(|_: String| s);
            }
            Kind::Int => {
                let n = convert::to_int(first).ok_or_else(|| self.int_error(first))?;
                self.update(|_: i64| n);
            }
            Kind::Float => {
                let n = convert::to_float(first).ok_or_else(|| self.float_error(first))?;
                self.update(|_: f64| n);
            }
            Kind::StringList => {
                self.check_valid(tokens)?;
                self.update(|mut list: Vec<String>| {
                    list.extend(tokens.iter().map(|t| t.to_string()));
                    list
                });
            }
            Kind::IntList => {
                let mut add = Vec::new();
                for t in tokens {
                    add.extend(convert::to_ints(t).ok_or_else(|| self.int_error(t))?);
                }
                self.update(|mut list: Vec<i64>| {
                    list.extend(add);
                    list
                });
            }
            Kind::StringMap => {
                let mut pairs = Vec::with_capacity(tokens.len());
                for t in tokens {
                    let (k, v) =
                        convert::split_key_value(t).ok_or_else(|| self.key_value_error(t))?;
                    let k = if self.map_keys_to_lower {
                        k.to_lowercase()
                    } else {
                        k.to_string()
                    };
                    pairs.push((k, v.to_string()));
                }
                self.update(|mut map: HashMap<String, String>| {
                    map.extend(pairs);
                    map
                });
            }
        }
        Ok(())
    }

    fn update<T: Shape>(&mut self, f: impl FnOnce(T) -> T) {
        if let Some(bound) = T::bound_mut(&mut self.slot) {
            let next = f(bound.current());
            bound.store(next);
        }
    }

    fn check_valid(&self, tokens: &[&str]) -> Result<()> {
        if self.valid_values.is_empty() {
            return Ok(());
        }
        let bad = tokens
            .iter()
            .find(|t| !self.valid_values.iter().any(|v| v.as_str() == **t));
        match bad {
            Some(bad) => Err(Error::InvalidValue {
                called_as: self.called_as.clone(),
                token: bad.to_string(),
                message: self
                    .catalog
                    .invalid_value(&self.called_as, bad, &self.valid_values),
            }),
            None => Ok(()),
        }
    }

    fn int_error(&self, token: &str) -> Error {
        Error::ConvertToInt {
            called_as: self.called_as.clone(),
            token: token.to_string(),
            message: self.catalog.convert_to_int(&self.called_as, token),
        }
    }

    fn float_error(&self, token: &str) -> Error {
        Error::ConvertToFloat64 {
            called_as: self.called_as.clone(),
            token: token.to_string(),
            message: self.catalog.convert_to_float64(&self.called_as, token),
        }
    }

    fn key_value_error(&self, token: &str) -> Error {
        Error::NotKeyValue {
            token: token.to_string(),
            message: self.catalog.argument_is_not_key_value(token),
        }
    }

    /// Fails if the option is required and was never called.
    pub fn check_required(&self) -> Result<()> {
        if !self.required || self.called {
            return Ok(());
        }
        let message = if self.required_msg.is_empty() {
            self.catalog.missing_required_option(self.name())
        } else {
            self.required_msg.clone()
        };
        Err(Error::MissingRequired {
            name: self.name().to_string(),
            message,
        })
    }

    // -- values --

    /// Snapshot of the last value this option stored.
    pub fn value(&self) -> Value {
        self.slot.value()
    }

    // Typed accessors read the destination when one is bound, so later
    // writes by the caller are visible. A kind mismatch yields the zero value.

    pub fn bool(&self) -> bool {
        self.read()
    }

    pub fn string(&self) -> String {
        self.read()
    }

    pub fn int(&self) -> i64 {
        self.read()
    }

    pub fn float64(&self) -> f64 {
        self.read()
    }

    pub fn string_slice(&self) -> Vec<String> {
        self.read()
    }

    pub fn int_slice(&self) -> Vec<i64> {
        self.read()
    }

    pub fn string_map(&self) -> HashMap<String, String> {
        self.read()
    }

    fn read<T: Shape>(&self) -> T {
        T::bound(&self.slot)
            .map(|bound| bound.current())
            .unwrap_or_default()
    }

    // -- synopsis --

    /// Re-render and return the usage fragment, e.g. `--help|-h <int>...`.
    pub fn synopsis(&mut self) -> &str {
        self.help_synopsis = self.render_synopsis();
        &self.help_synopsis
    }

    fn render_synopsis(&self) -> String {
        let mut out = self
            .aliases
            .iter()
            .map(|a| {
                if a.chars().count() > 1 {
                    format!("--{}", a)
                } else {
                    format!("-{}", a)
                }
            })
            .collect::<Vec<_>>()
            .join("|");

        let arg = if self.help_arg_name.is_empty() {
            self.kind.placeholder()
        } else {
            self.help_arg_name.as_str()
        };

        match self.kind {
            Kind::Bool => {}
            Kind::String | Kind::Int | Kind::Float => {
                let _ = write!(out, " <{}>", arg);
            }
            Kind::StringMap if self.max_args <= 1 => {
                let _ = write!(out, " <{}>", arg);
            }
            Kind::StringList | Kind::IntList | Kind::StringMap => {
                if self.max_args > 1 {
                    for _ in 0..self.min_args {
                        let _ = write!(out, " <{}>", arg);
                    }
                    out.push_str("...");
                } else {
                    let _ = write!(out, " <{}>...", arg);
                }
            }
        }
        out
    }

    // -- accessors --

    pub fn name(&self) -> &str {
        &self.aliases[0]
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn help_arg_name(&self) -> &str {
        &self.help_arg_name
    }

    pub fn default_str(&self) -> &str {
        &self.default_str
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    pub fn help_synopsis(&self) -> &str {
        &self.help_synopsis
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn required_msg(&self) -> &str {
        &self.required_msg
    }

    pub fn called(&self) -> bool {
        self.called
    }

    pub fn called_as(&self) -> &str {
        &self.called_as
    }

    pub fn min_args(&self) -> usize {
        self.min_args
    }

    pub fn max_args(&self) -> usize {
        self.max_args
    }

    pub fn map_keys_to_lower(&self) -> bool {
        self.map_keys_to_lower
    }

    pub fn valid_values(&self) -> &[String] {
        &self.valid_values
    }
}

/// Stable in-place sort by canonical name, for help output.
pub fn sort(options: &mut [Opt]) {
    options.sort_by(|a, b| a.name().cmp(b.name()));
}
