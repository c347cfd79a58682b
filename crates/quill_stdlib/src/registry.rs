//! Function registry: the name → native operation table.
//!
//! Each fallible operation is implemented once and registered under two
//! names. The `must`-prefixed name is [`Form::Strict`] and hands errors back
//! unchanged; the base name is [`Form::Convenience`] and wraps every error
//! as [`ErrorKind::Aborted`](quill_foundation::ErrorKind::Aborted), telling
//! the host to stop the evaluation.

use std::collections::HashMap;
use std::fmt;

use quill_foundation::{Arity, Error, ErrorKind, Result, Value};
use tracing::{debug, trace, warn};

use crate::context::Context;
use crate::native::{collection, date, defaults, dict, encoding, json, math, path, pattern, reflect, string};

/// Signature shared by every native function.
pub type NativeFnPtr = fn(&Context, &[Value]) -> Result<Value>;

/// How a registered name reports failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Form {
    /// Errors are returned to the caller unchanged.
    Strict,
    /// Errors abort the enclosing evaluation.
    Convenience,
}

/// A native function bound to a registered name.
#[derive(Clone)]
pub struct NativeFn {
    /// Registered name.
    pub name: &'static str,
    /// Accepted argument counts.
    pub arity: Arity,
    /// Failure reporting form.
    pub form: Form,
    /// Function pointer.
    pub func: NativeFnPtr,
}

impl NativeFn {
    /// Checks arity, runs the function, and applies the failure form.
    ///
    /// # Errors
    ///
    /// Returns the function's error unchanged for strict entries, or wrapped
    /// as an abort for convenience entries.
    pub fn invoke(&self, ctx: &Context, args: &[Value]) -> Result<Value> {
        trace!(function = self.name, args = args.len(), "dispatch");
        let result = if self.arity.accepts(args.len()) {
            (self.func)(ctx, args)
        } else {
            Err(Error::arity_mismatch(self.arity, args.len()))
        };
        result.map_err(|err| self.fail(err))
    }

    fn fail(&self, err: Error) -> Error {
        if matches!(err.kind, ErrorKind::LimitExceeded(_)) {
            warn!(function = self.name, error = %err, "resource ceiling reached");
        }
        match self.form {
            Form::Strict => {
                debug!(function = self.name, error = %err, "strict call failed");
                err
            }
            Form::Convenience => {
                warn!(function = self.name, error = %err, "aborting evaluation");
                err.abort(self.name)
            }
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn({}, {:?}, arity {})", self.name, self.form, self.arity)
    }
}

/// Table of callable functions.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    functions: HashMap<&'static str, NativeFn>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the full standard function set.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.install_dates();
        registry.install_strings();
        registry.install_numbers();
        registry.install_defaults();
        registry.install_reflection();
        registry.install_paths();
        registry.install_encodings();
        registry.install_dicts();
        registry.install_lists();
        registry.install_patterns();
        registry
    }

    /// Registers a function, replacing any previous entry with that name.
    pub fn register(&mut self, name: &'static str, arity: Arity, form: Form, func: NativeFnPtr) {
        self.functions.insert(
            name,
            NativeFn {
                name,
                arity,
                form,
                func,
            },
        );
    }

    /// Looks up a registered function.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NativeFn> {
        self.functions.get(name)
    }

    /// Returns true if a function is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Returns every registered name, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Calls the function registered under `name` with evaluated arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UndefinedFunction`] for an unknown name, otherwise
    /// whatever the function's form produces (see [`NativeFn::invoke`]).
    pub fn call(&self, ctx: &Context, name: &str, args: &[Value]) -> Result<Value> {
        let Some(native) = self.functions.get(name) else {
            debug!(function = name, "undefined function");
            return Err(Error::undefined_function(name));
        };
        native.invoke(ctx, args)
    }

    fn convenience(&mut self, name: &'static str, arity: Arity, func: NativeFnPtr) {
        self.register(name, arity, Form::Convenience, func);
    }

    fn strict(&mut self, name: &'static str, arity: Arity, func: NativeFnPtr) {
        self.register(name, arity, Form::Strict, func);
    }

    /// Registers one core under a convenience name and a strict name.
    fn dual(&mut self, name: &'static str, must: &'static str, arity: Arity, func: NativeFnPtr) {
        self.convenience(name, arity, func);
        self.strict(must, arity, func);
    }

    // ========================================================================
    // Standard tables
    // ========================================================================

    fn install_dates(&mut self) {
        use Arity::Exact;
        self.convenience("ago", Exact(1), date::native_date_ago);
        self.convenience("dateAgo", Exact(1), date::native_date_ago);
        self.convenience("date", Exact(2), date::native_date);
        self.convenience("dateInZone", Exact(3), date::native_date_in_zone);
        self.convenience("dateModify", Exact(2), date::native_date_modify);
        self.strict("mustDateModify", Exact(2), date::native_must_date_modify);
        self.convenience("duration", Exact(1), date::native_duration);
        self.convenience("durationRound", Exact(1), date::native_duration_round);
        self.convenience("htmlDate", Exact(1), date::native_html_date);
        self.convenience("htmlDateInZone", Exact(2), date::native_html_date_in_zone);
        self.convenience("toDate", Exact(2), date::native_to_date);
        self.strict("mustToDate", Exact(2), date::native_must_to_date);
        self.convenience("now", Exact(0), date::native_now);
        self.convenience("unixEpoch", Exact(1), date::native_unix_epoch);
    }

    fn install_strings(&mut self) {
        use Arity::{Exact, Variadic};
        self.convenience("trunc", Exact(2), string::native_trunc);
        self.convenience("trim", Exact(1), string::native_trim);
        self.convenience("upper", Exact(1), string::native_upper);
        self.convenience("lower", Exact(1), string::native_lower);
        self.convenience("title", Exact(1), string::native_title);
        self.convenience("substr", Exact(3), string::native_substr);
        self.convenience("repeat", Exact(2), string::native_repeat);
        self.convenience("trimAll", Exact(2), string::native_trim_all);
        self.convenience("trimPrefix", Exact(2), string::native_trim_prefix);
        self.convenience("trimSuffix", Exact(2), string::native_trim_suffix);
        self.convenience("contains", Exact(2), string::native_contains);
        self.convenience("hasPrefix", Exact(2), string::native_has_prefix);
        self.convenience("hasSuffix", Exact(2), string::native_has_suffix);
        self.convenience("quote", Variadic(0), string::native_quote);
        self.convenience("squote", Variadic(0), string::native_squote);
        self.convenience("cat", Variadic(0), string::native_cat);
        self.convenience("indent", Exact(2), string::native_indent);
        self.convenience("nindent", Exact(2), string::native_nindent);
        self.convenience("replace", Exact(3), string::native_replace);
        self.convenience("plural", Exact(3), string::native_plural);
        self.convenience("toString", Exact(1), string::native_to_string);
        self.convenience("join", Exact(2), string::native_join);
        self.convenience("split", Exact(2), string::native_split);
        self.convenience("splitList", Exact(2), string::native_split_list);
        self.convenience("splitn", Exact(3), string::native_splitn);
        self.convenience("toStrings", Exact(1), string::native_to_strings);
        self.convenience("sortAlpha", Exact(1), collection::native_sort_alpha);
    }

    fn install_numbers(&mut self) {
        use Arity::{Exact, Range, Variadic};
        self.convenience("add1", Exact(1), math::native_add1);
        self.convenience("add", Variadic(0), math::native_add);
        self.convenience("sub", Exact(2), math::native_sub);
        self.convenience("div", Exact(2), math::native_div);
        self.convenience("mod", Exact(2), math::native_mod);
        self.convenience("mul", Variadic(1), math::native_mul);
        self.convenience("randInt", Exact(2), math::native_rand_int);
        self.convenience("biggest", Variadic(1), math::native_max);
        self.convenience("max", Variadic(1), math::native_max);
        self.convenience("min", Variadic(1), math::native_min);
        self.convenience("maxf", Variadic(1), math::native_maxf);
        self.convenience("minf", Variadic(1), math::native_minf);
        self.convenience("ceil", Exact(1), math::native_ceil);
        self.convenience("floor", Exact(1), math::native_floor);
        self.convenience("round", Range(2, 3), math::native_round);
        self.convenience("atoi", Exact(1), math::native_atoi);
        self.convenience("int", Exact(1), math::native_int64);
        self.convenience("int64", Exact(1), math::native_int64);
        self.convenience("float64", Exact(1), math::native_float64);
        self.convenience("toDecimal", Exact(1), math::native_to_decimal);
        self.convenience("seq", Variadic(0), math::native_seq);
        self.convenience("until", Exact(1), math::native_until);
        self.convenience("untilStep", Exact(3), math::native_until_step);
    }

    fn install_defaults(&mut self) {
        use Arity::{Exact, Variadic};
        self.convenience("default", Variadic(1), defaults::native_default);
        self.convenience("empty", Exact(1), defaults::native_empty);
        self.convenience("coalesce", Variadic(0), defaults::native_coalesce);
        self.convenience("all", Variadic(0), defaults::native_all);
        self.convenience("any", Variadic(0), defaults::native_any);
        self.dual("compact", "mustCompact", Exact(1), collection::native_compact);
        self.convenience("ternary", Exact(3), defaults::native_ternary);
        self.strict("fail", Exact(1), defaults::native_fail);

        self.convenience("fromJSON", Exact(1), json::native_from_json);
        self.strict("mustFromJSON", Exact(1), json::native_must_from_json);
        self.convenience("toJSON", Exact(1), json::native_to_json);
        self.strict("mustToJSON", Exact(1), json::native_must_to_json);
        self.convenience("toPrettyJSON", Exact(1), json::native_to_pretty_json);
        self.strict("mustToPrettyJSON", Exact(1), json::native_must_to_pretty_json);
        self.dual("toRawJSON", "mustToRawJSON", Exact(1), json::native_to_raw_json);
    }

    fn install_reflection(&mut self) {
        use Arity::Exact;
        self.convenience("typeOf", Exact(1), reflect::native_type_of);
        self.convenience("typeIs", Exact(2), reflect::native_type_is);
        self.convenience("typeIsLike", Exact(2), reflect::native_type_is_like);
        self.convenience("kindOf", Exact(1), reflect::native_kind_of);
        self.convenience("kindIs", Exact(2), reflect::native_kind_is);
        self.convenience("deepEqual", Exact(2), reflect::native_deep_equal);
    }

    fn install_paths(&mut self) {
        use Arity::Exact;
        self.convenience("base", Exact(1), path::native_base);
        self.convenience("dir", Exact(1), path::native_dir);
        self.convenience("clean", Exact(1), path::native_clean);
        self.convenience("ext", Exact(1), path::native_ext);
        self.convenience("isAbs", Exact(1), path::native_is_abs);
        self.convenience("osBase", Exact(1), path::native_os_base);
        self.convenience("osClean", Exact(1), path::native_os_clean);
        self.convenience("osDir", Exact(1), path::native_os_dir);
        self.convenience("osExt", Exact(1), path::native_os_ext);
        self.convenience("osIsAbs", Exact(1), path::native_os_is_abs);
    }

    fn install_encodings(&mut self) {
        use Arity::Exact;
        self.convenience("b64enc", Exact(1), encoding::native_b64enc);
        self.convenience("b64dec", Exact(1), encoding::native_b64dec);
        self.convenience("b32enc", Exact(1), encoding::native_b32enc);
        self.convenience("b32dec", Exact(1), encoding::native_b32dec);
        self.convenience("sha1sum", Exact(1), encoding::native_sha1sum);
        self.convenience("sha256sum", Exact(1), encoding::native_sha256sum);
        self.convenience("sha512sum", Exact(1), encoding::native_sha512sum);
        self.convenience("adler32sum", Exact(1), encoding::native_adler32sum);
    }

    fn install_dicts(&mut self) {
        use Arity::{Exact, Variadic};
        self.convenience("dict", Variadic(0), dict::native_dict);
        self.convenience("get", Exact(2), dict::native_get);
        self.convenience("set", Exact(3), dict::native_set);
        self.convenience("unset", Exact(2), dict::native_unset);
        self.convenience("hasKey", Exact(2), dict::native_has_key);
        self.convenience("pluck", Variadic(1), dict::native_pluck);
        self.convenience("keys", Variadic(0), dict::native_keys);
        self.convenience("pick", Variadic(1), dict::native_pick);
        self.convenience("omit", Variadic(1), dict::native_omit);
        self.convenience("values", Exact(1), dict::native_values);
        self.convenience("dig", Variadic(3), dict::native_dig);
    }

    fn install_lists(&mut self) {
        use Arity::{Exact, Range, Variadic};
        self.convenience("list", Variadic(0), collection::native_list);
        self.convenience("tuple", Variadic(0), collection::native_list);
        self.dual("append", "mustAppend", Exact(2), collection::native_push);
        self.dual("push", "mustPush", Exact(2), collection::native_push);
        self.dual("prepend", "mustPrepend", Exact(2), collection::native_prepend);
        self.dual("first", "mustFirst", Exact(1), collection::native_first);
        self.dual("rest", "mustRest", Exact(1), collection::native_rest);
        self.dual("last", "mustLast", Exact(1), collection::native_last);
        self.dual("initial", "mustInitial", Exact(1), collection::native_initial);
        self.dual("reverse", "mustReverse", Exact(1), collection::native_reverse);
        self.dual("uniq", "mustUniq", Exact(1), collection::native_uniq);
        self.dual("without", "mustWithout", Variadic(1), collection::native_without);
        self.dual("has", "mustHas", Exact(2), collection::native_has);
        self.dual("slice", "mustSlice", Range(1, 3), collection::native_slice);
        self.convenience("concat", Variadic(0), collection::native_concat);
        self.dual("chunk", "mustChunk", Exact(2), collection::native_chunk);
    }

    fn install_patterns(&mut self) {
        use Arity::Exact;
        self.convenience("regexMatch", Exact(2), pattern::native_regex_match);
        self.strict("mustRegexMatch", Exact(2), pattern::native_must_regex_match);
        self.dual("regexFindAll", "mustRegexFindAll", Exact(3), pattern::native_regex_find_all);
        self.dual("regexFind", "mustRegexFind", Exact(2), pattern::native_regex_find);
        self.dual(
            "regexReplaceAll",
            "mustRegexReplaceAll",
            Exact(3),
            pattern::native_regex_replace_all,
        );
        self.dual(
            "regexReplaceAllLiteral",
            "mustRegexReplaceAllLiteral",
            Exact(3),
            pattern::native_regex_replace_all_literal,
        );
        self.dual("regexSplit", "mustRegexSplit", Exact(3), pattern::native_regex_split);
        self.convenience("regexQuoteMeta", Exact(1), pattern::native_regex_quote_meta);
    }
}
