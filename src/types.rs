//! # Type Registry
//!
//! Placeholders in a route template carry a type token (`[i:id]`, `[s:slug]`).
//! The registry maps each token to the regex fragment a captured segment must
//! match and to the decode rule applied to the captured text before it reaches
//! a handler.
//!
//! | token | matches                                  | decode       |
//! |-------|------------------------------------------|--------------|
//! | `i`   | `-1`, `+1.1`, `42`                       | none         |
//! | `a`   | letters, digits and `. _ - @ % =`        | none         |
//! | `s`   | anything except `/`                      | HTML-escaped |
//! | `il`  | `1,22,333` (unsigned integers, no blanks)| none         |
//!
//! Registering a token that already exists replaces it, so built-ins can be
//! customised per router.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{Result, RouterError};

/// Decode rule applied to a captured substring
pub type DecodeFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Integer-or-decimal with an optional sign
pub const INTEGER_FRAGMENT: &str = r"[+-]?[0-9]+(?:\.[0-9]+)?";
/// Alphanumerics plus a fixed punctuation set, no slash
pub const ALPHA_FRAGMENT: &str = r"[a-zA-Z0-9._\-@%=]+";
/// Anything up to the next slash
pub const STRING_FRAGMENT: &str = r"[^/]+";
/// Comma separated unsigned integers
pub const ID_LIST_FRAGMENT: &str = r"[0-9]+(?:,[0-9]+)*";

/// A registered placeholder type
#[derive(Clone)]
pub struct TypeDescriptor {
    /// Token used inside placeholders
    pub token: String,
    /// Regex fragment (without anchors or capture group)
    pub match_fragment: String,
    decode: Option<DecodeFn>,
}

impl TypeDescriptor {
    /// Descriptor that passes captures through unchanged
    #[must_use]
    pub fn new(token: &str, match_fragment: &str) -> Self {
        Self {
            token: token.to_string(),
            match_fragment: match_fragment.to_string(),
            decode: None,
        }
    }

    /// Descriptor with a decode transform
    pub fn with_decode<F>(token: &str, match_fragment: &str, decode: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            token: token.to_string(),
            match_fragment: match_fragment.to_string(),
            decode: Some(Arc::new(decode)),
        }
    }

    /// Apply the decode rule to a captured value
    #[must_use]
    pub fn decode(&self, raw: &str) -> String {
        match &self.decode {
            Some(decode) => decode(raw),
            None => raw.to_string(),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("token", &self.token)
            .field("match_fragment", &self.match_fragment)
            .field("decodes", &self.decode.is_some())
            .finish()
    }
}

/// Escape the characters that are unsafe inside HTML text or attributes
#[must_use]
pub fn html_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Token → descriptor map
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Registry pre-populated with `i`, `a`, `s` and `il`
    #[must_use]
    pub fn new() -> Self {
        let mut types = HashMap::with_capacity(4);
        for descriptor in [
            TypeDescriptor::new("i", INTEGER_FRAGMENT),
            TypeDescriptor::new("a", ALPHA_FRAGMENT),
            TypeDescriptor::with_decode("s", STRING_FRAGMENT, html_escape),
            TypeDescriptor::new("il", ID_LIST_FRAGMENT),
        ] {
            types.insert(descriptor.token.clone(), Arc::new(descriptor));
        }
        Self { types }
    }

    /// Register (or replace) a type.
    ///
    /// The fragment is compiled once here so a broken pattern is reported at
    /// registration rather than when the first route using it is added. It
    /// must also compile on its own: a fragment such as `a)|(b` is valid once
    /// wrapped in a group but would close that group inside a route.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Result<()> {
        let checked = Regex::new(&descriptor.match_fragment)
            .and_then(|_| Regex::new(&format!("^(?:{})$", descriptor.match_fragment)));
        if let Err(e) = checked {
            return Err(RouterError::InvalidTypePattern {
                token: descriptor.token,
                reason: e.to_string(),
            });
        }

        if self.types.contains_key(&descriptor.token) {
            warn!(
                token = %descriptor.token,
                match_fragment = %descriptor.match_fragment,
                "Overriding registered route type"
            );
        } else {
            debug!(
                token = %descriptor.token,
                match_fragment = %descriptor.match_fragment,
                "Route type registered"
            );
        }

        self.types.insert(descriptor.token.clone(), Arc::new(descriptor));
        Ok(())
    }

    /// Look up a token; `template` is only used for the error message
    pub fn resolve(&self, token: &str, template: &str) -> Result<Arc<TypeDescriptor>> {
        self.types
            .get(token)
            .map(Arc::clone)
            .ok_or_else(|| RouterError::UnknownType {
                token: token.to_string(),
                template: template.to_string(),
            })
    }

    /// Whether `token` is registered
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.types.contains_key(token)
    }
}
