//! Route template compilation.
//!
//! A template such as `/catalog/[i:id]/items/[s:slug]/` is split into literal
//! text and `[type:name]` placeholders. Templates without placeholders stay as
//! plain strings and are matched by equality; everything else becomes an
//! anchored regex with one named group per placeholder.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{Result, RouterError};
use crate::params::{ParamVec, Params};
use crate::types::{TypeDescriptor, TypeRegistry};

/// Parameter names are identifiers
static PARAM_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
        .expect("parameter name regex should be valid")
});

/// Wrap a route or request path in single slashes.
///
/// Surrounding slashes are trimmed first, so `catalog`, `/catalog` and
/// `//catalog//` all become `/catalog/`. An empty remainder is the root `/`.
#[must_use]
pub fn normalize_route(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    let mut out = String::with_capacity(trimmed.len() + 2);
    out.push('/');
    out.push_str(trimmed);
    out.push('/');
    out
}

/// One placeholder of a dynamic route
#[derive(Debug, Clone)]
pub struct ParamSlot {
    /// Parameter name exposed to handlers
    pub name: Arc<str>,
    /// Regex group holding the capture
    group: String,
    /// Type used for matching and decoding
    pub kind: Arc<TypeDescriptor>,
}

/// Anchored pattern plus ordered parameter slots
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    regex: Regex,
    slots: Vec<ParamSlot>,
}

impl RouteMatcher {
    /// The compiled regex source (anchored)
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Parameter names, left to right
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.name.as_ref())
    }

    /// Match a normalized path; on success every capture is decoded by its type
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;
        let mut params = ParamVec::new();
        for slot in &self.slots {
            let raw = caps.name(&slot.group).map_or("", |m| m.as_str());
            params.push((Arc::clone(&slot.name), slot.kind.decode(raw)));
        }
        Some(Params::from_vec(params))
    }
}

/// Static literal or compiled matcher
#[derive(Debug, Clone)]
pub enum RouteKind {
    /// No placeholders; matched by string equality
    Static,
    /// At least one placeholder
    Dynamic(RouteMatcher),
}

/// A compiled template, immutable after construction
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    /// Normalized template text; for static routes this is also the lookup key
    pub template: String,
    /// How the route is matched
    pub kind: RouteKind,
}

impl CompiledRoute {
    /// True when the template has no placeholders
    #[must_use]
    pub fn is_static(&self) -> bool {
        matches!(self.kind, RouteKind::Static)
    }

    /// Literal for static routes
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self.kind {
            RouteKind::Static => Some(&self.template),
            RouteKind::Dynamic(_) => None,
        }
    }

    /// Matcher for dynamic routes
    #[must_use]
    pub fn matcher(&self) -> Option<&RouteMatcher> {
        match &self.kind {
            RouteKind::Static => None,
            RouteKind::Dynamic(m) => Some(m),
        }
    }
}

/// Compiles templates against a [`TypeRegistry`]
#[derive(Debug, Clone, Copy)]
pub struct PatternCompiler<'a> {
    types: &'a TypeRegistry,
}

impl<'a> PatternCompiler<'a> {
    /// Compiler resolving tokens against `types`
    #[must_use]
    pub fn new(types: &'a TypeRegistry) -> Self {
        Self { types }
    }

    /// Compile a raw template.
    ///
    /// # Errors
    ///
    /// `UnknownType`, `DuplicateParamName` or `MalformedPlaceholder`.
    /// Fragments are checked on registration and each one is wrapped in its
    /// own non-capturing group, so a fragment cannot unanchor the route; a
    /// regex failure here is still reported as `InvalidTypePattern`.
    pub fn compile(&self, raw: &str) -> Result<CompiledRoute> {
        let template = normalize_route(raw);

        if !template.contains('[') {
            return Ok(CompiledRoute {
                template,
                kind: RouteKind::Static,
            });
        }

        let mut pattern = String::with_capacity(template.len() * 2);
        pattern.push('^');
        let mut slots: Vec<ParamSlot> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut rest = template.as_str();

        while let Some(open) = rest.find('[') {
            pattern.push_str(&regex::escape(&rest[..open]));
            let after = &rest[open + 1..];
            let close = after
                .find(']')
                .ok_or_else(|| malformed(&template, "unterminated '['"))?;
            let body = &after[..close];
            if body.contains('[') || body.contains('/') {
                return Err(malformed(
                    &template,
                    &format!("'[{body}]' is not a single placeholder"),
                ));
            }

            let (token, name) = body
                .split_once(':')
                .ok_or_else(|| malformed(&template, &format!("'[{body}]' has no ':'")))?;
            if token.is_empty() {
                return Err(malformed(&template, &format!("'[{body}]' has no type")));
            }
            if !PARAM_NAME_REGEX.is_match(name) {
                return Err(malformed(
                    &template,
                    &format!("'{name}' is not a valid parameter name"),
                ));
            }
            if !seen.insert(name) {
                return Err(RouterError::DuplicateParamName {
                    name: name.to_string(),
                    template: template.clone(),
                });
            }

            let kind = self.types.resolve(token, &template)?;
            let group = format!("pmx_{}", slots.len());
            pattern.push_str("(?P<");
            pattern.push_str(&group);
            pattern.push_str(">(?:");
            pattern.push_str(&kind.match_fragment);
            pattern.push_str("))");

            slots.push(ParamSlot {
                name: Arc::from(name),
                group,
                kind,
            });
            rest = &after[close + 1..];
        }
        pattern.push_str(&regex::escape(rest));
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|e| RouterError::InvalidTypePattern {
            token: slots
                .iter()
                .map(|s| s.kind.token.as_str())
                .collect::<Vec<_>>()
                .join(","),
            reason: e.to_string(),
        })?;

        Ok(CompiledRoute {
            template,
            kind: RouteKind::Dynamic(RouteMatcher { regex, slots }),
        })
    }
}

fn malformed(template: &str, reason: &str) -> RouterError {
    RouterError::MalformedPlaceholder {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}
