//! Segment routes: patterns with named parameters and optional groups.
//!
//! # Pattern syntax
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `literal` | text matched and emitted verbatim |
//! | `:name` | a parameter; the name ends at `:`, `/`, `{`, `[` or `]` |
//! | `:name:` | same, with an explicit terminator (`:id:.html`) |
//! | `:name{-.}` | a parameter whose value may not contain `-` or `.` |
//! | `[...]` | an optional group, may nest |
//!
//! `/:controller[/:action]` matches `/ctrl` and `/ctrl/act`, and assembles
//! `/ctrl/act` from `{controller: ctrl, action: act}`.
//!
//! # Matching
//!
//! The pattern is compiled to a regex once, at construction. Parameters
//! without constraint match `[^/]+`, parameters with delimiters match any run
//! of characters outside the delimiters, and constrained parameters match
//! their constraint. Captured values are percent-decoded and laid over the
//! route defaults; empty captures are skipped.
//!
//! # Assembly
//!
//! Required parameters must be present (explicitly or as a default). An
//! optional group is dropped when it contains a parameter without value, or
//! when all of its parameters only repeat their defaults, unless a child
//! route is being assembled after this one.

use crate::error::RouterError;
use crate::params::{decode_uri_component, encode_path_segment, RouteParams};
use crate::route::{subject, AssembleContext, Assembled, Route};
use crate::route_match::RouteMatch;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternPart {
    Literal(String),
    Parameter {
        name: String,
        delimiters: Option<String>,
    },
    Optional(Vec<PatternPart>),
}

/// A route described by a segment pattern such as `/:controller[/:action]`.
///
/// # Example
///
/// ```
/// use mvc_router::{AssembleContext, Route, RouteParams, Segment};
///
/// let route = Segment::new("/:controller[/:action]").unwrap();
///
/// let matched = route.match_at("/ctrl/act", None).unwrap();
/// assert_eq!(matched.param("action"), Some("act"));
///
/// let params = RouteParams::from([("controller", "ctrl")]);
/// let assembled = route.assemble(&params, &AssembleContext::default()).unwrap();
/// assert_eq!(assembled.path, "/ctrl");
/// ```
#[derive(Debug, Clone)]
pub struct Segment {
    pattern: String,
    parts: Vec<PatternPart>,
    defaults: RouteParams,
    /// `(group name, parameter name)` for every capture group.
    param_map: Vec<(String, String)>,
    prefix_regex: Regex,
    full_regex: Regex,
}

impl Segment {
    /// Compile a pattern without parameter constraints.
    pub fn new(pattern: &str) -> Result<Self, RouterError> {
        Self::with_constraints(pattern, RouteParams::new())
    }

    /// Compile a pattern, restricting parameters to the given regexes.
    ///
    /// ```
    /// use mvc_router::{Route, Segment};
    ///
    /// let route = Segment::with_constraints("/user/:id", [("id", "[0-9]+")]).unwrap();
    /// assert!(route.match_at("/user/42", None).is_some());
    /// assert!(route.match_at("/user/bob", None).is_none());
    /// ```
    pub fn with_constraints(
        pattern: &str,
        constraints: impl Into<RouteParams>,
    ) -> Result<Self, RouterError> {
        let constraints = constraints.into();
        let parts = parse_pattern(pattern)?;

        let mut param_map = Vec::new();
        let body = build_regex(&parts, &constraints, &mut param_map);

        let compile = |source: String| {
            Regex::new(&source).map_err(|err| RouterError::invalid_pattern(pattern, err.to_string()))
        };
        let prefix_regex = compile(format!("^(?:{})", body))?;
        let full_regex = compile(format!("^(?:{})$", body))?;

        Ok(Self {
            pattern: pattern.to_string(),
            parts,
            defaults: RouteParams::new(),
            param_map,
            prefix_regex,
            full_regex,
        })
    }

    /// Parameters merged under matched and assembled parameters.
    pub fn defaults(mut self, defaults: impl Into<RouteParams>) -> Self {
        self.defaults = defaults.into();
        self
    }

    /// The pattern this route was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn build_path(
        &self,
        parts: &[PatternPart],
        merged: &RouteParams,
        is_optional: bool,
        has_child: bool,
        assembled: &mut Vec<String>,
    ) -> Result<String, RouterError> {
        let mut path = String::new();
        let mut skip = true;
        let mut skippable = false;

        for part in parts {
            match part {
                PatternPart::Literal(literal) => path.push_str(literal),
                PatternPart::Parameter { name, .. } => {
                    skippable = true;
                    let Some(value) = merged.get(name) else {
                        if !is_optional || has_child {
                            return Err(RouterError::MissingParameter { name: name.clone() });
                        }
                        return Ok(String::new());
                    };

                    if !is_optional || has_child || self.defaults.get(name) != Some(value) {
                        skip = false;
                    }
                    path.push_str(&encode_path_segment(value));
                    assembled.push(name.clone());
                }
                PatternPart::Optional(inner) => {
                    skippable = true;
                    let optional = self.build_path(inner, merged, true, has_child, assembled)?;
                    if !optional.is_empty() {
                        path.push_str(&optional);
                        skip = false;
                    }
                }
            }
        }

        if is_optional && skippable && skip {
            return Ok(String::new());
        }

        Ok(path)
    }
}

impl Route for Segment {
    fn match_at(&self, path: &str, offset: Option<usize>) -> Option<RouteMatch> {
        let subject = subject(path, offset)?;
        let regex = match offset {
            Some(_) => &self.prefix_regex,
            None => &self.full_regex,
        };

        let captures = regex.captures(subject)?;
        let length = captures.get(0).map_or(0, |m| m.end());

        let mut params = self.defaults.clone();
        for (group, name) in &self.param_map {
            if let Some(value) = captures.name(group) {
                if !value.as_str().is_empty() {
                    params.insert(name.clone(), decode_uri_component(value.as_str()));
                }
            }
        }

        Some(RouteMatch::new(params).with_length(length))
    }

    fn assemble(
        &self,
        params: &RouteParams,
        context: &AssembleContext<'_>,
    ) -> Result<Assembled, RouterError> {
        let merged = RouteParams::merge(&self.defaults, params);
        let mut assembled_params = Vec::new();
        let path = self.build_path(
            &self.parts,
            &merged,
            false,
            context.has_child(),
            &mut assembled_params,
        )?;

        Ok(Assembled {
            path,
            assembled_params,
        })
    }
}

fn parse_pattern(pattern: &str) -> Result<Vec<PatternPart>, RouterError> {
    let error = |message: &str| RouterError::invalid_pattern(pattern, message);

    let mut levels: Vec<Vec<PatternPart>> = vec![Vec::new()];
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' => {
                flush_literal(&mut literal, &mut levels);

                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if matches!(next, ':' | '/' | '{' | '[' | ']') {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                if name.is_empty() {
                    return Err(error("Found empty parameter name"));
                }

                let mut delimiters = None;
                if chars.peek() == Some(&'{') {
                    chars.next();
                    let mut set = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(d) => set.push(d),
                            None => return Err(error("Found unterminated parameter delimiters")),
                        }
                    }
                    if set.is_empty() {
                        return Err(error("Found empty parameter delimiters"));
                    }
                    delimiters = Some(set);
                }
                if chars.peek() == Some(&':') {
                    chars.next();
                }

                push_part(&mut levels, PatternPart::Parameter { name, delimiters });
            }
            '[' => {
                flush_literal(&mut literal, &mut levels);
                levels.push(Vec::new());
            }
            ']' => {
                flush_literal(&mut literal, &mut levels);
                if levels.len() == 1 {
                    return Err(error(
                        "Found closing bracket without matching opening bracket",
                    ));
                }
                if let Some(group) = levels.pop() {
                    push_part(&mut levels, PatternPart::Optional(group));
                }
            }
            '{' => return Err(error("Translated literals are not supported")),
            _ => literal.push(c),
        }
    }

    flush_literal(&mut literal, &mut levels);
    if levels.len() > 1 {
        return Err(error("Found unbalanced brackets"));
    }

    Ok(levels.pop().unwrap_or_default())
}

fn push_part(levels: &mut [Vec<PatternPart>], part: PatternPart) {
    if let Some(level) = levels.last_mut() {
        level.push(part);
    }
}

fn flush_literal(literal: &mut String, levels: &mut [Vec<PatternPart>]) {
    if !literal.is_empty() {
        push_part(levels, PatternPart::Literal(std::mem::take(literal)));
    }
}

fn build_regex(
    parts: &[PatternPart],
    constraints: &RouteParams,
    param_map: &mut Vec<(String, String)>,
) -> String {
    let mut regex = String::new();

    for part in parts {
        match part {
            PatternPart::Literal(literal) => regex.push_str(&regex::escape(literal)),
            PatternPart::Parameter { name, delimiters } => {
                let group = format!("param{}", param_map.len());
                let class = match (constraints.get(name), delimiters) {
                    (Some(constraint), _) => format!("(?:{})", constraint),
                    (None, None) => "[^/]+".to_string(),
                    (None, Some(delimiters)) => {
                        let escaped: String = delimiters
                            .chars()
                            .map(|d| regex::escape(&d.to_string()))
                            .collect();
                        format!("[^{}]+", escaped)
                    }
                };
                regex.push_str(&format!("(?P<{}>{})", group, class));
                param_map.push((group, name.clone()));
            }
            PatternPart::Optional(inner) => {
                regex.push_str(&format!(
                    "(?:{})?",
                    build_regex(inner, constraints, param_map)
                ));
            }
        }
    }

    regex
}

// ============================================================================
// Tests
// ============================================================================
