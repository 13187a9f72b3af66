use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeMode {
    Prefix,
    Suffix,
    Contains,
}

/// A wildcard pattern reduced to a match mode and the literal text to find.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LikeMatch {
    pub mode: LikeMode,
    pub literal: String,
}

impl LikeMatch {
    pub fn matches(&self, candidate: &str) -> bool {
        match self.mode {
            LikeMode::Prefix => candidate.starts_with(&self.literal),
            LikeMode::Suffix => candidate.ends_with(&self.literal),
            LikeMode::Contains => candidate.contains(&self.literal),
        }
    }
}

const WILDCARD: char = '*';
const ESCAPED_WILDCARD: &str = "\\*";

/// Classifies a `*` pattern.
///
/// `\*` is a literal asterisk. A pattern with no wildcard at all is treated
/// as a prefix. `*x*` is Contains, `*x` is Suffix and anything else Prefix;
/// wildcards in the middle of the pattern are dropped.
pub fn build_like_match(pattern: &str) -> LikeMatch {
    let marker = fresh_marker(pattern);
    let mut masked = pattern.replace(ESCAPED_WILDCARD, &marker);

    if !masked.contains(WILDCARD) {
        masked.push(WILDCARD);
    }

    let mode = match (masked.starts_with(WILDCARD), masked.ends_with(WILDCARD)) {
        (true, true) => LikeMode::Contains,
        (true, false) => LikeMode::Suffix,
        _ => LikeMode::Prefix,
    };

    let literal = masked
        .replace(WILDCARD, "")
        .replace(&marker, &WILDCARD.to_string());

    LikeMatch { mode, literal }
}

/// A placeholder that does not occur in `pattern`.
fn fresh_marker(pattern: &str) -> String {
    loop {
        let marker = format!("<{}>", Uuid::new_v4().simple());
        if !pattern.contains(&marker) {
            return marker;
        }
    }
}
