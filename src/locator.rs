//! Selector fallback: the page markup is not ours, so every element we need
//! is described by a role with several candidate selectors, tried in order.

use std::fmt;

use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::session::{Element, Scope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    Css(&'static str),
    XPath(&'static str),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(sel) => write!(f, "CSS selector '{sel}'"),
            Locator::XPath(sel) => write!(f, "XPath selector '{sel}'"),
        }
    }
}

/// Something on the page we want, and the selectors that might find it,
/// most specific first.
#[derive(Debug, Clone, Copy)]
pub struct Role {
    pub name: &'static str,
    pub candidates: &'static [Locator],
}

/// A successful lookup plus the candidate that produced it.
#[derive(Debug)]
pub struct Hit<T> {
    pub value: T,
    pub locator: Locator,
}

/// First element matched by the first candidate that matches anything.
pub async fn first<S: Scope>(scope: &S, role: &Role) -> Option<Hit<S::Element>> {
    let hit = all(scope, role).await?;
    let locator = hit.locator;
    hit.value.into_iter().next().map(|value| Hit { value, locator })
}

/// Every element matched by the first candidate that matches anything.
/// Matches from different candidates are never merged.
pub async fn all<S: Scope>(scope: &S, role: &Role) -> Option<Hit<Vec<S::Element>>> {
    for locator in role.candidates {
        match scope.find_all(locator).await {
            Ok(found) if !found.is_empty() => {
                debug!("{}: {} matched {} element(s)", role.name, locator, found.len());
                return Some(Hit { value: found, locator: *locator });
            }
            Ok(_) => debug!("{}: {} matched nothing", role.name, locator),
            Err(e) => debug!("{}: {} failed: {}", role.name, locator, e),
        }
    }
    None
}

/// Like [`first`], but a miss is fatal.
pub async fn require<S: Scope>(scope: &S, role: &Role) -> Result<Hit<S::Element>> {
    first(scope, role)
        .await
        .ok_or(TrackerError::ElementNotFound { role: role.name })
}

/// Trimmed text of the role's element, or "" when it can't be read.
pub async fn text_or_empty<S: Scope>(scope: &S, role: &Role) -> String {
    let Some(hit) = first(scope, role).await else {
        return String::new();
    };
    match hit.value.text().await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            debug!("{}: could not read text: {}", role.name, e);
            String::new()
        }
    }
}

/// Attribute of the role's element, or "" when missing or unreadable.
pub async fn attr_or_empty<S: Scope>(scope: &S, role: &Role, name: &str) -> String {
    let Some(hit) = first(scope, role).await else {
        return String::new();
    };
    match hit.value.attr(name).await {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            debug!("{}: could not read {}: {}", role.name, name, e);
            String::new()
        }
    }
}
