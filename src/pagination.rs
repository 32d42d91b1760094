//! Pagination over resource manager list responses.
//!
//! ARM list endpoints return `{"value": [...], "nextLink": "<url>"}`; the
//! last page simply omits `nextLink`. Bodies without `value` (error bodies,
//! single-object responses) are handed back untouched.

use serde_json::{Map, Value};

/// Field holding the items of a page.
pub const VALUE_FIELD: &str = "value";

/// Field holding the URL of the following page.
pub const NEXT_LINK_FIELD: &str = "nextLink";

/// What to do after a page has been absorbed.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Fetch this URL next.
    Next(String),
    /// No continuation; the accumulated items are complete.
    Done,
    /// The page had no `value` array and must be returned as-is.
    Passthrough(Value),
}

/// Accumulator for the `value` items of a chain of pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagedResult {
    items: Vec<Value>,
    pages: usize,
}

impl PagedResult {
    /// Start an empty accumulation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one decoded page and decide whether to continue.
    pub fn absorb(&mut self, page: Value) -> Step {
        let Value::Object(mut body) = page else {
            return Step::Passthrough(page);
        };

        let items = match body.remove(VALUE_FIELD) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                body.insert(VALUE_FIELD.to_string(), other);
                return Step::Passthrough(Value::Object(body));
            }
            None => return Step::Passthrough(Value::Object(body)),
        };

        self.items.extend(items);
        self.pages += 1;

        match body.remove(NEXT_LINK_FIELD) {
            Some(Value::String(link)) if !link.is_empty() => Step::Next(link),
            _ => Step::Done,
        }
    }

    /// Number of pages absorbed so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Items accumulated so far.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Render as a single `{"value": [...]}` body.
    pub fn into_value(self) -> Value {
        let mut body = Map::new();
        body.insert(VALUE_FIELD.to_string(), Value::Array(self.items));
        Value::Object(body)
    }
}
