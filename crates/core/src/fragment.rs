//! Query-string style codec for the location fragment.
//!
//! Several widgets share one page fragment (`#tc0=a&tc1=b&other=xyz`), so the
//! codec keeps every segment it did not touch exactly as it was read: same
//! position, same percent-encoding. Only keys written through [`FragmentState::set`]
//! are re-encoded.

use std::borrow::Cow;

#[derive(Debug, Clone)]
enum Entry {
    Pair {
        key: String,
        value: Option<String>,
        /// Segment as it appeared in the parsed fragment. `None` once rewritten.
        raw: Option<String>,
    },
    /// Segment that does not decode to UTF-8. Never matched, written back as read.
    Opaque(String),
}

impl Entry {
    fn key(&self) -> Option<&str> {
        match self {
            Entry::Pair { key, .. } => Some(key),
            Entry::Opaque(_) => None,
        }
    }

    fn value(&self) -> Option<&str> {
        match self {
            Entry::Pair { value, .. } => value.as_deref(),
            Entry::Opaque(_) => None,
        }
    }

    fn encode(&self) -> String {
        match self {
            Entry::Pair { raw: Some(raw), .. } | Entry::Opaque(raw) => raw.clone(),
            Entry::Pair {
                key,
                value: Some(value),
                raw: None,
            } => format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)),
            Entry::Pair {
                key,
                value: None,
                raw: None,
            } => urlencoding::encode(key).into_owned(),
        }
    }
}

/// Decoded view of the page fragment: widget key -> active panel id, plus
/// whatever unrelated keys the page carries.
#[derive(Debug, Clone, Default)]
pub struct FragmentState {
    entries: Vec<Entry>,
}

impl FragmentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw fragment. A leading `#` is ignored.
    ///
    /// Never fails. Segments whose percent-encoding does not decode to UTF-8
    /// are kept for [`FragmentState::serialize`] but cannot be looked up.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        let entries = raw
            .split('&')
            .filter(|s| !s.is_empty())
            .map(parse_segment)
            .collect();
        Self { entries }
    }

    /// Encode back into fragment form (without the leading `#`).
    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(Entry::encode)
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Value stored under `key`. Bare keys (`#flag`) have no value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key() == Some(key))
            .and_then(Entry::value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key() == Some(key))
    }

    /// Set `key` to `value`. An existing key keeps its position; a new key is
    /// appended. Writing the value a key already has leaves its segment as is.
    pub fn set(&mut self, key: &str, value: &str) {
        let Some(index) = self.entries.iter().position(|e| e.key() == Some(key)) else {
            self.entries.push(Entry::Pair {
                key: key.to_string(),
                value: Some(value.to_string()),
                raw: None,
            });
            return;
        };

        if self.entries[index].value() != Some(value) {
            self.entries[index] = Entry::Pair {
                key: key.to_string(),
                value: Some(value.to_string()),
                raw: None,
            };
        }
        // Later duplicates would shadow nothing but still be serialized.
        let mut seen = 0;
        self.entries.retain(|e| {
            if e.key() != Some(key) {
                return true;
            }
            seen += 1;
            seen == 1
        });
    }

    /// Number of addressable keys.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.key().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Equality is mapping equality: same keys with the same decoded values,
/// regardless of how each segment was encoded. Opaque segments compare
/// byte-for-byte.
impl PartialEq for FragmentState {
    fn eq(&self, other: &Self) -> bool {
        let opaque = |state: &Self| -> Vec<String> {
            state
                .entries
                .iter()
                .filter(|e| e.key().is_none())
                .map(Entry::encode)
                .collect()
        };
        self.len() == other.len()
            && opaque(self) == opaque(other)
            && self.entries.iter().all(|e| match e.key() {
                Some(key) => other.contains_key(key) && other.get(key) == e.value(),
                None => true,
            })
    }
}

impl Eq for FragmentState {}

impl<K, V> FromIterator<(K, V)> for FragmentState
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut state = Self::default();
        for (key, value) in iter {
            state.set(key.as_ref(), value.as_ref());
        }
        state
    }
}

fn parse_segment(segment: &str) -> Entry {
    let (key, value) = match segment.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (segment, None),
    };
    let decoded = decode(key).and_then(|key| match value {
        Some(value) => decode(value).map(|value| (key, Some(value))),
        None => Some((key, None)),
    });
    match decoded {
        Some((key, value)) => Entry::Pair {
            key,
            value,
            raw: Some(segment.to_string()),
        },
        None => {
            log::debug!("fragment segment '{}' does not decode, keeping it verbatim", segment);
            Entry::Opaque(segment.to_string())
        }
    }
}

fn decode(part: &str) -> Option<String> {
    let part: Cow<'_, str> = if part.contains('+') {
        Cow::Owned(part.replace('+', " "))
    } else {
        Cow::Borrowed(part)
    };
    urlencoding::decode(&part).ok().map(Cow::into_owned)
}
