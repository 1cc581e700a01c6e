use chrono::NaiveDate;
use skyglass_common::Dataset;

/// One positional component of a query key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Str(String),
    Int(i64),
    /// An optional parameter that was not given; keeps later parts in place
    Absent,
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        KeyPart::Str(s.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(s: String) -> Self {
        KeyPart::Str(s)
    }
}

impl From<i64> for KeyPart {
    fn from(n: i64) -> Self {
        KeyPart::Int(n)
    }
}

impl From<u32> for KeyPart {
    fn from(n: u32) -> Self {
        KeyPart::Int(i64::from(n))
    }
}

impl From<NaiveDate> for KeyPart {
    fn from(d: NaiveDate) -> Self {
        KeyPart::Str(d.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<KeyPart>> From<Option<T>> for KeyPart {
    fn from(value: Option<T>) -> Self {
        value.map_or(KeyPart::Absent, Into::into)
    }
}

impl std::fmt::Display for KeyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyPart::Str(s) => write!(f, "{}", s),
            KeyPart::Int(n) => write!(f, "{}", n),
            KeyPart::Absent => write!(f, "-"),
        }
    }
}

/// Ordered cache key: the dataset tag followed by every query parameter.
///
/// Two requests share an in-flight fetch and a cached result exactly when
/// their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    dataset: Dataset,
    parts: Vec<KeyPart>,
}

impl QueryKey {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            parts: Vec::new(),
        }
    }

    pub fn with(mut self, part: impl Into<KeyPart>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dataset)?;
        for part in &self.parts {
            write!(f, "/{}", part)?;
        }
        Ok(())
    }
}
