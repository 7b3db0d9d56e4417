//! Registered encodings: opaque `text -> bitstring` functions plus metadata.
//!
//! The function itself is supplied by the caller. The engine only enforces its
//! contract: deterministic, never panics, and emits nothing but `'0'`/`'1'`.

use std::collections::{BTreeSet, HashSet};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use serde::Serialize;

use crate::bits::Bitstring;
use crate::error::{ComponentKind, ConfigurationError, ContractViolation, EngineError};

/// Text encoded once at registration time.
pub const SAMPLE_TEXT: &str = "test";

type EncodeFn = dyn Fn(&str) -> String + Send + Sync;

/// Metadata describing an encoding.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EncodingInfo {
    /// Unique identifier (e.g. `"E8_solar"`).
    pub name: String,
    pub description: String,
    /// What the encoding is meant to test.
    pub hypothesis: String,
    /// Whether the hypothesis was declared before any test ran against it.
    pub preregistered: bool,
}

/// A named encoding function.
#[derive(Clone)]
pub struct Encoding {
    info: EncodingInfo,
    func: Arc<EncodeFn>,
}

impl std::fmt::Debug for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoding").field("info", &self.info).finish()
    }
}

impl Encoding {
    pub fn new<F>(
        name: impl Into<String>,
        func: F,
        description: impl Into<String>,
        hypothesis: impl Into<String>,
        preregistered: bool,
    ) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            info: EncodingInfo {
                name: name.into(),
                description: description.into(),
                hypothesis: hypothesis.into(),
                preregistered,
            },
            func: Arc::new(func),
        }
    }

    pub fn info(&self) -> &EncodingInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Run the function and validate its output. `context` names the input in
    /// errors (e.g. `"corpus 'quran'"`).
    pub fn encode(&self, text: &str, context: &str) -> Result<Bitstring, ContractViolation> {
        let raw = catch_unwind(AssertUnwindSafe(|| (self.func)(text))).map_err(|_| {
            ContractViolation::EncodingPanicked {
                encoding: self.info.name.clone(),
                context: context.to_string(),
            }
        })?;
        Bitstring::parse(&raw).map_err(|e| ContractViolation::NonBinarySymbol {
            encoding: self.info.name.clone(),
            position: e.position,
            symbol: e.symbol,
        })
    }

    /// Encode twice and require identical output.
    pub fn encode_deterministic(
        &self,
        text: &str,
        context: &str,
    ) -> Result<Bitstring, ContractViolation> {
        let first = self.encode(text, context)?;
        let second = self.encode(text, context)?;
        if first != second {
            return Err(ContractViolation::NonDeterministicEncoding {
                encoding: self.info.name.clone(),
                context: context.to_string(),
            });
        }
        Ok(first)
    }

    /// Shape check performed at registration.
    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        if self.info.name.is_empty() {
            return Err(ConfigurationError::EmptyName {
                kind: ComponentKind::Encoding,
            }
            .into());
        }
        self.encode_deterministic(SAMPLE_TEXT, "the registration check")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Character-class encoding
// ---------------------------------------------------------------------------

/// Maps each character in `ones` to `'1'`, each in `zeros` to `'0'`, and drops
/// every other character (spaces, punctuation, unlisted letters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClassEncoding {
    ones: BTreeSet<char>,
    zeros: BTreeSet<char>,
}

impl CharClassEncoding {
    /// Characters listed in both sets map to `'1'`.
    pub fn new(ones: &str, zeros: &str) -> Self {
        let ones: BTreeSet<char> = ones.chars().collect();
        let zeros = zeros.chars().filter(|c| !ones.contains(c)).collect();
        Self { ones, zeros }
    }

    pub fn apply(&self, text: &str) -> String {
        text.chars()
            .filter_map(|c| {
                if self.ones.contains(&c) {
                    Some('1')
                } else if self.zeros.contains(&c) {
                    Some('0')
                } else {
                    None
                }
            })
            .collect()
    }

    /// Characters seen in `text` that neither set covers.
    pub fn unmapped(&self, text: &str) -> HashSet<char> {
        text.chars()
            .filter(|c| !c.is_whitespace() && !self.ones.contains(c) && !self.zeros.contains(c))
            .collect()
    }

    pub fn into_encoding(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        hypothesis: impl Into<String>,
        preregistered: bool,
    ) -> Encoding {
        Encoding::new(
            name,
            move |text| self.apply(text),
            description,
            hypothesis,
            preregistered,
        )
    }
}
