//! Admission control for every component a test can use.
//!
//! A [`Registry`] is an explicit value owned by the caller: build it once,
//! register corpora and encodings, then pass `&Registry` to
//! [`crate::run_test`] and friends. Several registries can coexist, which is
//! what the tests do.
//!
//! Each registration validates shape immediately. Lookups happen again at
//! execution time, so removing a component between building a spec and
//! running it produces a [`ConfigurationError`], never a silent skip.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{info, warn};
use serde::Serialize;

use crate::corpus::{Corpus, CorpusInfo};
use crate::encoding::{Encoding, EncodingInfo};
use crate::error::{ComponentKind, ConfigurationError, Result};
use crate::metrics::{Metric, MetricInfo, builtin_metrics};
use crate::nulls::{NullInfo, NullModel, builtin_nulls};

/// Names of everything currently registered, sorted.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub corpora: Vec<String>,
    pub encodings: Vec<String>,
    pub nulls: Vec<String>,
    pub metrics: Vec<String>,
}

/// Full metadata of everything registered, for reporting tools.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryCatalog {
    pub corpora: Vec<CorpusInfo>,
    pub encodings: Vec<EncodingInfo>,
    pub nulls: Vec<NullInfo>,
    pub metrics: Vec<MetricInfo>,
}

#[derive(Default, Clone)]
pub struct Registry {
    corpora: BTreeMap<String, Arc<Corpus>>,
    encodings: BTreeMap<String, Encoding>,
    nulls: BTreeMap<String, Arc<dyn NullModel>>,
    metrics: BTreeMap<String, Arc<dyn Metric>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("snapshot", &self.list_registered())
            .finish()
    }
}

fn unregistered(kind: ComponentKind, name: &str) -> ConfigurationError {
    ConfigurationError::Unregistered {
        kind,
        name: name.to_string(),
    }
}

impl Registry {
    /// Empty registry: no nulls, no metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in null models and the three compressors.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for null in builtin_nulls() {
            registry.register_null(null);
        }
        for metric in builtin_metrics() {
            registry.register_metric(metric);
        }
        registry
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register a text corpus with default metadata.
    pub fn register_corpus(&mut self, name: &str, text: &str) -> Result<CorpusInfo> {
        self.add_corpus(Corpus::new(name, text)?)
    }

    /// Register a pre-built corpus (e.g. one carrying source/language metadata).
    pub fn add_corpus(&mut self, corpus: Corpus) -> Result<CorpusInfo> {
        let info = corpus.info();
        if self
            .corpora
            .insert(info.name.clone(), Arc::new(corpus))
            .is_some()
        {
            warn!("corpus '{}' replaced", info.name);
        }
        info!("registered corpus '{}' ({} words)", info.name, info.words);
        Ok(info)
    }

    /// Register an encoding function. The function is run once on sample text; any
    /// non-binary output, panic or nondeterminism rejects it.
    pub fn register_encoding<F>(
        &mut self,
        name: &str,
        func: F,
        description: &str,
        hypothesis: &str,
        preregistered: bool,
    ) -> Result<EncodingInfo>
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.add_encoding(Encoding::new(
            name,
            func,
            description,
            hypothesis,
            preregistered,
        ))
    }

    pub fn add_encoding(&mut self, encoding: Encoding) -> Result<EncodingInfo> {
        encoding.validate()?;
        let info = encoding.info().clone();
        if self.encodings.insert(info.name.clone(), encoding).is_some() {
            warn!("encoding '{}' replaced", info.name);
        }
        info!(
            "registered encoding '{}' (preregistered: {})",
            info.name, info.preregistered
        );
        Ok(info)
    }

    pub fn register_null(&mut self, null: Box<dyn NullModel>) {
        let name = null.name().to_string();
        if self.nulls.insert(name.clone(), Arc::from(null)).is_some() {
            warn!("null model '{name}' replaced");
        }
    }

    pub fn register_metric(&mut self, metric: Box<dyn Metric>) {
        let name = metric.name().to_string();
        if self.metrics.insert(name.clone(), Arc::from(metric)).is_some() {
            warn!("metric '{name}' replaced");
        }
    }

    pub fn unregister_corpus(&mut self, name: &str) -> bool {
        self.corpora.remove(name).is_some()
    }

    pub fn unregister_encoding(&mut self, name: &str) -> bool {
        self.encodings.remove(name).is_some()
    }

    pub fn unregister_null(&mut self, name: &str) -> bool {
        self.nulls.remove(name).is_some()
    }

    pub fn unregister_metric(&mut self, name: &str) -> bool {
        self.metrics.remove(name).is_some()
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn corpus(&self, name: &str) -> Result<Arc<Corpus>> {
        self.corpora
            .get(name)
            .cloned()
            .ok_or_else(|| unregistered(ComponentKind::Corpus, name).into())
    }

    pub fn encoding(&self, name: &str) -> Result<Encoding> {
        self.encodings
            .get(name)
            .cloned()
            .ok_or_else(|| unregistered(ComponentKind::Encoding, name).into())
    }

    pub fn null(&self, name: &str) -> Result<Arc<dyn NullModel>> {
        self.nulls
            .get(name)
            .cloned()
            .ok_or_else(|| unregistered(ComponentKind::Null, name).into())
    }

    pub fn metric(&self, name: &str) -> Result<Arc<dyn Metric>> {
        self.metrics
            .get(name)
            .cloned()
            .ok_or_else(|| unregistered(ComponentKind::Metric, name).into())
    }

    /// Every registered metric, in name order.
    pub fn all_metrics(&self) -> Result<Vec<Arc<dyn Metric>>> {
        if self.metrics.is_empty() {
            return Err(ConfigurationError::NoMetrics.into());
        }
        Ok(self.metrics.values().cloned().collect())
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    pub fn list_registered(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            corpora: self.corpora.keys().cloned().collect(),
            encodings: self.encodings.keys().cloned().collect(),
            nulls: self.nulls.keys().cloned().collect(),
            metrics: self.metrics.keys().cloned().collect(),
        }
    }

    pub fn catalog(&self) -> RegistryCatalog {
        RegistryCatalog {
            corpora: self.corpora.values().map(|c| c.info()).collect(),
            encodings: self.encodings.values().map(|e| e.info().clone()).collect(),
            nulls: self.nulls.values().map(|n| n.info().clone()).collect(),
            metrics: self.metrics.values().map(|m| m.info().clone()).collect(),
        }
    }
}
