//! Correlation registry.
//!
//! Loading is two-phase. Raw records are registered first, from the built-in
//! catalog and any extra YAML sources; [`RegistryBuilder::build`] then
//! resolves every deferred reference, binds kernels and runs the load-time
//! checks. The resulting [`Registry`] is immutable.

use crate::catalog;
use crate::definition::{self, CorrelationDefinition, OutputIndex};
use crate::describe::CorrelationSchema;
use crate::error::{CorrelationError, CorrelationResult};
use crate::evaluator::{self, Evaluation, InputSet, Tuning};
use crate::schema::{Category, CorrelationRecord, Grid};
use crate::sweep::{self, SweepDefinition, SweepResult};
use crate::validate::validate_definition;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

/// Collects raw records before resolution.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    records: Vec<CorrelationRecord>,
    names: HashSet<String>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder seeded with every embedded catalog.
    pub fn with_builtin_catalog(mut self) -> CorrelationResult<Self> {
        for (source, text) in catalog::BUILTIN {
            self.load_yaml_str(source, text)?;
        }
        Ok(self)
    }

    pub fn register(&mut self, record: CorrelationRecord) -> CorrelationResult<()> {
        if !self.names.insert(record.name.clone()) {
            return Err(CorrelationError::DuplicateCorrelationName { name: record.name });
        }
        self.records.push(record);
        Ok(())
    }

    /// Register every record of a YAML catalog document. Returns the number
    /// of records added.
    pub fn load_yaml_str(&mut self, source_name: &str, text: &str) -> CorrelationResult<usize> {
        let records: Vec<CorrelationRecord> =
            serde_yaml::from_str(text).map_err(|e| CorrelationError::CatalogParse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        let count = records.len();
        for record in records {
            self.register(record)?;
        }
        tracing::debug!(source = source_name, records = count, "loaded catalog");
        Ok(count)
    }

    pub fn load_yaml_file(&mut self, path: &Path) -> CorrelationResult<usize> {
        let source_name = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| CorrelationError::CatalogParse {
            source_name: source_name.clone(),
            message: e.to_string(),
        })?;
        self.load_yaml_str(&source_name, &text)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve and check every registered record.
    pub fn build(self) -> CorrelationResult<Registry> {
        let outputs: OutputIndex<'_> = self
            .records
            .iter()
            .map(|r| (r.name.as_str(), (r.unit, r.range)))
            .collect();

        let mut definitions = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let def = definition::resolve(record, &outputs)?;
            validate_definition(&def)?;
            definitions.push(def);
        }

        let registry = Registry::from_definitions(definitions);
        tracing::info!(
            correlations = registry.len(),
            categories = registry.by_category.len(),
            "correlation registry built"
        );
        Ok(registry)
    }
}

/// Immutable set of resolved correlations.
#[derive(Debug, Clone)]
pub struct Registry {
    definitions: Vec<CorrelationDefinition>,
    by_name: HashMap<String, usize>,
    /// Categories in first-registration order.
    by_category: Vec<(Category, Vec<usize>)>,
}

static BUILTIN: OnceLock<CorrelationResult<Registry>> = OnceLock::new();

impl Registry {
    fn from_definitions(definitions: Vec<CorrelationDefinition>) -> Self {
        let mut by_name = HashMap::with_capacity(definitions.len());
        let mut by_category: Vec<(Category, Vec<usize>)> = Vec::new();
        for (i, def) in definitions.iter().enumerate() {
            by_name.insert(def.name.clone(), i);
            match by_category.iter_mut().find(|(c, _)| *c == def.category) {
                Some((_, members)) => members.push(i),
                None => by_category.push((def.category, vec![i])),
            }
        }
        Self {
            definitions,
            by_name,
            by_category,
        }
    }

    /// Process-wide registry of the embedded catalog, built on first use.
    pub fn builtin() -> CorrelationResult<&'static Registry> {
        BUILTIN
            .get_or_init(|| RegistryBuilder::new().with_builtin_catalog()?.build())
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &CorrelationDefinition> {
        self.definitions.iter()
    }

    pub fn lookup_by_name(&self, name: &str) -> CorrelationResult<&CorrelationDefinition> {
        self.by_name
            .get(name)
            .map(|&i| &self.definitions[i])
            .ok_or_else(|| CorrelationError::UnknownCorrelation {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Every correlation name, in registration order.
    pub fn list_correlations(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name.as_str()).collect()
    }

    /// Names in `category`, in registration order.
    pub fn list_by_category(&self, category: Category) -> Vec<&str> {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, members)| {
                members
                    .iter()
                    .map(|&i| self.definitions[i].name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn list_categories(&self) -> Vec<Category> {
        self.by_category.iter().map(|(c, _)| *c).collect()
    }

    /// Names not hidden in `grid`.
    pub fn list_visible(&self, grid: Grid) -> Vec<&str> {
        self.definitions
            .iter()
            .filter(|d| !d.is_hidden_in(grid))
            .map(|d| d.name.as_str())
            .collect()
    }

    /// Case-insensitive substring match on name, title and authors.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.trim().to_lowercase();
        self.definitions
            .iter()
            .filter(|d| {
                query.is_empty()
                    || d.name.to_lowercase().contains(&query)
                    || d.metadata
                        .title
                        .as_ref()
                        .is_some_and(|t| t.to_lowercase().contains(&query))
                    || d.metadata
                        .authors
                        .iter()
                        .any(|a| a.to_lowercase().contains(&query))
            })
            .map(|d| d.name.as_str())
            .collect()
    }

    pub fn describe(&self, name: &str) -> CorrelationResult<CorrelationSchema> {
        self.lookup_by_name(name).map(CorrelationSchema::from)
    }

    pub fn evaluate(&self, name: &str, inputs: &InputSet) -> CorrelationResult<Evaluation> {
        self.evaluate_tuned(name, inputs, Tuning::default())
    }

    pub fn evaluate_tuned(
        &self,
        name: &str,
        inputs: &InputSet,
        tuning: Tuning,
    ) -> CorrelationResult<Evaluation> {
        evaluator::evaluate(self.lookup_by_name(name)?, inputs, tuning)
    }

    /// Evaluate `name` across a sweep of one parameter.
    pub fn sweep(
        &self,
        name: &str,
        inputs: &InputSet,
        definition: &SweepDefinition,
        tuning: Tuning,
    ) -> CorrelationResult<SweepResult> {
        sweep::execute(self.lookup_by_name(name)?, inputs, definition, tuning)
    }
}
