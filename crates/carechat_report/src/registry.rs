//! Component registry for report sections.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::component::Component;
use crate::components::{
    AiSummaryComponent, CooccurrenceComponent, DescriptiveStatsComponent, NlpAnalysisComponent,
    SavedMessagesComponent,
};
use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::section::SectionKind;
use crate::summarizer::Summarizer;

/// An ordered registry of section components.
///
/// Registration order is report order. Registering a section id that is
/// already present replaces the earlier component in place.
#[derive(Default, Clone)]
pub struct ComponentRegistry {
    components: Vec<(SectionKind, Arc<dyn Component>)>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Registry with every built-in section in default order.
    pub fn with_defaults(config: &ReportConfig, summarizer: Option<Arc<dyn Summarizer>>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(AiSummaryComponent::new(
            summarizer,
            config.summary.clone(),
        )));
        registry.register(Arc::new(SavedMessagesComponent::new()));
        registry.register(Arc::new(DescriptiveStatsComponent::new()));
        registry.register(Arc::new(NlpAnalysisComponent::new(config.nlp.clone())));
        registry.register(Arc::new(CooccurrenceComponent::new(&config.cooccurrence)));
        registry
    }

    /// Register a component under its own section kind.
    pub fn register(&mut self, component: Arc<dyn Component>) {
        let kind = component.kind();
        self.register_as(kind, component);
    }

    /// Register a component under a custom section id.
    pub fn register_as(&mut self, id: impl Into<SectionKind>, component: Arc<dyn Component>) {
        let id = id.into();
        if let Some(slot) = self.components.iter_mut().find(|(k, _)| *k == id) {
            warn!("Section {} registered twice, replacing the earlier component", id);
            slot.1 = component;
        } else {
            debug!("Registering section: {}", id);
            self.components.push((id, component));
        }
    }

    /// Get a component by section id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Component>> {
        self.components
            .iter()
            .find(|(k, _)| k.as_str() == id)
            .map(|(_, c)| Arc::clone(c))
    }

    /// Get a component by section id, returning an error if not found.
    pub fn get_required(&self, id: &str) -> ReportResult<Arc<dyn Component>> {
        self.get(id)
            .ok_or_else(|| ReportError::Config(format!("Unknown report section: {}", id)))
    }

    /// All components in registration order.
    pub fn get_all(&self) -> Vec<(SectionKind, Arc<dyn Component>)> {
        self.components.clone()
    }

    /// Components to run: every registered one, or exactly the listed ids
    /// in the listed order.
    pub fn resolve(
        &self,
        order: Option<&[String]>,
    ) -> ReportResult<Vec<(SectionKind, Arc<dyn Component>)>> {
        match order {
            None => Ok(self.get_all()),
            Some(ids) => ids
                .iter()
                .map(|id| Ok((SectionKind::from_id(id), self.get_required(id)?)))
                .collect(),
        }
    }

    /// Section ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.components.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.components.iter().any(|(k, _)| k.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Remove a component from the registry.
    pub fn unregister(&mut self, id: &str) -> Option<Arc<dyn Component>> {
        debug!("Unregistering section: {}", id);
        let index = self.components.iter().position(|(k, _)| k.as_str() == id)?;
        Some(self.components.remove(index).1)
    }

    pub fn clear(&mut self) {
        debug!("Clearing component registry");
        self.components.clear();
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("sections", &self.ids())
            .finish()
    }
}
