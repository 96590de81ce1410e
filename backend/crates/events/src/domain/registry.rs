//! Event Template Registry
//!
//! Fixed, ordered list of default templates built once per process.

use std::sync::LazyLock;

use crate::domain::event_template::EventTemplate;

/// Durations registered by default, in display order
const DEFAULT_DURATIONS: [u32; 3] = [15, 30, 60];

static DEFAULT_REGISTRY: LazyLock<EventTemplateRegistry> =
    LazyLock::new(EventTemplateRegistry::with_defaults);

/// Immutable registry of event templates
///
/// Lookups never fail: an unknown slug resolves to the fallback template
/// so the booking UI always has something to render.
#[derive(Debug, Clone)]
pub struct EventTemplateRegistry {
    templates: Vec<EventTemplate>,
    fallback: usize,
}

impl EventTemplateRegistry {
    /// Process-wide default registry (15, 30 and 60 minutes)
    pub fn defaults() -> &'static EventTemplateRegistry {
        &DEFAULT_REGISTRY
    }

    fn with_defaults() -> Self {
        // DEFAULT_DURATIONS is sorted, so the fallback is the first entry
        Self {
            templates: DEFAULT_DURATIONS
                .into_iter()
                .map(EventTemplate::of_minutes)
                .collect(),
            fallback: 0,
        }
    }

    /// Build a registry; `None` if `templates` is empty.
    ///
    /// The fallback is the shortest template (first one on ties).
    pub fn new(templates: Vec<EventTemplate>) -> Option<Self> {
        let fallback = templates
            .iter()
            .enumerate()
            .min_by_key(|(idx, t)| (t.duration_minutes, *idx))
            .map(|(idx, _)| idx)?;

        Some(Self {
            templates,
            fallback,
        })
    }

    /// Template with `slug`, or the fallback template
    pub fn lookup_by_slug(&self, slug: &str) -> &EventTemplate {
        self.find(slug).unwrap_or_else(|| {
            tracing::debug!(slug, "Unknown event template slug, using fallback");
            self.fallback()
        })
    }

    /// Exact match only
    pub fn find(&self, slug: &str) -> Option<&EventTemplate> {
        self.templates.iter().find(|t| t.slug == slug)
    }

    pub fn fallback(&self) -> &EventTemplate {
        &self.templates[self.fallback]
    }

    /// Templates in registration order
    pub fn templates(&self) -> &[EventTemplate] {
        &self.templates
    }
}
