use alloc::{
    collections::BTreeMap,
    string::{String, ToString as _},
};

/// Config for a container
/// ## Fields
/// - `namespace`:
///   Namespace the scanner walks. Only units declared directly in it are registered.
/// - `wiring`:
///   Overrides of the registered names dependency slots are wired to.
///
///   A slot without an override asks for the name carried by its field marker.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub namespace: String,
    pub wiring: Wiring,
}

impl Config {
    #[inline]
    #[must_use]
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            wiring: Wiring::new(),
        }
    }

    /// Wires dependency slot `field` of `component` to the component registered as `target`
    #[inline]
    #[must_use]
    pub fn wire(mut self, component: &str, field: &str, target: &str) -> Self {
        self.wiring.insert(component, field, target);
        self
    }
}

/// Explicit wiring table: `(component, field) -> target`
#[derive(Clone, Debug, Default)]
pub struct Wiring {
    entries: BTreeMap<(String, String), String>,
}

impl Wiring {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    #[inline]
    pub fn insert(&mut self, component: &str, field: &str, target: &str) -> Option<String> {
        self.entries
            .insert((component.to_string(), field.to_string()), target.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> + '_ {
        self.entries
            .iter()
            .map(|((component, field), target)| (component.as_str(), field.as_str(), target.as_str()))
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
