use core::fmt::{self, Display, Formatter};

use crate::component::Instance;

/// Hook around the initialization of every component.
///
/// Post-processors are discovered by the scanner, constructed right away and applied in
/// discovery order. A hook may return a different instance, which replaces the working value
/// for the following hooks and, after the last one, becomes the bean.
pub trait PostProcessor: Send + Sync + 'static {
    /// # Errors
    /// Any error aborts creation of the component
    fn before_initialization(&self, instance: Instance, name: &str) -> anyhow::Result<Instance> {
        let _ = name;
        Ok(instance)
    }

    /// # Errors
    /// Any error aborts creation of the component
    fn after_initialization(&self, instance: Instance, name: &str) -> anyhow::Result<Instance> {
        let _ = name;
        Ok(instance)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    BeforeInitialization,
    AfterInitialization,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Stage::BeforeInitialization => f.write_str("Before-initialization"),
            Stage::AfterInitialization => f.write_str("After-initialization"),
        }
    }
}
