use core::fmt::{self, Display, Formatter};

/// Lifetime of a component instance inside the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Scope {
    /// One instance per container, created eagerly on startup
    #[default]
    Singleton,
    /// A fresh instance per request, never cached
    Prototype,
}

impl Scope {
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Scope::Singleton => "singleton",
            Scope::Prototype => "prototype",
        }
    }

    /// Parses the value carried by a scope marker
    #[inline]
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "singleton" => Some(Scope::Singleton),
            "prototype" => Some(Scope::Prototype),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_singleton(&self) -> bool {
        matches!(self, Scope::Singleton)
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
