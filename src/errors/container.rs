use alloc::{boxed::Box, string::String};
use core::fmt::{self, Display, Formatter};

use super::{resolve::ResolveErrorKind, scanner::ScanErrorKind};

#[derive(thiserror::Error, Debug)]
pub enum WiringErrorKind {
    #[error("Wiring refers to unknown component `{name}`")]
    UnknownComponent { name: String },
    #[error("Component `{name}` has no dependency slot `{field}`")]
    UnknownSlot { name: String, field: String },
}

#[derive(thiserror::Error, Debug)]
pub enum DFSErrorKind {
    CyclicDependency { graph: (String, Box<[String]>) },
}

impl Display for DFSErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DFSErrorKind::CyclicDependency { graph: (name, names) } => {
                write!(f, "Cyclic dependency detected: ")?;
                write!(f, "{name} ")?;
                for name in names {
                    write!(f, "-> ")?;
                    write!(f, "{name} ")?;
                }
            }
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ContainerErrorKind {
    #[error(transparent)]
    Scan(#[from] ScanErrorKind),
    #[error(transparent)]
    Wiring(#[from] WiringErrorKind),
    #[error(transparent)]
    Cycle(#[from] DFSErrorKind),
    #[error(transparent)]
    Resolve(#[from] ResolveErrorKind),
}
