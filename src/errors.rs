mod container;
mod instantiate;
mod resolve;
mod scanner;

pub use container::{ContainerErrorKind, DFSErrorKind, WiringErrorKind};
pub use instantiate::InstantiateErrorKind;
pub use resolve::{InjectErrorKind, ResolveErrorKind};
pub use scanner::ScanErrorKind;
