use alloc::string::String;

use super::instantiate::InstantiateErrorKind;

#[derive(thiserror::Error, Debug)]
pub enum ScanErrorKind {
    #[error("Namespace `{namespace}` not found in catalog")]
    NamespaceNotFound { namespace: String },
    #[error("Post-processor `{name}` can't be instantiated")]
    Instantiate {
        name: &'static str,
        #[source]
        kind: InstantiateErrorKind,
    },
    #[error("Component `{name}` has unknown scope `{scope}`. Expected `singleton` or `prototype`")]
    UnknownScope { name: &'static str, scope: &'static str },
    #[error("Component name `{name}` is claimed by more than one type")]
    DuplicateName { name: &'static str },
}
