use alloc::{boxed::Box, string::String};

use super::instantiate::InstantiateErrorKind;
use crate::post_processor::Stage;

#[derive(thiserror::Error, Debug)]
pub enum InjectErrorKind {
    #[error("Field `{field}` isn't a dependency slot")]
    UnknownField { field: String },
    #[error("Field `{field}` expects `{expected}`, but component of type `{actual}` doesn't expose it")]
    IncorrectType {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("No component registered with name `{name}`")]
    NoSuchComponent { name: String },
    #[error("Component `{name}` can't be instantiated")]
    Instantiate {
        name: String,
        #[source]
        kind: InstantiateErrorKind,
    },
    #[error("Dependency `{field}` of component `{name}` can't be resolved")]
    Dependency {
        name: String,
        field: &'static str,
        #[source]
        err: Box<ResolveErrorKind>,
    },
    #[error("Dependency of component `{name}` can't be injected")]
    Inject {
        name: String,
        #[source]
        kind: InjectErrorKind,
    },
    #[error("Initialization of component `{name}` failed: {err}")]
    Initialization { name: String, err: anyhow::Error },
    #[error("{stage} post-processing of component `{name}` failed: {err}")]
    PostProcess { name: String, stage: Stage, err: anyhow::Error },
    #[error("Component `{name}` of type `{actual}` doesn't expose `{expected}`")]
    IncorrectType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}
