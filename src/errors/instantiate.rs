#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error("Type `{type_name}` has no zero-argument constructor")]
    NoConstructor { type_name: &'static str },
    #[error("Constructor of `{type_name}` failed: {err}")]
    Constructor { type_name: &'static str, err: anyhow::Error },
}
