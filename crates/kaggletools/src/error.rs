#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Missing Kaggle credentials: {0}")]
    MissingCredentials(String),

    #[error("Network error: {0}")]
    Network(String),
}
