use thiserror::Error;

#[derive(Error, Debug)]
pub enum WolframError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parsing error: {0}")]
    Parse(String),

    #[error("Error {code}: {msg}")]
    Api { code: String, msg: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<quick_xml::Error> for WolframError {
    fn from(e: quick_xml::Error) -> Self {
        WolframError::Parse(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for WolframError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        WolframError::Parse(e.to_string())
    }
}
