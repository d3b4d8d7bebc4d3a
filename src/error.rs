use thiserror::Error;

pub type ChannelResult<T> = Result<T, ChannelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    #[error("Invalid voltage range: vmin={vmin}, vmax={vmax}, ndivs={ndivs}")]
    InvalidRange { vmin: f64, vmax: f64, ndivs: usize },

    #[error("Channel {channel} is missing parameter: {parameter}")]
    MissingParameter { channel: String, parameter: String },

    #[error("Unknown channel type: {0}")]
    UnknownChannelType(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ChannelError {
    pub(crate) fn missing(channel: &str, parameter: &str) -> Self {
        ChannelError::MissingParameter {
            channel: channel.to_owned(),
            parameter: parameter.to_owned(),
        }
    }
}

impl From<toml::de::Error> for ChannelError {
    fn from(err: toml::de::Error) -> Self {
        ChannelError::Config(err.to_string())
    }
}

impl From<std::io::Error> for ChannelError {
    fn from(err: std::io::Error) -> Self {
        ChannelError::Config(err.to_string())
    }
}
