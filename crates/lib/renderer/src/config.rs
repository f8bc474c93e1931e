use crate::{backend::Color, surface::RenderMode};
use serde::Deserialize;
use std::{
    io::BufReader,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const CONFIG_ENV_VAR: &str = "HELLO_TRIANGLE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not open config at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub render_mode: RenderMode,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "hello-triangle".to_owned(),
            width: 1280,
            height: 1280,
            vsync: true,
            render_mode: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    pub clear_color: Color,
    /// Query and log compile/link status. Failures are never fatal.
    pub validate_shaders: bool,
    pub delete_shaders_after_link: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub window: WindowConfig,
    pub renderer: RendererConfig,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Config path from the first command-line argument, falling back to
    /// [`CONFIG_ENV_VAR`].
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR))
            .map(PathBuf::from)
    }
}
