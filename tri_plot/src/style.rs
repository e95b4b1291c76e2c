use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use color::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleErrors {
    #[error("could not read style file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse style file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("style file {} sets a {width}x{height} image, both sides must be positive", .path.display())]
    ZeroSize {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

/// Appearance of the rendered figure. Every field may be omitted from a style file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub caption: Option<String>,
    pub background: Color,
    pub marker_color: Color,
    pub marker_size: u32,
    pub edge_color: Color,
    pub edge_width: u32,
    pub axes: bool,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            caption: None,
            background: Color::WHITE,
            marker_color: Color::TAB_BLUE,
            marker_size: 3,
            edge_color: Color::RED,
            edge_width: 1,
            axes: true,
        }
    }
}

impl PlotStyle {
    pub fn from_file(path: &Path) -> Result<Self, StyleErrors> {
        let content = fs::read_to_string(path)
            .map_err(|source| StyleErrors::Io { path: path.to_path_buf(), source })?;
        let style: Self = ron::from_str(&content)
            .map_err(|source| StyleErrors::Parse { path: path.to_path_buf(), source })?;
        if style.width == 0 || style.height == 0 {
            return Err(StyleErrors::ZeroSize {
                path: path.to_path_buf(),
                width: style.width,
                height: style.height,
            });
        }
        Ok(style)
    }

    /// Style without any text, so drawing needs no fonts.
    pub fn plain() -> Self {
        Self { caption: None, axes: false, ..Default::default() }
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = Some(caption.to_string());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
