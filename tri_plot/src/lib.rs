use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

pub mod figure;
pub mod loader;
pub mod mesh;
pub mod style;
pub mod writer;

use figure::{RenderErrors, render};
use loader::{CountPolicy, LoaderErrors, load_edges, load_points};
use style::{PlotStyle, StyleErrors};
use writer::{WriterErrors, save};

#[derive(Debug, Error)]
pub enum TriPlotErrors {
    #[error("LoaderErrors: {0}")]
    LoaderErrors(#[from] LoaderErrors),
    #[error("RenderErrors: {0}")]
    RenderErrors(#[from] RenderErrors),
    #[error("StyleErrors: {0}")]
    StyleErrors(#[from] StyleErrors),
    #[error("WriterErrors: {0}")]
    WriterErrors(#[from] WriterErrors),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub count: usize,
    pub points_path: PathBuf,
    pub edges_path: PathBuf,
    pub output_path: PathBuf,
    pub policy: CountPolicy,
    pub style: Option<PathBuf>,
}

impl Config {
    /// Default file locations, relative to the working directory.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            points_path: PathBuf::from("results/points.txt"),
            edges_path: PathBuf::from("results/edges.txt"),
            output_path: PathBuf::from("tri.png"),
            policy: CountPolicy::ZeroFill,
            style: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub points: usize,
    pub edges: usize,
    pub output: PathBuf,
}

/// Loads points and edges, renders them, and writes the image. Nothing is
/// written unless every earlier stage succeeded.
pub fn run(config: &Config) -> Result<Summary, TriPlotErrors> {
    let style = match &config.style {
        Some(path) => {
            info!("using style from {}", path.display());
            PlotStyle::from_file(path)?
        }
        None => PlotStyle::default(),
    };

    let points = load_points(&config.points_path, config.count, config.policy)?;
    let edges = load_edges(&config.edges_path)?;
    let figure = render(&points, &edges, style)?;
    save(&figure, &config.output_path)?;

    Ok(Summary {
        points: points.len(),
        edges: edges.len(),
        output: config.output_path.clone(),
    })
}
