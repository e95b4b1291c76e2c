use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::mesh::{Edge, EdgeSet, Point, PointSet};

#[derive(Debug, Error, PartialEq)]
pub enum ParseErrors {
    #[error("expected two space-separated values, found {0:?}")]
    MissingToken(String),
    #[error("could not parse {0:?} as a number")]
    InvalidNumber(String),
}

#[derive(Debug, Error)]
pub enum LoaderErrors {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}:{line}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: ParseErrors,
    },
    #[error("point count must be positive")]
    ZeroCount,
    #[error("{} has more than {count} points", .path.display())]
    TooManyPoints { path: PathBuf, count: usize },
    #[error("{} has {found} points, expected {count}", .path.display())]
    TooFewPoints {
        path: PathBuf,
        found: usize,
        count: usize,
    },
}

/// What to do when the points file is shorter than the declared count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CountPolicy {
    /// Unread entries stay at (0, 0).
    #[default]
    ZeroFill,
    Strict,
}

pub fn parse_point_line(line: &str) -> Result<Point, ParseErrors> {
    let (x, y) = parse_pair::<f64>(line)?;
    Ok(Point::new(x, y))
}

pub fn parse_edge_line(line: &str) -> Result<Edge, ParseErrors> {
    let (a, b) = parse_pair::<usize>(line)?;
    Ok(Edge::new(a, b))
}

// split on a single space, only the first two tokens count
fn parse_pair<T: FromStr>(line: &str) -> Result<(T, T), ParseErrors> {
    let mut tokens = line.split(' ');
    let first = tokens.next().unwrap_or_default();
    let second = tokens
        .next()
        .ok_or_else(|| ParseErrors::MissingToken(line.to_string()))?;
    Ok((parse_token(first)?, parse_token(second)?))
}

fn parse_token<T: FromStr>(token: &str) -> Result<T, ParseErrors> {
    token
        .trim()
        .parse()
        .map_err(|_| ParseErrors::InvalidNumber(token.to_string()))
}

fn open(path: &Path) -> Result<BufReader<File>, LoaderErrors> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoaderErrors::Io { path: path.to_path_buf(), source })
}

/// Reads `count` points from `path`, one "x y" pair per line.
///
/// Storage for exactly `count` points is allocated up front. A file with more
/// lines than that is an error. A file with fewer lines is handled according
/// to `policy`.
pub fn load_points(
    path: &Path,
    count: usize,
    policy: CountPolicy,
) -> Result<PointSet, LoaderErrors> {
    if count == 0 {
        return Err(LoaderErrors::ZeroCount);
    }

    let mut points = vec![Point::default(); count];
    let mut read = 0;

    for (i, line) in open(path)?
        .lines()
        .enumerate()
    {
        let line = line.map_err(|source| LoaderErrors::Io { path: path.to_path_buf(), source })?;
        if i >= count {
            return Err(LoaderErrors::TooManyPoints { path: path.to_path_buf(), count });
        }
        points[i] = parse_point_line(&line).map_err(|source| LoaderErrors::Parse {
            path: path.to_path_buf(),
            line: i + 1,
            source,
        })?;
        read = i + 1;
    }

    if read < count {
        match policy {
            CountPolicy::Strict => {
                return Err(LoaderErrors::TooFewPoints {
                    path: path.to_path_buf(),
                    found: read,
                    count,
                });
            }
            CountPolicy::ZeroFill => warn!(
                "{} has {read} of {count} points, remaining {} left at (0, 0)",
                path.display(),
                count - read
            ),
        }
    }

    info!("loaded {read} of {count} points from {}", path.display());
    Ok(PointSet(points))
}

/// Reads all edges from `path`, one "a b" index pair per line.
pub fn load_edges(path: &Path) -> Result<EdgeSet, LoaderErrors> {
    let mut edges = Vec::new();

    for (i, line) in open(path)?
        .lines()
        .enumerate()
    {
        let line = line.map_err(|source| LoaderErrors::Io { path: path.to_path_buf(), source })?;
        let edge = parse_edge_line(&line).map_err(|source| LoaderErrors::Parse {
            path: path.to_path_buf(),
            line: i + 1,
            source,
        })?;
        debug!("edge {i}: {} -> {}", edge.a, edge.b);
        edges.push(edge);
    }

    info!("loaded {} edges from {}", edges.len(), path.display());
    Ok(EdgeSet(edges))
}
