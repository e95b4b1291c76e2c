use std::ops::Range;

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;
use tracing::{debug, info};
use utilities::format_number;

use crate::mesh::{EdgeSet, Point, PointSet};
use crate::style::PlotStyle;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderErrors {
    #[error("edge {edge} references point {index}, but only {len} points exist")]
    IndexOutOfRange { edge: usize, index: usize, len: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    pub x: Range<f64>,
    pub y: Range<f64>,
}

/// Everything that ends up in the output image: a scatter layer of points and
/// a layer of line segments drawn over it in insertion order.
#[derive(Clone, Debug)]
pub struct Figure {
    points: Vec<Point>,
    segments: Vec<Segment>,
    pub style: PlotStyle,
}

impl Figure {
    pub fn new(style: PlotStyle) -> Self {
        Self { points: Vec::new(), segments: Vec::new(), style }
    }

    pub fn scatter(&mut self, points: &PointSet) {
        self.points
            .extend(points.iter().copied());
    }

    pub fn line(&mut self, from: Point, to: Point) {
        self.segments
            .push(Segment { from, to });
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Data extent with a 5% margin on each side.
    pub fn bounds(&self) -> Bounds {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        let endpoints = self
            .segments
            .iter()
            .flat_map(|s| [s.from, s.to]);
        for p in self
            .points
            .iter()
            .copied()
            .chain(endpoints)
        {
            if p.x.is_finite() {
                x_min = x_min.min(p.x);
                x_max = x_max.max(p.x);
            }
            if p.y.is_finite() {
                y_min = y_min.min(p.y);
                y_max = y_max.max(p.y);
            }
        }

        Bounds { x: padded(x_min, x_max), y: padded(y_min, y_max) }
    }

    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&rgba(&self.style.background))?;

        let bounds = self.bounds();
        debug!(
            "axes x: [{}, {}] y: [{}, {}]",
            format_number(bounds.x.start),
            format_number(bounds.x.end),
            format_number(bounds.y.start),
            format_number(bounds.y.end)
        );

        let mut builder = ChartBuilder::on(root);
        builder.margin(20);
        if let Some(caption) = &self.style.caption {
            builder.caption(caption, ("sans-serif", 30));
        }
        if self.style.axes {
            builder
                .x_label_area_size(40)
                .y_label_area_size(60);
        }
        let mut chart = builder.build_cartesian_2d(bounds.x, bounds.y)?;

        if self.style.axes {
            chart
                .configure_mesh()
                .x_label_formatter(&|v| format_number(*v))
                .y_label_formatter(&|v| format_number(*v))
                .draw()?;
        }

        let edge_style = rgba(&self.style.edge_color).stroke_width(self.style.edge_width);
        chart.draw_series(
            self.segments
                .iter()
                .map(|s| PathElement::new(vec![(s.from.x, s.from.y), (s.to.x, s.to.y)], edge_style)),
        )?;

        let marker_style = rgba(&self.style.marker_color).filled();
        chart.draw_series(
            self.points
                .iter()
                .map(|p| Circle::new((p.x, p.y), self.style.marker_size, marker_style)),
        )?;

        Ok(())
    }
}

fn padded(min: f64, max: f64) -> Range<f64> {
    if min > max {
        // nothing finite to bound
        return -1.0..1.0;
    }
    let span = max - min;
    if span == 0.0 {
        return (min - 1.0)..(max + 1.0);
    }
    let margin = span * 0.05;
    (min - margin)..(max + margin)
}

fn rgba(c: &color::Color) -> RGBAColor {
    let (r, g, b) = c.rgb8();
    RGBAColor(r, g, b, c.alpha())
}

/// Builds the figure for a point set and its edges. Fails without producing a
/// figure if any edge references a point that does not exist.
pub fn render(points: &PointSet, edges: &EdgeSet, style: PlotStyle) -> Result<Figure, RenderErrors> {
    let mut figure = Figure::new(style);
    figure.scatter(points);

    let lookup = |edge: usize, index: usize| {
        points
            .get(index)
            .ok_or(RenderErrors::IndexOutOfRange { edge, index, len: points.len() })
    };

    for (i, edge) in edges
        .iter()
        .enumerate()
    {
        let from = lookup(i, edge.a)?;
        let to = lookup(i, edge.b)?;
        figure.line(from, to);
    }

    info!(
        "rendered {} points and {} segments",
        figure.points.len(),
        figure.segments.len()
    );
    Ok(figure)
}
