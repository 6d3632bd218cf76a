//! Drawing a partition on a world map.
//!
//! The clustering core knows nothing about pixels. A [`Renderer`] receives the
//! final [`Partition`], the [`Catalog`] it was built from and a [`Palette`],
//! and draws one marker per point using its group's color.
//!
//! [`SvgRenderer`] is the bundled implementation. It projects longitude and
//! latitude equirectangularly onto a canvas (1800 × 900 by default, the size
//! of the usual world-map backdrop) and writes a standalone SVG document.

use std::io::Write;

use tracing::debug;

use crate::catalog::{Catalog, Partition};
use crate::error::{Error, Result};

/// Something that can draw a clustering result.
pub trait Renderer {
    /// Draw every identifier in `partition`, coloring group `i` with
    /// `palette.color(i)`.
    fn render(&mut self, partition: &Partition, catalog: &Catalog, palette: &Palette) -> Result<()>;
}

/// Ordered marker colors, one per group index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Build a palette. Fails if `colors` is empty.
    pub fn new<I, S>(colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Err(Error::InvalidParameter {
                name: "palette",
                message: "must contain at least one color",
            });
        }
        Ok(Self { colors })
    }

    /// Color for group `index`. Wraps around when there are more groups than
    /// colors.
    pub fn color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: ["red", "green", "blue", "orange", "cyan", "yellow"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Equirectangular lon/lat to canvas mapping.
///
/// Longitude -180..180 maps to x 0..width, latitude 90..-90 to y 0..height,
/// so north is up and the origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    width: f64,
    height: f64,
}

impl Projection {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::InvalidParameter {
                name: "projection",
                message: "width and height must be positive",
            });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Canvas position of `(lon, lat)`.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = (lon + 180.0) / 360.0 * self.width;
        let y = (90.0 - lat) / 180.0 * self.height;
        (x, y)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            width: 1800.0,
            height: 900.0,
        }
    }
}

/// Writes the partition as an SVG document.
#[derive(Debug)]
pub struct SvgRenderer<W> {
    out: W,
    projection: Projection,
    background: Option<String>,
    radius: f64,
}

impl<W: Write> SvgRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            projection: Projection::default(),
            background: None,
            radius: 3.0,
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Stretch the image at `href` (e.g. a world map) across the canvas.
    pub fn with_background(mut self, href: impl Into<String>) -> Self {
        self.background = Some(href.into());
        self
    }

    /// Marker radius in canvas units.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Resolve every member to canvas coordinates before anything is written.
    fn layout(&self, partition: &Partition, catalog: &Catalog) -> Result<Vec<Vec<(f64, f64)>>> {
        partition
            .groups()
            .iter()
            .map(|members| {
                members
                    .iter()
                    .map(|&id| {
                        let point = catalog.get(id).ok_or(Error::UnknownIdentifier(id))?;
                        match point {
                            [lon, lat, ..] => Ok(self.projection.project(*lon, *lat)),
                            _ => Err(Error::DimensionMismatch {
                                expected: 2,
                                found: point.len(),
                            }),
                        }
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect()
    }
}

impl<W: Write> Renderer for SvgRenderer<W> {
    fn render(&mut self, partition: &Partition, catalog: &Catalog, palette: &Palette) -> Result<()> {
        let groups = self.layout(partition, catalog)?;
        let (w, h) = (self.projection.width(), self.projection.height());

        writeln!(
            self.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        if let Some(href) = &self.background {
            writeln!(
                self.out,
                r#"<image href="{}" x="0" y="0" width="{w}" height="{h}" preserveAspectRatio="none"/>"#,
                escape(href)
            )?;
        }
        for (index, markers) in groups.iter().enumerate() {
            writeln!(
                self.out,
                r#"<g fill="{}" data-cluster="{index}">"#,
                escape(palette.color(index))
            )?;
            for (x, y) in markers {
                writeln!(
                    self.out,
                    r#"<circle cx="{x:.2}" cy="{y:.2}" r="{}"/>"#,
                    self.radius
                )?;
            }
            writeln!(self.out, "</g>")?;
        }
        writeln!(self.out, "</svg>")?;
        self.out.flush()?;

        debug!(groups = groups.len(), "rendered svg");
        Ok(())
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
