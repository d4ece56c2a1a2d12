//! PNG export of tile outlines, histograms and vertex density

use crate::analysis::histogram::{DensityGrid, Histogram};
use crate::analysis::statistics::Statistic;
use crate::catalog::Mesh;
use crate::io::error::{Result, TilingError, invalid_parameter};
use crate::spatial::point::Point;
use image::{GrayImage, ImageBuffer, Luma, Pixel, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BAR: Rgba<u8> = Rgba([70, 110, 180, 255]);
const AXIS: Rgba<u8> = Rgba([40, 40, 40, 255]);

// Outline colours, assigned to prototypes in order of first appearance
const PALETTE: [[u8; 4]; 6] = [
    [200, 40, 40, 255],
    [40, 90, 200, 255],
    [230, 160, 20, 255],
    [30, 150, 70, 255],
    [140, 60, 170, 255],
    [90, 90, 90, 255],
];

/// `<dir>/<tiling>-N.<steps>-tiling.png`
pub fn tiling_image_path(dir: &Path, tiling: &str, steps: usize) -> PathBuf {
    dir.join(format!("{tiling}-N.{steps:03}-tiling.png"))
}

/// `<dir>/<tiling>-NUMBINS.<bins>-N.<steps>-<statistic>.png`
pub fn histogram_image_path(
    dir: &Path,
    tiling: &str,
    bins: usize,
    steps: usize,
    statistic: Statistic,
) -> PathBuf {
    dir.join(format!(
        "{tiling}-NUMBINS.{bins:06}-N.{steps:03}-{}.png",
        statistic.key()
    ))
}

/// `<dir>/<tiling>-N.<steps>-density.png`
pub fn density_image_path(dir: &Path, tiling: &str, steps: usize) -> PathBuf {
    dir.join(format!("{tiling}-N.{steps:03}-density.png"))
}

fn bounds(mesh: &Mesh) -> Option<(Point<f64>, Point<f64>)> {
    mesh.tiles
        .iter()
        .flat_map(|tile| tile.outline.iter())
        .filter(|p| p.is_finite())
        .fold(None, |acc, &p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )),
        })
}

fn draw_segment<P: Pixel>(
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    from: (f64, f64),
    to: (f64, f64),
    color: P,
) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = f64::from(i) / f64::from(steps);
        let (x, y) = (from.0 + dx * t, from.1 + dy * t);
        if x < 0.0 || y < 0.0 {
            continue;
        }
        if let Some(pixel) = image.get_pixel_mut_checked(x.round() as u32, y.round() as u32) {
            *pixel = color;
        }
    }
}

/// Draw every tile outline, scaled to fit a square image with a margin
///
/// # Errors
///
/// Returns `InvalidParameter` if the mesh has no finite vertex or the margin
/// leaves no room to draw
pub fn render_mesh(mesh: &Mesh, size: u32, margin: u32) -> Result<RgbaImage> {
    let (lower, upper) = bounds(mesh)
        .ok_or_else(|| invalid_parameter("mesh", &mesh.name, &"no finite vertices to draw"))?;
    let drawable = size.saturating_sub(2 * margin);
    if drawable == 0 {
        return Err(invalid_parameter("margin", &margin, &"leaves no room to draw"));
    }
    let extent = (upper.x - lower.x).max(upper.y - lower.y);
    let scale = if extent > 0.0 {
        f64::from(drawable - 1) / extent
    } else {
        1.0
    };
    // Image rows grow downwards
    let to_pixel = |p: Point<f64>| {
        (
            f64::from(margin) + (p.x - lower.x) * scale,
            f64::from(margin) + (upper.y - p.y) * scale,
        )
    };

    let mut image = RgbaImage::from_pixel(size, size, BACKGROUND);
    let mut prototypes: Vec<&str> = Vec::new();
    for tile in &mesh.tiles {
        let seen = prototypes.iter().position(|&name| name == tile.prototype);
        let slot = seen.unwrap_or_else(|| {
            prototypes.push(tile.prototype);
            prototypes.len() - 1
        });
        let color = Rgba(PALETTE.get(slot % PALETTE.len()).copied().unwrap_or([0, 0, 0, 255]));
        let outline = &tile.outline;
        for (start, end) in outline.iter().zip(outline.iter().cycle().skip(1)) {
            draw_segment(&mut image, to_pixel(*start), to_pixel(*end), color);
        }
    }
    Ok(image)
}

/// Bar chart of a histogram, bar heights scaled to the tallest bin
pub fn render_histogram(histogram: &Histogram, width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);
    let tallest = histogram.counts().iter().copied().max().unwrap_or(0);
    let bins = histogram.bins() as f64;
    let plot_height = f64::from(height.saturating_sub(1));

    if tallest > 0 {
        for (bin, &count) in histogram.counts().iter().enumerate() {
            let left = (bin as f64 / bins * f64::from(width)).floor() as u32;
            let right = (((bin + 1) as f64 / bins * f64::from(width)).ceil() as u32).min(width);
            let bar = (count as f64 / tallest as f64 * plot_height).round() as u32;
            for x in left..right {
                for y in height.saturating_sub(bar)..height {
                    if let Some(pixel) = image.get_pixel_mut_checked(x, y) {
                        *pixel = BAR;
                    }
                }
            }
        }
    }

    let baseline = f64::from(height.saturating_sub(1));
    draw_segment(&mut image, (0.0, baseline), (f64::from(width), baseline), AXIS);
    image
}

/// Greyscale heat map, darker cells hold more vertices
pub fn render_density(grid: &DensityGrid) -> GrayImage {
    let side = u32::try_from(grid.resolution()).unwrap_or(u32::MAX);
    let peak = grid.max_count().max(1) as f64;
    let mut image = GrayImage::from_pixel(side, side, Luma([255]));
    for ((row, col), &count) in grid.counts().indexed_iter() {
        let shade = 255.0 - (count as f64 / peak * 255.0);
        let (Ok(x), Ok(y)) = (u32::try_from(col), u32::try_from(row)) else {
            continue;
        };
        if let Some(pixel) = image.get_pixel_mut_checked(x, y) {
            *pixel = Luma([shade.round() as u8]);
        }
    }
    image
}

/// Save any image buffer, creating parent directories first
///
/// # Errors
///
/// Returns `FileSystem` if a directory cannot be created and `ImageExport` if
/// encoding or writing fails
pub fn save<P>(image: &ImageBuffer<P, Vec<P::Subpixel>>, path: &Path) -> Result<()>
where
    P: Pixel + image::PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| TilingError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    image.save(path).map_err(|e| TilingError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "image written");
    Ok(())
}
