use std::path::Path;

use eyre::WrapErr;
use image::{ImageFormat, Rgb, RgbImage};
use tracing::info;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 500;
pub const BIN_COUNT: usize = 10;

const RANGE_MIN: f64 = 1.0;
const RANGE_MAX: f64 = 10.0;

const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 30;
const MARGIN_BOTTOM: u32 = 50;

const BACKGROUND: Rgb<u8> = Rgb([245, 245, 245]);
const BAR_FILL: Rgb<u8> = Rgb([135, 206, 235]);
const OUTLINE: Rgb<u8> = Rgb([40, 40, 40]);
const GRID: Rgb<u8> = Rgb([210, 210, 210]);

/// Render a fixed-bin frequency histogram of the given ratings and write it
/// to `path` as PNG (PNG is also the fallback when the extension is unknown).
pub fn render(ratings: &[f64], path: &Path) -> eyre::Result<()> {
    if path.as_os_str().is_empty() {
        return Err(eyre::eyre!("histogram filename cannot be empty"));
    }

    let image = draw(&bin_counts(ratings));
    let result = match ImageFormat::from_path(path) {
        Ok(_) => image.save(path),
        Err(_) => image.save_with_format(path, ImageFormat::Png),
    };
    result.wrap_err_with(|| format!("write histogram: {}", path.display()))?;
    info!(path = %path.display(), samples = ratings.len(), "histogram saved");
    Ok(())
}

/// Ten equal bins spanning [1, 10]; the last bin is right-inclusive and
/// out-of-range samples are dropped.
pub fn bin_counts(ratings: &[f64]) -> [usize; BIN_COUNT] {
    let bin_width = (RANGE_MAX - RANGE_MIN) / BIN_COUNT as f64;
    let mut counts = [0; BIN_COUNT];
    for &rating in ratings {
        if !(RANGE_MIN..=RANGE_MAX).contains(&rating) {
            continue;
        }
        let index = (((rating - RANGE_MIN) / bin_width) as usize).min(BIN_COUNT - 1);
        counts[index] += 1;
    }
    counts
}

fn draw(counts: &[usize; BIN_COUNT]) -> RgbImage {
    let mut image = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    let plot_left = MARGIN_LEFT;
    let plot_right = WIDTH - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = HEIGHT - MARGIN_BOTTOM;
    let plot_height = (plot_bottom - plot_top) as f64;
    let max_count = counts.iter().copied().max().unwrap_or(0).max(1);

    // horizontal gridlines at quarter intervals
    for step in 1..=4 {
        let y = plot_bottom - (plot_height * step as f64 / 4.0) as u32;
        horizontal_line(&mut image, plot_left, plot_right, y, GRID);
    }

    let bar_width = (plot_right - plot_left) / BIN_COUNT as u32;
    for (bin, &count) in counts.iter().enumerate() {
        let x0 = plot_left + bin as u32 * bar_width;
        let x1 = x0 + bar_width;
        let bar_height = (plot_height * count as f64 / max_count as f64) as u32;
        if bar_height == 0 {
            continue;
        }
        let y0 = plot_bottom - bar_height;
        fill_rect(&mut image, x0, y0, x1, plot_bottom, BAR_FILL);
        outline_rect(&mut image, x0, y0, x1, plot_bottom, OUTLINE);
    }

    // axes and per-bin tick marks
    horizontal_line(&mut image, plot_left, plot_right, plot_bottom, OUTLINE);
    vertical_line(&mut image, plot_left, plot_top, plot_bottom, OUTLINE);
    for bin in 0..=BIN_COUNT {
        let x = (plot_left + bin as u32 * bar_width).min(plot_right - 1);
        vertical_line(&mut image, x, plot_bottom, plot_bottom + 6, OUTLINE);
    }

    image
}

fn fill_rect(image: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, color);
        }
    }
}

fn outline_rect(image: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    horizontal_line(image, x0, x1, y0, color);
    horizontal_line(image, x0, x1, y1.min(HEIGHT - 1), color);
    vertical_line(image, x0, y0, y1, color);
    vertical_line(image, x1.min(WIDTH - 1), y0, y1, color);
}

fn horizontal_line(image: &mut RgbImage, x0: u32, x1: u32, y: u32, color: Rgb<u8>) {
    for x in x0..x1 {
        image.put_pixel(x, y, color);
    }
}

fn vertical_line(image: &mut RgbImage, x: u32, y0: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(HEIGHT) {
        image.put_pixel(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_range_and_drop_outliers() {
        // bin width 0.9: [1.0, 1.9) | [1.9, 2.8) | ... | [9.1, 10.0]
        let counts = bin_counts(&[1.0, 1.5, 2.0, 9.5, 10.0, 0.5, 10.5]);
        assert_eq!(counts[0], 2);
        assert_eq!(counts[1], 1);
        assert_eq!(counts[9], 2);
        assert_eq!(counts.iter().sum::<usize>(), 5);
    }

    #[test]
    fn empty_sample_draws_without_bars() {
        let image = draw(&[0; BIN_COUNT]);
        assert_eq!(image.dimensions(), (WIDTH, HEIGHT));
    }
}
