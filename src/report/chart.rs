//! Color bar chart.
//!
//! Draws the three average-color channels as vertical bars on an in-memory
//! RGB canvas, ready to embed in the report document. Channel labels are
//! typeset by the document renderer, not painted into the pixels.

use image::{Rgb, RgbImage};

use crate::config::{CHART_HEIGHT_PX, CHART_WIDTH_PX};

/// Side and bottom padding around the plot area, in pixels.
const MARGIN: u32 = 20;

/// Bar width in pixels.
const BAR_WIDTH: u32 = 70;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);

/// Bar fill colors, one per channel in BGR order.
const BAR_COLORS: [Rgb<u8>; 3] = [
    Rgb([0, 0, 255]),
    Rgb([0, 128, 0]),
    Rgb([255, 0, 0]),
];

/// Render the average-color bar chart.
///
/// Bars are laid out left to right in channel order (blue, green, red) with
/// heights proportional to the channel mean on the full 0-255 scale.
pub fn color_bar_chart(average_color: &[f64; 3]) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(CHART_WIDTH_PX, CHART_HEIGHT_PX, WHITE);

    let baseline = CHART_HEIGHT_PX - MARGIN;
    let plot_height = (CHART_HEIGHT_PX - 2 * MARGIN) as f64;

    // Axis line along the bottom of the plot area.
    fill_rect(&mut canvas, MARGIN / 2, baseline, CHART_WIDTH_PX - MARGIN, 1, AXIS);

    let slot = CHART_WIDTH_PX / 3;
    for (i, (&value, &color)) in average_color.iter().zip(BAR_COLORS.iter()).enumerate() {
        let clamped = value.clamp(0.0, 255.0);
        let bar_height = ((clamped / 255.0) * plot_height).round() as u32;
        if bar_height == 0 {
            continue;
        }
        let x = (i as u32) * slot + (slot - BAR_WIDTH) / 2;
        fill_rect(&mut canvas, x, baseline - bar_height, BAR_WIDTH, bar_height, color);
    }

    canvas
}

/// X positions of the bar centers as fractions of the canvas width, for the
/// renderer to align channel labels under the bars.
pub fn bar_center_fractions() -> [f32; 3] {
    let slot = CHART_WIDTH_PX as f32 / 3.0;
    [
        (slot * 0.5) / CHART_WIDTH_PX as f32,
        (slot * 1.5) / CHART_WIDTH_PX as f32,
        (slot * 2.5) / CHART_WIDTH_PX as f32,
    ]
}

fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x1 = (x + width).min(canvas.width());
    let y1 = (y + height).min(canvas.height());
    for yy in y..y1 {
        for xx in x..x1 {
            canvas.put_pixel(xx, yy, color);
        }
    }
}
