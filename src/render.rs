//! Diagnostic images: per-dimension heatmaps and the U-matrix.

use crate::error::Result;
use crate::map::Som;
use image::{Rgb, RgbImage};

/// Renders one grayscale heatmap per weight dimension.
///
/// Each node is drawn as a `cell x cell` square shaded by where its weight
/// sits in that dimension's range across the lattice (black at the minimum,
/// white at the maximum).
pub fn dimension_maps(som: &Som, cell: u32) -> Result<Vec<RgbImage>> {
    let table = som.weights_table()?;
    let dimensions = som.dimensions()?;

    let mut images = Vec::with_capacity(dimensions);

    for i in 0..dimensions {
        let min = table.minimums()[i];
        let span = table.maximums()[i] - min;

        let mut image = RgbImage::new(som.width as u32 * cell, som.height as u32 * cell);

        for node in &som.nodes {
            let shade = if span > 0.0 {
                (((node.weights[i] - min) / span) * 255.0) as u8
            } else {
                0
            };
            fill_cell(&mut image, node.x as u32, node.y as u32, cell, shade);
        }

        images.push(image);
    }

    Ok(images)
}

/// Renders the unified distance matrix.
///
/// Each node is shaded by its mean weight-space distance to its 4-connected
/// grid neighbors, normalized over the lattice; large distances (cluster
/// boundaries) render dark.
pub fn u_matrix(som: &Som, cell: u32) -> Result<RgbImage> {
    som.dimensions()?;

    let mut values = Vec::with_capacity(som.nodes.len());

    for node in &som.nodes {
        let mut distances = Vec::with_capacity(4);

        let mut measure = |x: usize, y: usize| {
            if let Some(neighbor) = som.node(x, y) {
                distances.push(som.distance.measure(&node.weights, &neighbor.weights));
            }
        };

        if node.x > 0 {
            measure(node.x - 1, node.y);
        }
        measure(node.x + 1, node.y);
        if node.y > 0 {
            measure(node.x, node.y - 1);
        }
        measure(node.x, node.y + 1);

        let mean = if distances.is_empty() {
            0.0
        } else {
            distances.iter().sum::<f64>() / distances.len() as f64
        };
        values.push(mean);
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let mut image = RgbImage::new(som.width as u32 * cell, som.height as u32 * cell);

    for (node, value) in som.nodes.iter().zip(values.iter()) {
        let shade = if span > 0.0 {
            255 - (((value - min) / span) * 255.0) as u8
        } else {
            255
        };
        fill_cell(&mut image, node.x as u32, node.y as u32, cell, shade);
    }

    Ok(image)
}

fn fill_cell(image: &mut RgbImage, x: u32, y: u32, cell: u32, shade: u8) {
    for dy in 0..cell {
        for dx in 0..cell {
            image.put_pixel(x * cell + dx, y * cell + dy, Rgb([shade, shade, shade]));
        }
    }
}
