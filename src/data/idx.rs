//! IDX3 image / IDX1 label decoding, as shipped by MNIST and its derivatives.
//!
//! ```text
//! IDX3: 00 00 08 03 | N (u32 BE) | rows (u32 BE) | cols (u32 BE) | N*rows*cols bytes
//! IDX1: 00 00 08 01 | N (u32 BE) | N bytes, each a class index
//! ```

use std::path::Path;

use log::debug;

use crate::{
    data::sample::Sample,
    error::{Error, Result},
};

const IMAGE_MAGIC: u32 = 0x0000_0803;
const LABEL_MAGIC: u32 = 0x0000_0801;

/// Which half of the MNIST distribution to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    fn file_names(self) -> (&'static str, &'static str) {
        match self {
            Split::Train => ("train-images.idx3-ubyte", "train-labels.idx1-ubyte"),
            Split::Test => ("t10k-images.idx3-ubyte", "t10k-labels.idx1-ubyte"),
        }
    }
}

fn invalid(msg: String) -> Error {
    Error::InvalidIdx(msg)
}

fn read_be_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Decodes an image/label file pair into samples. Pixels are divided by 255
/// so inputs lie in `[0, 1]`; labels become one-hot vectors of `n_classes`.
pub fn parse_idx_pair(image_bytes: &[u8], label_bytes: &[u8], n_classes: usize) -> Result<Vec<Sample>> {
    if n_classes < 2 {
        return Err(invalid(format!("n_classes must be at least 2, got {n_classes}")));
    }

    // ── Image header ────────────────────────────────────────────────────────

    if image_bytes.len() < 16 {
        return Err(invalid(format!(
            "image file too short: expected at least 16 header bytes, got {}",
            image_bytes.len()
        )));
    }
    let magic = read_be_u32(image_bytes, 0);
    if magic != IMAGE_MAGIC {
        return Err(invalid(format!(
            "image file magic number mismatch (got {magic:#010x}, expected {IMAGE_MAGIC:#010x})"
        )));
    }

    let n_items = read_be_u32(image_bytes, 4) as usize;
    let rows = read_be_u32(image_bytes, 8) as usize;
    let cols = read_be_u32(image_bytes, 12) as usize;

    let n_pixels = rows
        .checked_mul(cols)
        .ok_or_else(|| invalid(format!("rows * cols overflows (rows={rows}, cols={cols})")))?;
    let data_len = n_items
        .checked_mul(n_pixels)
        .and_then(|len| len.checked_add(16))
        .ok_or_else(|| invalid("image data length overflows usize".to_owned()))?;

    if image_bytes.len() < data_len {
        return Err(invalid(format!(
            "image file too short: header declares {n_items} items of {rows}×{cols} pixels, \
             but file is only {} bytes",
            image_bytes.len()
        )));
    }

    // ── Label header ────────────────────────────────────────────────────────

    if label_bytes.len() < 8 {
        return Err(invalid(format!(
            "label file too short: expected at least 8 header bytes, got {}",
            label_bytes.len()
        )));
    }
    let magic = read_be_u32(label_bytes, 0);
    if magic != LABEL_MAGIC {
        return Err(invalid(format!(
            "label file magic number mismatch (got {magic:#010x}, expected {LABEL_MAGIC:#010x})"
        )));
    }

    let label_count = read_be_u32(label_bytes, 4) as usize;
    if label_count != n_items {
        return Err(invalid(format!(
            "image file declares {n_items} items but label file declares {label_count}"
        )));
    }
    if label_bytes.len() < 8 + n_items {
        return Err(invalid(format!(
            "label file too short: header declares {n_items} labels but file is only {} bytes",
            label_bytes.len()
        )));
    }

    // ── Samples ─────────────────────────────────────────────────────────────

    let pixels = image_bytes[16..data_len].chunks_exact(n_pixels.max(1));
    let labels = &label_bytes[8..8 + n_items];

    pixels
        .zip(labels)
        .enumerate()
        .map(|(i, (chunk, &class))| {
            let class = class as usize;
            if class >= n_classes {
                return Err(invalid(format!(
                    "label at index {i}: class {class} is out of range for n_classes={n_classes}"
                )));
            }
            let input = chunk.iter().map(|&px| px as f64 / 255.0).collect();
            let mut target = vec![0.0; n_classes];
            target[class] = 1.0;
            Ok(Sample::new(input, target))
        })
        .collect()
}

/// Reads one MNIST split from `dir` (the four files keep their upstream names).
pub fn load_mnist(dir: &Path, split: Split) -> Result<Vec<Sample>> {
    let (images, labels) = split.file_names();
    let image_bytes = std::fs::read(dir.join(images))?;
    let label_bytes = std::fs::read(dir.join(labels))?;

    let samples = parse_idx_pair(&image_bytes, &label_bytes, 10)?;
    debug!("decoded {} {:?} samples from {}", samples.len(), split, dir.display());
    Ok(samples)
}
