/// Pixel offsets painted around the cursor for a brush of `size`.
///
/// Sizes below 4 use hand-made shapes; a computed disk reads poorly at those
/// radii. Size 0 behaves like size 1.
pub fn brush_mask(size: u32) -> Vec<(i32, i32)> {
    match size {
        0 | 1 => vec![(0, 0)],
        2 => vec![(-1, -1), (0, -1), (-1, 0), (0, 0)],
        3 => vec![(-1, 0), (0, 0), (0, -1), (1, 0), (0, 1)],
        _ => disk_mask(size),
    }
}

fn disk_mask(size: u32) -> Vec<(i32, i32)> {
    let radius = f64::from(size) / 2.0;
    let center = (f64::from(size) - 1.0) / 2.0;
    let half = (size / 2) as i32;

    let mut mask = Vec::new();
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let dx = f64::from(x) - center;
            let dy = f64::from(y) - center;
            if dx * dx + dy * dy <= radius * radius {
                mask.push((x - half, y - half));
            }
        }
    }
    mask
}
