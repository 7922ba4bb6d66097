use super::Point;

/// Walks the integer Bresenham line from `from` to `to`, both ends included.
pub fn bresenham(from: Point, to: Point, mut visit: impl FnMut(Point)) {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (from.x, from.y);

    loop {
        visit(Point::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = err * 2;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Calls `plot` once per mask offset around `at`.
pub fn stamp(at: Point, mask: &[(i32, i32)], mut plot: impl FnMut(i32, i32)) {
    for &(dx, dy) in mask {
        plot(at.x + dx, at.y + dy);
    }
}

/// Stamps the full mask at every lattice point of the line, so coverage has
/// no gaps whatever the slope or distance between samples.
pub fn stamp_line(from: Point, to: Point, mask: &[(i32, i32)], mut plot: impl FnMut(i32, i32)) {
    bresenham(from, to, |p| stamp(p, mask, &mut plot));
}
