use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned integer rectangle. `right` and `top` are exclusive, so a rectangle with zero
/// width or height covers no cells.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_min_and_size(min: Point, width: i32, height: i32) -> Self {
        Rect::new(min.x, min.y, width, height)
    }

    /// Smallest rectangle covering both corner cells.
    pub fn spanning(a: Point, b: Point) -> Self {
        let min = Point::new(a.x.min(b.x), a.y.min(b.y));
        let max = Point::new(a.x.max(b.x), a.y.max(b.y));

        Rect::new(min.x, min.y, max.x - min.x + 1, max.y - min.y + 1)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y
    }

    pub fn top(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Squared distance between the centers of two rectangles, in doubled coordinates so it
    /// stays exact. Only meaningful for comparing distances against each other.
    pub fn doubled_center_distance_sq(&self, other: &Rect) -> i64 {
        let dx = i64::from(2 * self.x + self.width) - i64::from(2 * other.x + other.width);
        let dy = i64::from(2 * self.y + self.height) - i64::from(2 * other.y + other.height);

        dx * dx + dy * dy
    }

    pub fn center_distance(&self, other: &Rect) -> f32 {
        (self.doubled_center_distance_sq(other) as f32).sqrt() / 2.0
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.bottom() >= self.bottom()
            && other.top() <= self.top()
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.bottom() && p.y < self.top()
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        other.left() < self.right()
            && other.right() > self.left()
            && other.bottom() < self.top()
            && other.top() > self.bottom()
    }

    /// Grows the rectangle outward by `by` on every side.
    pub fn padded(&self, by: i32) -> Rect {
        Rect::new(
            self.x - by,
            self.y - by,
            self.width + 2 * by,
            self.height + 2 * by,
        )
    }

    pub fn points(&self) -> impl Iterator<Item = Point> {
        let Rect {
            x,
            y,
            width,
            height,
        } = *self;

        (y..y + height).flat_map(move |py| (x..x + width).map(move |px| Point::new(px, py)))
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
