use crate::units::*;

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (typically, lower-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (typically, lower-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (typically, upper-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (typically, upper-right) corner.
    pub y2: Pt,
}

impl Rect {
    pub fn new(x1: Pt, y1: Pt, x2: Pt, y2: Pt) -> Rect {
        Rect { x1, y1, x2, y2 }
    }

    /// A rectangle covering a full page of the given size, with its origin
    /// at the bottom-left.
    pub fn from_page_size(size: crate::pagesize::PageSize) -> Rect {
        Rect {
            x1: Pt(0.0),
            y1: Pt(0.0),
            x2: size.0,
            y2: size.1,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    /// The center point of the rectangle.
    pub fn center(&self) -> (Pt, Pt) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Shrink the rectangle by `amount` on every side.
    pub fn inset<D: Into<Pt>>(&self, amount: D) -> Rect {
        let amount: Pt = amount.into();
        Rect {
            x1: self.x1 + amount,
            y1: self.y1 + amount,
            x2: self.x2 - amount,
            y2: self.y2 - amount,
        }
    }

    /// Partition the rectangle into a `rows` × `cols` grid of equal cells,
    /// iterated in reading order: left to right, top row first. This matches
    /// how text units are typically assigned to cells.
    pub fn cells(&self, rows: usize, cols: usize) -> Cells {
        Cells {
            rect: *self,
            rows,
            cols,
            index: 0,
        }
    }
}

/// Iterator over the cells of a grid partition, see [Rect::cells].
#[derive(Debug, Clone)]
pub struct Cells {
    rect: Rect,
    rows: usize,
    cols: usize,
    index: usize,
}

impl Iterator for Cells {
    type Item = Rect;

    fn next(&mut self) -> Option<Rect> {
        if self.rows == 0 || self.cols == 0 || self.index >= self.rows * self.cols {
            return None;
        }
        let row = self.index / self.cols;
        let col = self.index % self.cols;
        self.index += 1;

        let width = self.rect.width();
        let height = self.rect.height();
        // cells are numbered from the top edge down, so the top-left cell
        // comes first even though page coordinates grow upwards
        Some(Rect {
            x1: self.rect.x1 + width * (col as f32 / self.cols as f32),
            y1: self.rect.y2 - height * ((row + 1) as f32 / self.rows as f32),
            x2: self.rect.x1 + width * ((col + 1) as f32 / self.cols as f32),
            y2: self.rect.y2 - height * (row as f32 / self.rows as f32),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.rows * self.cols).saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cells {}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

impl From<&Rect> for pdf_writer::Rect {
    fn from(r: &Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

impl From<pdf_writer::Rect> for Rect {
    fn from(r: pdf_writer::Rect) -> Self {
        Rect {
            x1: Pt(r.x1),
            y1: Pt(r.y1),
            x2: Pt(r.x2),
            y2: Pt(r.y2),
        }
    }
}
