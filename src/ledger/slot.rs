use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{CardError, CardResult};

/// One of the two paintable card faces.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Face {
    /// Receives even ledger indices.
    A,
    /// Receives odd ledger indices.
    B,
}

impl Face {
    /// Both faces in ordinal order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Face assigned to ledger entry `index`: `index mod 2`.
    pub fn for_index(index: u64) -> Self {
        if index % 2 == 0 { Self::A } else { Self::B }
    }

    /// `0` for [`Face::A`], `1` for [`Face::B`].
    pub fn ordinal(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => f.write_str("face A"),
            Self::B => f.write_str("face B"),
        }
    }
}

/// Grid cell of one signature on its face, derived only from its ledger index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StampSlot {
    /// Ledger index.
    pub index: u64,
    /// Target face.
    pub face: Face,
    /// Grid column, `< columns`.
    pub column: u64,
    /// Grid row, unbounded.
    pub row: u64,
}

/// Stamp grid geometry in texture pixels.
///
/// With the defaults, entry `i` lands in column `(i / 2) mod 3`, row `(i / 2) / 3`, with its origin
/// at `(column * 150 + 30, row * 120 + 30)` and a `120 x 60` stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StampLayout {
    /// Cells per row.
    pub columns: u32,
    /// Horizontal distance between cell origins.
    pub column_pitch: u32,
    /// Vertical distance between cell origins.
    pub row_pitch: u32,
    /// Left offset of the first column.
    pub margin_x: u32,
    /// Top offset of the first row.
    pub margin_y: u32,
    /// Width each decoded signature is scaled to.
    pub stamp_width: u32,
    /// Height each decoded signature is scaled to.
    pub stamp_height: u32,
}

impl Default for StampLayout {
    fn default() -> Self {
        Self {
            columns: 3,
            column_pitch: 150,
            row_pitch: 120,
            margin_x: 30,
            margin_y: 30,
            stamp_width: 120,
            stamp_height: 60,
        }
    }
}

impl StampLayout {
    /// Reject geometry that cannot place a stamp.
    pub fn validate(&self) -> CardResult<()> {
        if self.columns == 0 {
            return Err(CardError::config("layout.columns must be > 0"));
        }
        if self.stamp_width == 0 || self.stamp_height == 0 {
            return Err(CardError::config("layout stamp size must be non-zero"));
        }
        Ok(())
    }

    /// Face and grid cell for ledger entry `index`.
    pub fn slot(&self, index: u64) -> StampSlot {
        let per_face = index / 2;
        let columns = u64::from(self.columns.max(1));
        StampSlot {
            index,
            face: Face::for_index(index),
            column: per_face % columns,
            row: per_face / columns,
        }
    }

    /// Top-left pixel of `slot`.
    pub fn origin(&self, slot: StampSlot) -> Point {
        Point::new(
            slot.column as f64 * f64::from(self.column_pitch) + f64::from(self.margin_x),
            slot.row as f64 * f64::from(self.row_pitch) + f64::from(self.margin_y),
        )
    }

    /// Pixel rectangle covered by the stamp in `slot`.
    pub fn cell_rect(&self, slot: StampSlot) -> Rect {
        let o = self.origin(slot);
        Rect::new(
            o.x,
            o.y,
            o.x + f64::from(self.stamp_width),
            o.y + f64::from(self.stamp_height),
        )
    }

    /// `(width, height)` every stamp is scaled to.
    pub fn stamp_size(&self) -> (u32, u32) {
        (self.stamp_width, self.stamp_height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ledger/slot.rs"]
mod tests;
