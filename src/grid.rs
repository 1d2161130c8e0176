//! Solid-tile map
//!
//! One cell per map-image pixel. Every collision query goes through
//! [`TileGrid::overlaps_solid`], which scans the tile range covered by a
//! rectangle and confirms each hit geometrically. Coordinates outside the
//! grid read as solid, so the world is implicitly walled.

use crate::geom::IRect;

/// Grid of solid flags plus the tile edge length in pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    cells: Vec<bool>,
    width: i32,
    height: i32,
    tile_size: i32,
}

impl TileGrid {
    /// An all-empty grid. `width`, `height` and `tile_size` must be positive.
    pub fn new(width: i32, height: i32, tile_size: i32) -> Self {
        assert!(width > 0 && height > 0 && tile_size > 0);
        Self {
            cells: vec![false; (width * height) as usize],
            width,
            height,
            tile_size,
        }
    }

    /// Build from row-major solid flags, `cells.len() == width * height`
    pub fn from_cells(width: i32, height: i32, tile_size: i32, cells: Vec<bool>) -> Self {
        assert!(width > 0 && height > 0 && tile_size > 0);
        assert_eq!(cells.len(), (width * height) as usize);
        Self {
            cells,
            width,
            height,
            tile_size,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Map width in pixels
    #[inline]
    pub fn width_px(&self) -> i32 {
        self.width * self.tile_size
    }

    /// Map height in pixels
    #[inline]
    pub fn height_px(&self) -> i32 {
        self.height * self.tile_size
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Solidity at tile coordinates; out-of-range reads as solid
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.cells[(y * self.width + x) as usize]
    }

    /// Set one cell; out-of-range writes are ignored
    pub fn set_solid(&mut self, x: i32, y: i32, solid: bool) {
        if self.in_bounds(x, y) {
            self.cells[(y * self.width + x) as usize] = solid;
        }
    }

    /// Pixel rectangle of one tile
    #[inline]
    pub fn tile_rect(&self, x: i32, y: i32) -> IRect {
        IRect::new(
            x * self.tile_size,
            y * self.tile_size,
            self.tile_size,
            self.tile_size,
        )
    }

    /// Does `rc` overlap any solid tile?
    ///
    /// Scans the inclusive tile range covered by the rectangle's corners,
    /// then confirms each candidate with an exact rectangle test. Pixel
    /// coordinates left of or above the map fall on negative tile indices,
    /// which read as solid.
    pub fn overlaps_solid(&self, rc: &IRect) -> bool {
        let ts = self.tile_size;
        let x0 = rc.x.div_euclid(ts);
        let x1 = (rc.x + rc.width).div_euclid(ts);
        let y0 = rc.y.div_euclid(ts);
        let y1 = (rc.y + rc.height).div_euclid(ts);

        for ty in y0..=y1 {
            for tx in x0..=x1 {
                if self.is_solid(tx, ty) && rc.intersects(&self.tile_rect(tx, ty)) {
                    return true;
                }
            }
        }
        false
    }

    /// Shadow variant for the tile at `(x, y)`, `None` when the tile is empty
    pub fn shadow_variant(&self, x: i32, y: i32) -> Option<TileVariant> {
        if !self.in_bounds(x, y) || !self.is_solid(x, y) {
            return None;
        }
        Some(choose_variant(self, x, y))
    }

    /// Row-major shadow variants for the whole map, computed once after load
    /// so renderers can index it per frame
    pub fn shadow_variants(&self) -> Vec<Option<TileVariant>> {
        let mut out = Vec::with_capacity((self.width * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.shadow_variant(x, y));
            }
        }
        out
    }
}

/// Shadow texture selected for a solid tile, named for the canonical
/// (unflipped) art: spelled-out words are shadowed sides, `Corner*` are
/// inner-corner shadows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shadow {
    None,
    Left,
    Top,
    TopLeft,
    LeftRight,
    TopBottom,
    TopLeftRight,
    TopLeftBottom,
    AllSides,
    CornerTl,
    CornerTlRight,
    CornerTlBottom,
    CornerTlRightBottom,
    CornerTlBr,
    CornerTlTr,
    CornerTlBl,
    CornerTlTrBottom,
    CornerTlBlRight,
    CornerTlBlTr,
    CornerAll,
}

/// A shadow texture plus the flips that fold symmetric neighbor layouts
/// onto it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileVariant {
    pub shadow: Shadow,
    pub flip_x: bool,
    pub flip_y: bool,
}

/// Pick the shadow variant from the solidity of the 8 neighbors.
///
/// An empty edge neighbor casts a side shadow. A corner casts an inner
/// shadow when both adjacent edges are solid but the diagonal is empty.
/// The variant is discriminated by the counts and arrangement of both.
fn choose_variant(grid: &TileGrid, x: i32, y: i32) -> TileVariant {
    let top = grid.is_solid(x, y - 1);
    let right = grid.is_solid(x + 1, y);
    let bottom = grid.is_solid(x, y + 1);
    let left = grid.is_solid(x - 1, y);

    let top_left = grid.is_solid(x - 1, y - 1);
    let top_right = grid.is_solid(x + 1, y - 1);
    let bottom_right = grid.is_solid(x + 1, y + 1);
    let bottom_left = grid.is_solid(x - 1, y + 1);

    let s_top = !top;
    let s_right = !right;
    let s_bottom = !bottom;
    let s_left = !left;

    let c_tl = top && left && !top_left;
    let c_tr = top && right && !top_right;
    let c_bl = bottom && left && !bottom_left;
    let c_br = bottom && right && !bottom_right;

    let sides = [s_top, s_right, s_bottom, s_left]
        .iter()
        .filter(|&&s| s)
        .count();
    let corners = [c_tl, c_tr, c_br, c_bl].iter().filter(|&&c| c).count();

    let mut flip_x = false;
    let mut flip_y = false;

    let shadow = match corners {
        0 => match sides {
            0 => Shadow::None,
            1 => {
                flip_x = s_right;
                flip_y = s_bottom;
                if s_left || s_right {
                    Shadow::Left
                } else {
                    Shadow::Top
                }
            }
            2 => {
                let adjacent =
                    (s_top && (s_left || s_right)) || (s_bottom && (s_left || s_right));
                if adjacent {
                    flip_x = s_right;
                    flip_y = s_bottom;
                    Shadow::TopLeft
                } else if s_left {
                    Shadow::LeftRight
                } else {
                    Shadow::TopBottom
                }
            }
            3 => {
                flip_x = !s_left;
                flip_y = !s_top;
                if !s_top || !s_bottom {
                    Shadow::TopLeftRight
                } else {
                    Shadow::TopLeftBottom
                }
            }
            _ => Shadow::AllSides,
        },
        1 => {
            flip_x = c_tr || c_br;
            flip_y = c_bl || c_br;
            match sides {
                0 => Shadow::CornerTl,
                2 => Shadow::CornerTlRightBottom,
                1 if s_left || s_right => Shadow::CornerTlRight,
                _ => Shadow::CornerTlBottom,
            }
        }
        2 => {
            if (c_tl && c_br) || (c_bl && c_tr) {
                flip_x = c_tr;
                Shadow::CornerTlBr
            } else {
                flip_x = c_br;
                flip_y = c_br;
                if (c_tl && c_tr) || (c_bl && c_br) {
                    if sides == 1 {
                        Shadow::CornerTlTrBottom
                    } else {
                        Shadow::CornerTlTr
                    }
                } else if sides == 1 {
                    Shadow::CornerTlBlRight
                } else {
                    Shadow::CornerTlBl
                }
            }
        }
        3 => {
            flip_x = !c_bl || !c_tl;
            flip_y = !c_tl || !c_tr;
            Shadow::CornerTlBlTr
        }
        _ => Shadow::CornerAll,
    };

    TileVariant {
        shadow,
        flip_x,
        flip_y,
    }
}
