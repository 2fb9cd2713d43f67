use bitflags::bitflags;

/// Category of a cell. Every cell belongs to exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellType {
    Fluid,
    FixedWall,
    MovingWall,
    Inflow,
    Outflow,
    HotFixedWall,
    ColdFixedWall,
    AdiabaticFixedWall,
}

impl CellType {
    pub const COUNT: usize = 8;

    pub(crate) fn index(self) -> usize {
        match self {
            CellType::Fluid => 0,
            CellType::FixedWall => 1,
            CellType::MovingWall => 2,
            CellType::Inflow => 3,
            CellType::Outflow => 4,
            CellType::HotFixedWall => 5,
            CellType::ColdFixedWall => 6,
            CellType::AdiabaticFixedWall => 7,
        }
    }
}

bitflags! {
    /// Sides of a non-fluid cell that touch a fluid cell.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Border: u8 {
        const TOP    = 0b0001; // (i, j + 1)
        const BOTTOM = 0b0010; // (i, j - 1)
        const LEFT   = 0b0100; // (i - 1, j)
        const RIGHT  = 0b1000; // (i + 1, j)
    }
}

impl Border {
    /// Index offset of the neighbour across this single border.
    pub fn offset(self) -> Option<(isize, isize)> {
        if self == Border::TOP {
            Some((0, 1))
        } else if self == Border::BOTTOM {
            Some((0, -1))
        } else if self == Border::LEFT {
            Some((-1, 0))
        } else if self == Border::RIGHT {
            Some((1, 0))
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    i: usize,
    j: usize,
    cell_type: CellType,
    borders: Border,
}

impl Cell {
    pub fn new(i: usize, j: usize, cell_type: CellType, borders: Border) -> Self {
        Self { i, j, cell_type, borders }
    }

    pub fn i(&self) -> usize {
        self.i
    }

    pub fn j(&self) -> usize {
        self.j
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub fn is_fluid(&self) -> bool {
        self.cell_type == CellType::Fluid
    }

    pub fn borders(&self) -> Border {
        self.borders
    }

    /// Coordinates of the fluid neighbours, in TOP, BOTTOM, LEFT, RIGHT order.
    pub fn fluid_neighbours(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.borders.iter().filter_map(move |b| {
            let (di, dj) = b.offset()?;
            Some((
                self.i.checked_add_signed(di)?,
                self.j.checked_add_signed(dj)?,
            ))
        })
    }
}
