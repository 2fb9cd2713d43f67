//! Grid-transfer operators between multigrid levels (coarsening factor 2).
//!
//! Coarse index `i` is aligned with fine index `2i`. A fine field with
//! `imax` interior cells maps to a coarse field with `imax / 2`, and back.

use crate::matrix::DenseField;

/// Reading of the east face-neighbour weight in the restriction stencil.
///
/// The weighting as handed down reads the east neighbour of fine cell
/// `(2i, 2j)` as `fine(2i + i, 2j)`, where the symmetric stencil needs
/// `fine(2i + 1, 2j)`. Both readings stay selectable until the owner of the
/// numerical method confirms one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RestrictionStencil {
    /// Symmetric 9-point full weighting, east neighbour `fine(2i + 1, 2j)`.
    #[default]
    FullWeighting,
    /// East neighbour read as `fine(3i, 2j)`, clamped to the fine ghost
    /// column where `3i` runs past it.
    Transcribed,
}

/// Fine → coarse.
///
/// Interior coarse cells take the 9-point weighting
/// `1/4 centre + 1/8 faces + 1/16 diagonals` around `fine(2i, 2j)`. Coarse
/// ring rows and columns take `centre + 1/2 (both neighbours)` along the
/// matching fine ring.
pub fn restrict(fine: &DenseField, stencil: RestrictionStencil) -> DenseField {
    let imax = fine.imaxb() / 2 - 1;
    let jmax = fine.jmaxb() / 2 - 1;
    let fine_ring_i = fine.imaxb() - 1;

    let mut coarse = DenseField::zeros(imax, jmax);

    for j in 1..=jmax {
        for i in 1..=imax {
            let (fi, fj) = (2 * i, 2 * j);
            let east = match stencil {
                RestrictionStencil::FullWeighting => fine[(fi + 1, fj)],
                RestrictionStencil::Transcribed => fine[((fi + i).min(fine_ring_i), fj)],
            };
            coarse[(i, j)] = 0.25 * fine[(fi, fj)]
                + 0.125 * (fine[(fi - 1, fj)] + east + fine[(fi, fj - 1)] + fine[(fi, fj + 1)])
                + 0.0625
                    * (fine[(fi - 1, fj - 1)]
                        + fine[(fi - 1, fj + 1)]
                        + fine[(fi + 1, fj - 1)]
                        + fine[(fi + 1, fj + 1)]);
        }
    }

    let (ftop, fright) = (2 * jmax + 1, 2 * imax + 1);
    for i in 1..=imax {
        coarse[(i, 0)] = fine[(2 * i, 0)] + 0.5 * (fine[(2 * i - 1, 0)] + fine[(2 * i + 1, 0)]);
        coarse[(i, jmax + 1)] =
            fine[(2 * i, ftop)] + 0.5 * (fine[(2 * i - 1, ftop)] + fine[(2 * i + 1, ftop)]);
    }
    for j in 1..=jmax {
        coarse[(0, j)] = fine[(0, 2 * j)] + 0.5 * (fine[(0, 2 * j - 1)] + fine[(0, 2 * j + 1)]);
        coarse[(imax + 1, j)] =
            fine[(fright, 2 * j)] + 0.5 * (fine[(fright, 2 * j - 1)] + fine[(fright, 2 * j + 1)]);
    }

    coarse
}

/// Coarse → fine by bilinear interpolation.
///
/// `fine(2i, 2j)` copies `coarse(i, j)`; edge midpoints average two coarse
/// values and cell centres average four. The fine ring copies the adjacent
/// coarse ring value into both fine indices it covers.
pub fn prolongate(coarse: &DenseField) -> DenseField {
    let (imax, jmax) = (coarse.imax(), coarse.jmax());
    let mut fine = DenseField::zeros(2 * imax, 2 * jmax);

    for j in 0..=jmax {
        for i in 0..=imax {
            let c = coarse[(i, j)];
            let east = coarse[(i + 1, j)];
            let north = coarse[(i, j + 1)];
            let north_east = coarse[(i + 1, j + 1)];
            fine[(2 * i, 2 * j)] = c;
            fine[(2 * i + 1, 2 * j)] = 0.5 * (c + east);
            fine[(2 * i, 2 * j + 1)] = 0.5 * (c + north);
            fine[(2 * i + 1, 2 * j + 1)] = 0.25 * (c + east + north + north_east);
        }
    }

    let (ftop, fright) = (2 * jmax + 1, 2 * imax + 1);
    for i in 1..=imax {
        fine[(2 * i - 1, 0)] = coarse[(i, 0)];
        fine[(2 * i, 0)] = coarse[(i, 0)];
        fine[(2 * i - 1, ftop)] = coarse[(i, jmax + 1)];
        fine[(2 * i, ftop)] = coarse[(i, jmax + 1)];
    }
    for j in 1..=jmax {
        fine[(0, 2 * j - 1)] = coarse[(0, j)];
        fine[(0, 2 * j)] = coarse[(0, j)];
        fine[(fright, 2 * j - 1)] = coarse[(imax + 1, j)];
        fine[(fright, 2 * j)] = coarse[(imax + 1, j)];
    }

    fine
}
