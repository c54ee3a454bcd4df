/// Equality pattern of a cell's four corner states. Corners are compared,
/// never interpreted: two different materials bordering each other classify
/// the same way as material-against-empty. The fifteen variants are the
/// complete set of partitions of four corners, so classification is total and
/// unambiguous.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellCase {
    /// a=b=c=d
    Uniform,
    /// a=b=c, d differs
    CornerD,
    /// a=b=d, c differs
    CornerC,
    /// a=c=d, b differs
    CornerB,
    /// b=c=d, a differs
    CornerA,
    /// a=b vs c=d
    SplitHorizontal,
    /// a=c vs b=d
    SplitVertical,
    /// a=d vs b=c, the double saddle
    Diagonal,
    /// a=b, c and d both different
    PairAb,
    /// a=c, b and d both different
    PairAc,
    /// b=d, a and c both different
    PairBd,
    /// c=d, a and b both different
    PairCd,
    /// b=c only, a and d distinct (single saddle)
    DiagonalBc,
    /// a=d only, b and c distinct (single saddle)
    DiagonalAd,
    /// all four distinct
    Distinct,
}

impl CellCase {
    /// Classifies the (a=SW, b=SE, c=NW, d=NE) state pattern.
    pub fn classify(a: i32, b: i32, c: i32, d: i32) -> CellCase {
        if a == b {
            if a == c {
                if a == d {
                    CellCase::Uniform
                } else {
                    CellCase::CornerD
                }
            } else if a == d {
                CellCase::CornerC
            } else if c == d {
                CellCase::SplitHorizontal
            } else {
                CellCase::PairAb
            }
        } else if a == c {
            if a == d {
                CellCase::CornerB
            } else if b == d {
                CellCase::SplitVertical
            } else {
                CellCase::PairAc
            }
        } else if b == c {
            if a == d {
                CellCase::Diagonal
            } else if b == d {
                CellCase::CornerA
            } else {
                CellCase::DiagonalBc
            }
        } else if a == d {
            CellCase::DiagonalAd
        } else if b == d {
            CellCase::PairBd
        } else if c == d {
            CellCase::PairCd
        } else {
            CellCase::Distinct
        }
    }

    pub const ALL: [CellCase; 15] = [
        CellCase::Uniform,
        CellCase::CornerD,
        CellCase::CornerC,
        CellCase::CornerB,
        CellCase::CornerA,
        CellCase::SplitHorizontal,
        CellCase::SplitVertical,
        CellCase::Diagonal,
        CellCase::PairAb,
        CellCase::PairAc,
        CellCase::PairBd,
        CellCase::PairCd,
        CellCase::DiagonalBc,
        CellCase::DiagonalAd,
        CellCase::Distinct,
    ];
}
