//! Coverage-day bands.
//!
//! Five ordered categories over `cobertura_dias` with edges
//! `0, 15, 30, 45, 60, +inf`. Every edge belongs to the lower band (upper
//! bound inclusive), so 15.0 is `0-15 dias` and 60.0 is `46-60 dias`.

use serde::{Deserialize, Serialize};

/// One of the five fixed coverage-day ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoverageBand {
    /// (0, 15]
    Ate15,
    /// (15, 30]
    De16a30,
    /// (30, 45]
    De31a45,
    /// (45, 60]
    De46a60,
    /// (60, +inf)
    Acima60,
}

impl CoverageBand {
    pub const COUNT: usize = 5;

    /// All bands in ascending order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Ate15,
        Self::De16a30,
        Self::De31a45,
        Self::De46a60,
        Self::Acima60,
    ];

    /// Classify a coverage-day value against the fixed bin edges.
    ///
    /// Callers feed filtered rows, so `dias > 0` holds; values at an edge
    /// fall into the lower band.
    pub fn classify(dias: f64) -> Self {
        if dias <= 15.0 {
            Self::Ate15
        } else if dias <= 30.0 {
            Self::De16a30
        } else if dias <= 45.0 {
            Self::De31a45
        } else if dias <= 60.0 {
            Self::De46a60
        } else {
            Self::Acima60
        }
    }

    /// Column label used in reports and the exported workbook.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ate15 => "0-15 dias",
            Self::De16a30 => "16-30 dias",
            Self::De31a45 => "31-45 dias",
            Self::De46a60 => "46-60 dias",
            Self::Acima60 => "Maior que 60 dias",
        }
    }

    /// Position in the fixed band order.
    pub fn index(&self) -> usize {
        match self {
            Self::Ate15 => 0,
            Self::De16a30 => 1,
            Self::De31a45 => 2,
            Self::De46a60 => 3,
            Self::Acima60 => 4,
        }
    }
}
