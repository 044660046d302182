//! Diagnosis: session average → brain type, plus the meme shown with it.
//!
//! [`BRAIN_TYPES`] is sorted by descending threshold and ends at 0, so
//! [`classify`] always finds a row for any average in [0, 100]. A threshold is
//! inclusive: an average of exactly 70 is a "Fast Thinker".

use serde::Serialize;

use crate::constants::*;
use crate::types::ScoreRecord;

/// One row of the diagnosis table.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct BrainType {
    /// Lowest average that still falls in this band.
    pub threshold: u8,
    pub label: &'static str,
    pub description: &'static str,
    /// Accent colour for the result card.
    pub accent: &'static str,
}

pub static BRAIN_TYPES: [BrainType; 5] = [
    BrainType {
        threshold: 85,
        label: "Lightning CPU",
        description: "You calculate faster than my GPU!",
        accent: "purple",
    },
    BrainType {
        threshold: 70,
        label: "Fast Thinker",
        description: "Sharp, quick, and dangerous.",
        accent: "blue",
    },
    BrainType {
        threshold: 55,
        label: "Balanced Brain",
        description: "Solid performance. Very human.",
        accent: "green",
    },
    BrainType {
        threshold: 35,
        label: "Golden Retriever",
        description: "Just happy to be here!",
        accent: "yellow",
    },
    BrainType {
        threshold: 0,
        label: "Slow Mode",
        description: "Loading... still loading...",
        accent: "red",
    },
];

/// Unweighted mean of the six scores, rounded half up.
///
/// Integer form of `floor(total / 6 + 0.5)`; exact for non-negative totals.
pub fn average_score(scores: &ScoreRecord) -> u8 {
    let count = GAME_COUNT as u32;
    let avg = (scores.total() * 2 + count) / (2 * count);
    avg.min(MAX_SCORE as u32) as u8
}

/// First brain type whose threshold is at or below `average`.
pub fn classify(average: u8) -> &'static BrainType {
    BRAIN_TYPES
        .iter()
        .find(|t| average >= t.threshold)
        .unwrap_or(&BRAIN_TYPES[BRAIN_TYPES.len() - 1])
}

/// Meme shown on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Meme {
    Intro,
    HighScore,
    MidScore,
    LowScore,
}

/// Shown when a meme URL cannot be used.
pub const PLACEHOLDER_IMAGE: &str =
    "https://placehold.co/600x400/805ad5/ffffff?text=Meme+Loading+Error&font=fredoka";

impl Meme {
    pub fn for_average(average: u8) -> Meme {
        if average > MEME_HIGH_ABOVE {
            Meme::HighScore
        } else if average < MEME_LOW_BELOW {
            Meme::LowScore
        } else {
            Meme::MidScore
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            Meme::Intro => "https://i.ibb.co/wFtQGZdv/whocaresbilly.jpg",
            Meme::HighScore => "https://i.ibb.co/6JHSg2LD/HIMUVI.jpg",
            Meme::MidScore => "https://i.ibb.co/5Xt5ydjX/Jamminmb.jpg",
            Meme::LowScore => "https://i.ibb.co/v6pW3yLD/Outside-Scares-Me.jpg",
        }
    }

    pub fn citation(self) -> &'static str {
        match self {
            Meme::Intro => "Meme by u/whocaresbilly",
            Meme::HighScore => "Meme by u/HIMUVI",
            Meme::MidScore => "Meme by u/Jamminmb",
            Meme::LowScore => "Meme by u/OutsideScaresMe",
        }
    }

    pub fn fallback(self) -> &'static str {
        PLACEHOLDER_IMAGE
    }

    /// URL to display: the meme itself when it looks loadable, otherwise the
    /// placeholder.
    pub fn display_url(self, loadable: impl Fn(&str) -> bool) -> &'static str {
        let url = self.url();
        if loadable(url) {
            url
        } else {
            tracing::warn!(meme = ?self, url, "meme unavailable, using placeholder");
            self.fallback()
        }
    }
}

/// Final outcome of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub average: u8,
    pub brain_type: &'static BrainType,
    pub meme: Meme,
}

impl Diagnosis {
    pub fn from_scores(scores: &ScoreRecord) -> Self {
        let average = average_score(scores);
        Self {
            average,
            brain_type: classify(average),
            meme: Meme::for_average(average),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameId;

    fn record(scores: [u8; 6]) -> ScoreRecord {
        GameId::ALL.into_iter().zip(scores).collect()
    }

    #[test]
    fn test_table_is_descending_and_total() {
        for pair in BRAIN_TYPES.windows(2) {
            assert!(pair[0].threshold > pair[1].threshold);
        }
        assert_eq!(BRAIN_TYPES.last().unwrap().threshold, 0);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(100).label, "Lightning CPU");
        assert_eq!(classify(85).label, "Lightning CPU");
        assert_eq!(classify(84).label, "Fast Thinker");
        assert_eq!(classify(70).label, "Fast Thinker");
        assert_eq!(classify(69).label, "Balanced Brain");
        assert_eq!(classify(55).label, "Balanced Brain");
        assert_eq!(classify(35).label, "Golden Retriever");
        assert_eq!(classify(34).label, "Slow Mode");
        assert_eq!(classify(0).label, "Slow Mode");
    }

    #[test]
    fn test_average_rounding() {
        assert_eq!(average_score(&record([0; 6])), 0);
        assert_eq!(average_score(&record([100; 6])), 100);
        // 475 / 6 = 79.17
        assert_eq!(average_score(&record([80, 70, 75, 80, 100, 70])), 79);
        // 417 / 6 = 69.5 rounds up into the Fast Thinker band
        let half = record([70, 70, 70, 70, 70, 67]);
        assert_eq!(half.total(), 417);
        assert_eq!(average_score(&half), 70);
        assert_eq!(classify(average_score(&half)).label, "Fast Thinker");
        // 416 / 6 = 69.33
        assert_eq!(average_score(&record([70, 70, 70, 70, 70, 66])), 69);
    }

    #[test]
    fn test_example_session() {
        let diagnosis = Diagnosis::from_scores(&record([80, 70, 75, 80, 100, 70]));
        assert_eq!(diagnosis.average, 79);
        assert_eq!(diagnosis.brain_type.label, "Fast Thinker");
        assert_eq!(diagnosis.meme, Meme::HighScore);
    }

    #[test]
    fn test_meme_bands() {
        assert_eq!(Meme::for_average(76), Meme::HighScore);
        assert_eq!(Meme::for_average(75), Meme::MidScore);
        assert_eq!(Meme::for_average(40), Meme::MidScore);
        assert_eq!(Meme::for_average(39), Meme::LowScore);
    }

    #[test]
    fn test_meme_fallback() {
        assert_eq!(Meme::Intro.display_url(|_| true), Meme::Intro.url());
        assert_eq!(Meme::LowScore.display_url(|_| false), PLACEHOLDER_IMAGE);
    }
}
