//! Share text, social links, and the result-card export.
//!
//! Nothing here can affect the session: every function takes the finished
//! results by value or reference and failures only surface as
//! [`ExportError`].

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::diagnosis::Diagnosis;
use crate::error::ExportError;
use crate::session::Session;
use crate::types::ScoreRecord;

/// Message posted or copied when sharing a result.
pub fn share_text(diagnosis: &Diagnosis, app_url: &str) -> String {
    format!(
        "I scored {}% on RateMyBrain! Diagnosis: {} 🧠 Test your brain power here: {}",
        diagnosis.average, diagnosis.brain_type.label, app_url
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    X,
    Facebook,
    Reddit,
    LinkedIn,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::X,
        Platform::Facebook,
        Platform::Reddit,
        Platform::LinkedIn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Platform::X => "X / Twitter",
            Platform::Facebook => "Facebook",
            Platform::Reddit => "Reddit",
            Platform::LinkedIn => "LinkedIn",
        }
    }

    /// Share-intent URL carrying `text` (and `app_url` where the platform
    /// takes a separate link).
    pub fn share_url(self, text: &str, app_url: &str) -> String {
        let text = urlencoding::encode(text);
        let url = urlencoding::encode(app_url);
        match self {
            Platform::X => format!("https://twitter.com/intent/tweet?text={text}"),
            Platform::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={url}&quote={text}")
            }
            Platform::Reddit => format!("https://www.reddit.com/submit?url={url}&title={text}"),
            Platform::LinkedIn => format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={url}&summary={text}"
            ),
        }
    }
}

/// Serialized form of an exported result card.
#[derive(Debug, Serialize)]
pub struct ResultCard<'a> {
    pub app: &'static str,
    pub average: u8,
    pub label: &'static str,
    pub description: &'static str,
    pub scores: &'a ScoreRecord,
    pub share_text: String,
}

/// `RateMyBrain_<label>.json` with whitespace in the label replaced by `_`.
pub fn card_file_name(diagnosis: &Diagnosis) -> String {
    let label: String = diagnosis
        .brain_type
        .label
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("RateMyBrain_{label}.json")
}

/// Write the result card into `dir`, returning the file path.
pub fn export_card(
    dir: &Path,
    diagnosis: &Diagnosis,
    scores: &ScoreRecord,
    app_url: &str,
) -> Result<PathBuf, ExportError> {
    let card = ResultCard {
        app: "RateMyBrain",
        average: diagnosis.average,
        label: diagnosis.brain_type.label,
        description: diagnosis.brain_type.description,
        scores,
        share_text: share_text(diagnosis, app_url),
    };
    let json = serde_json::to_string_pretty(&card)?;
    let path = dir.join(card_file_name(diagnosis));
    match std::fs::write(&path, json) {
        Ok(()) => {
            info!(path = %path.display(), "result card exported");
            Ok(path)
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "result card export failed");
            Err(ExportError::Io { path, source })
        }
    }
}

/// Export the result card of a finished session.
pub fn export_session(dir: &Path, session: &Session, app_url: &str) -> Result<PathBuf, ExportError> {
    let diagnosis = session.diagnosis().ok_or(ExportError::NotFinished)?;
    export_card(dir, &diagnosis, session.scores(), app_url)
}
