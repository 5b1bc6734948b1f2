use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Answer, Question};

/// Which side of the cross-tab a question sits on.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }

    /// The other axis.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "row" | "rows" => Ok(Axis::Row),
            "column" | "columns" | "col" => Ok(Axis::Column),
            other => Err(format!("unknown axis: {other}")),
        }
    }
}

/// A question placed on an axis, plus the display state that only exists there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisQuestion {
    pub id: String,
    pub question_text: String,
    pub answers: Vec<Answer>,
    /// Header label background, `#rrggbb`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_bg_color: Option<String>,
    /// Contrast text colour derived from `label_bg_color`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_text_color: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_color_picker: bool,
}

impl AxisQuestion {
    /// Number of matrix rows (or columns) this question spans.
    pub fn span(&self) -> usize {
        self.answers.len()
    }
}

impl From<&Question> for AxisQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            question_text: q.text.clone(),
            answers: q.answers.clone(),
            label_bg_color: None,
            label_text_color: None,
            show_color_picker: false,
        }
    }
}
