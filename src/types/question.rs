use serde::{Deserialize, Serialize};

/// One answer option of a question with its marginal statistics.
///
/// `count` and `percentage` are snapshots taken at catalog load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub key: String,
    pub label: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl Answer {
    pub fn new(key: impl Into<String>, label: impl Into<String>, count: u64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            count,
            percentage: None,
        }
    }

    #[must_use]
    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }
}

/// A catalog question. Loaded questions always have at least one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "question")]
    pub text: String,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            answers,
        }
    }

    /// Answer labels in display order.
    pub fn answer_labels(&self) -> Vec<&str> {
        self.answers.iter().map(|a| a.label.as_str()).collect()
    }
}
