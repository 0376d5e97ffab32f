//! Wire shapes exchanged with the page side.

use serde::{Deserialize, Serialize};

use crate::model::{DownloadId, DownloadOutcome, DownloadRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum RelayRequest {
    #[serde(rename = "downloadFile")]
    DownloadFile { url: String, filename: String },
    #[serde(rename = "bulkDownloadFiles")]
    BulkDownloadFiles { items: Vec<DownloadRequest> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_id: Option<DownloadId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RelayResponse {
    /// Immediate acknowledgment for a batch.
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            download_id: None,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            download_id: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

impl From<DownloadOutcome> for RelayResponse {
    fn from(outcome: DownloadOutcome) -> Self {
        match outcome {
            DownloadOutcome::Started(id) => Self {
                success: true,
                download_id: Some(id),
                error: None,
                message: None,
            },
            DownloadOutcome::Failed(error) => Self::failed(error),
        }
    }
}
