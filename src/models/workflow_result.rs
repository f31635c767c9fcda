use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{CHINESE_REPLY_FILE, ENGLISH_REPLY_FILE};
use crate::models::classification::Classification;

/// Everything one run of the classify -> generate -> translate sequence produced.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub classification: Classification,
    pub prompt: String,
    pub reply_en: String,
    pub reply_zh: String,
    pub generated_at: DateTime<Utc>,
}

/// A downloadable plain-text file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyArtifact {
    pub file_name: &'static str,
    pub content: String,
}

impl ReplyArtifact {
    /// `data:` URI carrying the file content, so the download matches what was rendered.
    pub fn data_uri(&self) -> String {
        format!("data:text/plain;charset=utf-8;base64,{}", STANDARD.encode(self.content.as_bytes()))
    }
}

impl WorkflowResult {
    pub fn downloads(&self) -> [ReplyArtifact; 2] {
        [
            ReplyArtifact {
                file_name: ENGLISH_REPLY_FILE,
                content: self.reply_en.clone(),
            },
            ReplyArtifact {
                file_name: CHINESE_REPLY_FILE,
                content: self.reply_zh.clone(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WorkflowResult {
        WorkflowResult {
            classification: Classification::new("Complaint", 0.9),
            prompt: "prompt".to_string(),
            reply_en: "Thank you.".to_string(),
            reply_zh: "谢谢。".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_downloads_use_fixed_file_names() {
        let [en, zh] = sample().downloads();
        assert_eq!(en.file_name, "email_reply_en.txt");
        assert_eq!(en.content, "Thank you.");
        assert_eq!(zh.file_name, "email_reply_zh.txt");
        assert_eq!(zh.content, "谢谢。");
    }

    #[test]
    fn test_data_uri_decodes_to_content() {
        let [_, zh] = sample().downloads();
        let uri = zh.data_uri();
        let encoded = uri.strip_prefix("data:text/plain;charset=utf-8;base64,").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "谢谢。");
    }
}
