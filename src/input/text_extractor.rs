//! Text extraction from resume files

use crate::error::{RankerError, Result};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract text from an in-memory PDF.
    ///
    /// Parsing runs on the blocking pool; a parser panic is reported as an
    /// extraction error instead of unwinding into the caller.
    pub async fn extract_bytes(&self, bytes: Vec<u8>) -> Result<String> {
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| RankerError::PdfExtraction(format!("PDF parser aborted: {}", e)))?
        .map_err(RankerError::PdfExtraction)
    }
}

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        self.extract_bytes(bytes).await.map_err(|e| {
            RankerError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    /// Blocks become blank-line separated paragraphs so project detection
    /// still sees paragraph boundaries.
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("</ul>", "\n")
            .replace("</h1>", "\n\n")
            .replace("</h2>", "\n\n")
            .replace("</h3>", "\n\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let clean_text = HTML_TAG.replace_all(&text, "");

        clean_text
            .lines()
            .map(|line| line.trim())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_keeps_paragraph_breaks() {
        let html = "<h2>Projects</h2>\n<p>Built a <strong>Rust</strong> crawler</p>\n<p>Led a team</p>\n";
        let text = MarkdownExtractor.html_to_text(html);

        assert!(text.contains("Built a Rust crawler"));
        assert!(!text.contains("<strong>"));
        assert!(text.contains("crawler\n\n"));
    }

    #[tokio::test]
    async fn test_garbage_pdf_bytes_fail() {
        let result = PdfExtractor.extract_bytes(b"definitely not a pdf".to_vec()).await;
        assert!(matches!(result, Err(RankerError::PdfExtraction(_))));
    }
}
