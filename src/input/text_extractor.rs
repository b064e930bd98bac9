//! Text extraction from supported document formats

use crate::error::Result;
use log::warn;
use pulldown_cmark::{html, Parser};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        // A PDF the library cannot decode yields an empty string instead of an
        // error; downstream stages treat emptiness as the extraction failure
        // signal and surface it as a distinct outcome.
        match pdf_extract::extract_text_from_mem(&bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("PDF extraction failed for '{}': {}", path.display(), e);
                Ok(String::new())
            }
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown))
    }
}

/// Render markdown to HTML, then strip tags back down to plain text.
fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let with_breaks = html_output.replace("<br>", "\n").replace("</p>", "\n\n");

    let tag_pattern = regex::Regex::new(r"<[^>]*>").unwrap();
    let stripped = tag_pattern.replace_all(&with_breaks, "");

    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_stripping() {
        let text = markdown_to_text("# Heading\n\nSome **bold** text and a [link](https://example.com).");
        assert!(text.contains("Heading"));
        assert!(text.contains("bold"));
        assert!(text.contains("link"));
        assert!(!text.contains("**"));
        assert!(!text.contains("<"));
    }

    #[test]
    fn test_markdown_entity_decoding() {
        let text = markdown_to_text("Ops & Infrastructure");
        assert!(text.contains("Ops & Infrastructure"));
    }
}
