use crate::config::{ContentFilterConfig, MarkdownConfig, ThresholdType};
use scraper::{Html, Selector};
use spider_transformations::transformation::content::{
    ReturnFormat, TransformConfig, TransformInput, transform_content_input,
};
use url::Url;

/// Markdown extracted from a single rendered page
#[derive(Debug, Clone)]
pub struct PageMarkdown {
    /// Page title, when the document has a non-empty `<title>`
    pub title: Option<String>,

    /// Full markdown rendition of the page
    pub markdown: String,

    /// Markdown after readability extraction and content filtering
    pub fit_markdown: String,
}

/// Converts rendered HTML into markdown
///
/// The heavy lifting (readability scoring, node pruning, markdown emission)
/// is done by `spider_transformations`; this wrapper parameterizes it with a
/// [`ContentFilterConfig`] and applies the minimum-word cutoff to the
/// filtered output.
pub struct MarkdownGenerator {
    config: MarkdownConfig,
}

impl MarkdownGenerator {
    /// Create a generator with the given markdown options
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config }
    }

    /// Produce both the full and the filtered markdown for a page
    pub fn generate(&self, html: &str, url: &str) -> PageMarkdown {
        let parsed_url = Url::parse(url).ok();

        let markdown = transform(html, parsed_url.as_ref(), false);
        let pruned = transform(html, parsed_url.as_ref(), self.config.filter.threshold > 0.0);
        let fit_markdown = filter_blocks(&pruned, &self.config.filter);

        ::log::debug!(
            "Markdown for {}: {} chars raw, {} chars fit",
            url,
            markdown.len(),
            fit_markdown.len()
        );

        PageMarkdown {
            title: extract_title(html),
            markdown,
            fit_markdown,
        }
    }
}

/// Run the HTML through the transformation backend
///
/// With `prune` set, readability extraction isolates the main content; a
/// zero filter threshold turns pruning off and retains the full page.
fn transform(html: &str, url: Option<&Url>, prune: bool) -> String {
    let config = TransformConfig {
        readability: prune,
        main_content: prune,
        return_format: ReturnFormat::Markdown,
        filter_images: true,
        filter_svg: true,
        clean_html: true,
    };
    let input = TransformInput {
        url,
        content: html.as_bytes(),
        screenshot_bytes: None,
        encoding: None,
        selector_config: None,
        ignore_tags: None,
    };

    transform_content_input(input, &config)
}

/// Drop markdown blocks that fall under the minimum word count
///
/// In `Dynamic` mode structural blocks (headings, lists, quotes, tables,
/// fenced code) are kept regardless of length; `Fixed` applies the cutoff
/// uniformly.
fn filter_blocks(markdown: &str, filter: &ContentFilterConfig) -> String {
    split_blocks(markdown)
        .into_iter()
        .filter(|block| retain_block(block, filter))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Split markdown into blocks separated by blank lines, keeping fenced code
/// blocks intact
fn split_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    let mut in_fence = false;

    for line in markdown.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            current.push(line);
            continue;
        }

        if line.trim().is_empty() && !in_fence {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

/// Whether a block survives the content filter
fn retain_block(block: &str, filter: &ContentFilterConfig) -> bool {
    if block.split_whitespace().count() >= filter.min_word_threshold {
        return true;
    }

    match filter.threshold_type {
        ThresholdType::Fixed => false,
        ThresholdType::Dynamic => is_structural(block),
    }
}

/// Blocks that carry document structure rather than prose
fn is_structural(block: &str) -> bool {
    let first = block.trim_start();

    first.starts_with('#')
        || first.starts_with("```")
        || first.starts_with('>')
        || first.starts_with('|')
        || first.starts_with("- ")
        || first.starts_with("* ")
        || first
            .split('.')
            .next()
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Extract the document title, if any
fn extract_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("title").unwrap();

    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(threshold_type: ThresholdType, min_words: usize) -> ContentFilterConfig {
        ContentFilterConfig {
            threshold: 0.05,
            threshold_type,
            min_word_threshold: min_words,
        }
    }

    #[test]
    fn test_short_prose_blocks_are_dropped() {
        let markdown = "Too short.\n\nThis block has more than five words in it.";
        let result = filter_blocks(markdown, &filter(ThresholdType::Dynamic, 5));

        assert_eq!(result, "This block has more than five words in it.");
    }

    #[test]
    fn test_dynamic_mode_keeps_headings() {
        let markdown = "# Symptoms\n\nOnly two words here would normally be pruned by length.";
        let result = filter_blocks(markdown, &filter(ThresholdType::Dynamic, 5));

        assert!(result.starts_with("# Symptoms"));
    }

    #[test]
    fn test_fixed_mode_drops_short_headings() {
        let markdown = "# Symptoms\n\nThis block has more than five words in it.";
        let result = filter_blocks(markdown, &filter(ThresholdType::Fixed, 5));

        assert_eq!(result, "This block has more than five words in it.");
    }

    #[test]
    fn test_list_items_survive_dynamic_mode() {
        let markdown = "- nausea\n- light sensitivity";
        let result = filter_blocks(markdown, &filter(ThresholdType::Dynamic, 5));

        assert_eq!(result, markdown);
    }

    #[test]
    fn test_code_fences_are_not_split_on_blank_lines() {
        let markdown = "```\nfn main() {\n\n    run();\n}\n```";
        let blocks = split_blocks(markdown);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0], markdown);
    }

    #[test]
    fn test_extract_title() {
        let html = "<html><head><title> Headache — Overview </title></head><body></body></html>";

        assert_eq!(
            extract_title(html),
            Some("Headache — Overview".to_string())
        );
        assert_eq!(extract_title("<html><body>no title</body></html>"), None);
        assert_eq!(
            extract_title("<html><head><title>  </title></head></html>"),
            None
        );
    }
}
