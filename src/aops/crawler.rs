use crate::{utils, Crawler, ProblemRecord};
use lazy_regex::regex;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

const LABEL_CLASS: &str = "cmty-view-post-item-label";
/// Present on every fetched document, whether or not the topic has problems.
const READY_SELECTOR: &str = "body";

/// Contest editions whose URLs carry no bare year.
const SPECIAL_EDITIONS: &[(&str, &str)] = &[
    ("1958_february_putnam", "1958_february"),
    ("1958_november_putnam", "1958_november"),
];

const E: &str = "Invalid selector";
lazy_static! {
    // only text blocks directly preceded by their label
    static ref LABELLED_TEXT: Selector =
        Selector::parse("div.cmty-view-post-item-label + div.cmty-view-post-item-text")
            .expect(E);
}

#[derive(Debug, Default)]
pub struct AopsCrawler;

impl AopsCrawler {
    fn label_of(text_block: &ElementRef<'_>) -> Option<String> {
        text_block
            .prev_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "div" && utils::has_class(el, LABEL_CLASS))
            .map(|label| utils::joined_text_only(label, ""))
            .filter(|label| !label.is_empty())
    }
}

impl Crawler for AopsCrawler {
    fn year_key(&self, url: &str) -> Option<String> {
        if let Some(caps) = regex!(r"(\d{4})_putnam").captures(url) {
            return Some(caps[1].to_string());
        }
        if let Some(caps) = regex!(r"putnam_(\d{4})").captures(url) {
            return Some(caps[1].to_string());
        }
        SPECIAL_EDITIONS
            .iter()
            .find(|(needle, _)| url.contains(needle))
            .map(|(_, key)| key.to_string())
    }

    fn crawl(&self, doc: &Html) -> Vec<ProblemRecord> {
        doc.select(&LABELLED_TEXT)
            .filter_map(|block| {
                let question = Self::label_of(&block)?;
                let problem = utils::joined_text(block, " ");
                Some(ProblemRecord { problem, question })
            })
            .collect()
    }

    fn ready_selector(&self) -> &str {
        READY_SELECTOR
    }
}
