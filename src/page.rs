//! HTML parsing into a small owned element tree.
//!
//! `scraper` does the HTML5 parsing and the top level CSS matching; matches are
//! copied into [`Element`] so attribute lookups are plain `Option`s and the
//! tree can outlive the parsed document.

use anyhow::anyhow;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Matches elements by tag name and, optionally, one class.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TagSelector {
    pub tag: String,
    pub class: Option<String>,
}

impl TagSelector {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.into(),
            class: None,
        }
    }

    pub fn with_class(tag: &str, class: &str) -> Self {
        Self {
            tag: tag.into(),
            class: Some(class.into()),
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        if !element.tag.eq_ignore_ascii_case(&self.tag) {
            return false;
        }
        match &self.class {
            Some(class) => element.has_class(class),
            None => true,
        }
    }

    fn to_css(&self) -> anyhow::Result<Selector> {
        let css = self.to_string();
        Selector::parse(&css).map_err(|e| anyhow!("invalid selector `{}`: {}", css, e))
    }
}

impl fmt::Display for TagSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.class {
            Some(class) => write!(f, "{}.{}", self.tag, class),
            None => write!(f, "{}", self.tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    fn from_ref(element: ElementRef<'_>) -> Self {
        let value = element.value();
        Element {
            tag: value.name().to_string(),
            attributes: value
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            children: element
                .children()
                .filter_map(ElementRef::wrap)
                .map(Element::from_ref)
                .collect(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Descendants matching `selector`, in document order.
    pub fn find_all(&self, selector: &TagSelector) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(selector, &mut found);
        found
    }

    pub fn find_first(&self, selector: &TagSelector) -> Option<&Element> {
        self.children.iter().find_map(|child| {
            if selector.matches(child) {
                Some(child)
            } else {
                child.find_first(selector)
            }
        })
    }

    fn collect<'a>(&'a self, selector: &TagSelector, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if selector.matches(child) {
                found.push(child);
            }
            child.collect(selector, found);
        }
    }
}

pub struct Page {
    document: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Page {
            document: Html::parse_document(html),
        }
    }

    /// Every element matching `selector`, in document order.
    pub fn select(&self, selector: &TagSelector) -> anyhow::Result<Vec<Element>> {
        let css = selector.to_css()?;
        Ok(self.document.select(&css).map(Element::from_ref).collect())
    }

    /// First element matching `selector`, `None` when the page has none.
    pub fn find(&self, selector: &TagSelector) -> anyhow::Result<Option<Element>> {
        let css = selector.to_css()?;
        Ok(self.document.select(&css).next().map(Element::from_ref))
    }
}
