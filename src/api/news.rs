use regex::Regex;
use reqwest::Client;

use super::{provider::NewsProvider, utils::make_text_request};
use crate::{config::Config, error::QueryError, models::NewsItem};

pub const NEWS_LIMIT: usize = 5;
pub const NEWS_PERIOD: &str = "7d";

#[derive(Clone, Debug)]
pub struct NewsApi {
    client: Client,
    url: String,
    parser: RssParser,
}

impl NewsApi {
    pub fn new(config: &Config) -> Result<Self, regex::Error> {
        Ok(Self {
            client: Client::new(),
            url: config.news_url().clone(),
            parser: RssParser::new()?,
        })
    }
}

impl NewsProvider for NewsApi {
    async fn search(&self, query: &str) -> Result<Vec<NewsItem>, QueryError> {
        let q = format!("{} when:{}", query, NEWS_PERIOD);
        let params = [
            ("q", q.as_str()),
            ("hl", "en-US"),
            ("gl", "US"),
            ("ceid", "US:en"),
        ];
        let body = make_text_request(&self.client, &self.url, &params).await?;

        let items = self.parser.parse(&body, NEWS_LIMIT);
        if items.is_empty() {
            return Err(QueryError::NoData(query.to_string()));
        }

        Ok(items)
    }
}

/// Pulls `<item>` entries out of an RSS 2.0 document.
#[derive(Clone, Debug)]
pub struct RssParser {
    item: Regex,
    field: Regex,
    char_ref: Regex,
    tag: Regex,
    spaces: Regex,
}

impl RssParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            item: Regex::new(r"(?s)<item>(.*?)</item>")?,
            field: Regex::new(
                r"(?s)<(title|link|pubDate|source|description)(?:\s[^>]*)?>(.*?)</(?:title|link|pubDate|source|description)>",
            )?,
            char_ref: Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));")?,
            tag: Regex::new(r"(?s)<[^>]*>")?,
            spaces: Regex::new(r"\s+")?,
        })
    }

    pub fn parse(&self, body: &str, limit: usize) -> Vec<NewsItem> {
        self.item
            .captures_iter(body)
            .take(limit)
            .map(|item| {
                let mut title = String::new();
                let mut link = String::new();
                let mut published = String::new();
                let mut source = String::new();
                let mut description = String::new();

                for field in self.field.captures_iter(&item[1]) {
                    let value = self.decode_text(&field[2]);
                    match &field[1] {
                        "title" => title = value,
                        "link" => link = value,
                        "pubDate" => published = value,
                        "source" => source = value,
                        "description" => description = self.strip_html(&value),
                        _ => {}
                    }
                }

                NewsItem::new(title, link, published, source, description)
            })
            .collect()
    }

    /// Unwraps CDATA and resolves named and numeric character references.
    pub fn decode_text(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        let inner = trimmed
            .strip_prefix("<![CDATA[")
            .and_then(|s| s.strip_suffix("]]>"))
            .unwrap_or(trimmed);

        // `&amp;` goes last so `&amp;lt;` stays a literal `&lt;`.
        let numeric = self.char_ref.replace_all(inner, |caps: &regex::Captures| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (_, Some(dec)) => dec.as_str().parse::<u32>().ok(),
                _ => None,
            };
            code.and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        });

        numeric
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
    }

    /// Drops markup from an already decoded description, resolves the
    /// entities of the HTML layer and collapses whitespace.
    pub fn strip_html(&self, html: &str) -> String {
        let text = self.decode_text(&self.tag.replace_all(html, " "));
        self.spaces.replace_all(text.trim(), " ").into_owned()
    }
}
