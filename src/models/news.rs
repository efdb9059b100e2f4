use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;

#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct NewsItem {
    title: String,
    link: String,
    published: String,
    source: String,
    /// Plain-text summary with markup removed.
    description: String,
}
