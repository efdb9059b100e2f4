use std::sync::Arc;

use crossterm::event::KeyCode;

use crate::{
    app::{
        context::AppContext,
        dispatcher::QueryDispatcher,
        utils::{next_index, prev_index},
    },
    services::news_text,
};

pub const NEWS_TOPICS: [&str; 4] = ["Bitcoin", "Ethereum", "Tether", "BNB"];

pub struct NewsView {
    topic: usize,
    result: Option<String>,
    dispatcher: QueryDispatcher,
}

impl Default for NewsView {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsView {
    pub fn new() -> Self {
        Self {
            topic: 0,
            result: None,
            dispatcher: QueryDispatcher::new(),
        }
    }

    pub fn topic(&self) -> &'static str {
        NEWS_TOPICS[self.topic]
    }

    pub fn topic_index(&self) -> usize {
        self.topic
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    pub fn handle_key(&mut self, code: KeyCode, ctx: &AppContext) {
        match code {
            KeyCode::Right | KeyCode::Down => {
                self.topic = next_index(Some(self.topic), NEWS_TOPICS.len()).unwrap_or(0)
            }
            KeyCode::Left | KeyCode::Up => {
                self.topic = prev_index(Some(self.topic), NEWS_TOPICS.len()).unwrap_or(0)
            }
            KeyCode::Enter => self.submit(ctx),
            _ => {}
        }
    }

    pub fn submit(&mut self, ctx: &AppContext) {
        let news = Arc::clone(ctx.news());
        let topic = self.topic();

        self.result = Some(format!("Searching news for {}...", topic));
        self.dispatcher
            .dispatch(async move { news_text(news.as_ref(), topic).await });
    }

    pub fn poll(&mut self) {
        if let Some(text) = self.dispatcher.try_complete() {
            self.result = Some(text);
        }
    }
}
