use strum_macros::{Display, EnumIter};

#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, PartialEq)]
pub enum Screen {
    #[strum(serialize = "Home")]
    Home,
    #[strum(serialize = "Spot quotes")]
    SpotQuotes,
    #[strum(serialize = "Historical data")]
    HistoricalQuotes,
    #[strum(serialize = "Crypto news")]
    CryptoNews,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Nav {
    Open(Screen),
    Back,
    Refresh,
}

impl Screen {
    /// Screens other than `Home` can only be opened from `Home`; `Back`
    /// always returns there. `Refresh` keeps the screen and is expected to
    /// reset its state.
    pub fn transition(self, nav: Nav) -> Screen {
        match (self, nav) {
            (Screen::Home, Nav::Open(next)) => next,
            (current, Nav::Open(_)) => current,
            (_, Nav::Back) => Screen::Home,
            (current, Nav::Refresh) => current,
        }
    }
}
