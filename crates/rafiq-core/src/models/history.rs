/// One era of the fixed history catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEra {
    pub id: &'static str,
    pub title: &'static str,
    pub period: &'static str,
    pub icon: &'static str,
}

/// The explorable eras, in chronological order.
pub const ERAS: [HistoryEra; 6] = [
    HistoryEra {
        id: "creation",
        title: "Prophets & Creation",
        period: "Start of Time",
        icon: "mountain-sun",
    },
    HistoryEra {
        id: "seerah",
        title: "Life of Prophet (PBUH)",
        period: "570 - 632 CE",
        icon: "kaaba",
    },
    HistoryEra {
        id: "rashidun",
        title: "Rashidun Caliphate",
        period: "632 - 661 CE",
        icon: "shield",
    },
    HistoryEra {
        id: "umayyad",
        title: "Umayyad Empire",
        period: "661 - 750 CE",
        icon: "fort",
    },
    HistoryEra {
        id: "abbasid",
        title: "Abbasid Golden Age",
        period: "750 - 1258 CE",
        icon: "flask",
    },
    HistoryEra {
        id: "ottoman",
        title: "The Ottoman State",
        period: "1299 - 1922 CE",
        icon: "landmark",
    },
];
