/// Coarse channel classification used by the statistics and channel pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Text,
    Voice,
    Category,
    Other,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
            Self::Category => "category",
            Self::Other => "other",
        }
    }
}

/// A guild channel as seen by the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: u64,
    pub name: String,
    pub kind: ChannelKind,
    pub position: u16,
    /// Category the channel is nested under, if any.
    pub parent_id: Option<u64>,
    pub topic: Option<String>,
}
