use chrono::{DateTime, Local};

use crate::core::constants::DEFAULT_SHOW_CHAR;

/// Styling tag attached to an entry. The colours behind each tag are
/// resolved by the theme layer; the buffer only carries the tag around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeItem {
    #[default]
    Default,
    Time,
    Me,
    Them,
    RoomMention,
    RoomTrigger,
    Info,
    Warning,
    Error,
    Receipt,
}

impl ThemeItem {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeItem::Default => "default",
            ThemeItem::Time => "time",
            ThemeItem::Me => "me",
            ThemeItem::Them => "them",
            ThemeItem::RoomMention => "room/mention",
            ThemeItem::RoomTrigger => "room/trigger",
            ThemeItem::Info => "info",
            ThemeItem::Warning => "warning",
            ThemeItem::Error => "error",
            ThemeItem::Receipt => "receipt",
        }
    }
}

impl AsRef<str> for ThemeItem {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for ThemeItem {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, String> {
        match value {
            "default" => Ok(ThemeItem::Default),
            "time" => Ok(ThemeItem::Time),
            "me" => Ok(ThemeItem::Me),
            "them" => Ok(ThemeItem::Them),
            "room/mention" => Ok(ThemeItem::RoomMention),
            "room/trigger" => Ok(ThemeItem::RoomTrigger),
            "info" => Ok(ThemeItem::Info),
            "warning" => Ok(ThemeItem::Warning),
            "error" => Ok(ThemeItem::Error),
            "receipt" => Ok(ThemeItem::Receipt),
            _ => Err(format!("invalid theme item: {value}")),
        }
    }
}

impl TryFrom<String> for ThemeItem {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        Self::try_from(value.as_str())
    }
}

impl From<ThemeItem> for String {
    fn from(value: ThemeItem) -> Self {
        value.as_str().to_string()
    }
}

/// Origin category of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FromType {
    /// Sent by the local user.
    Me,
    /// One-to-one contact.
    Contact,
    /// Occupant of a multi-user room.
    Occupant,
    /// Generated by the client itself.
    System,
}

impl FromType {
    pub fn is_me(self) -> bool {
        self == FromType::Me
    }
}

/// Who an entry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFrom {
    pub from_type: FromType,
    pub from: String,
}

impl EntryFrom {
    pub fn new(from_type: FromType, from: impl Into<String>) -> Self {
        Self {
            from_type,
            from: from.into(),
        }
    }
}

/// Timestamp shown alongside an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferDate {
    pub timestamp: DateTime<Local>,
    pub colour_date: bool,
}

impl BufferDate {
    /// Uses `timestamp` when given, otherwise the current local time.
    pub fn new(timestamp: Option<DateTime<Local>>, colour_date: bool) -> Self {
        Self {
            timestamp: timestamp.unwrap_or_else(Local::now),
            colour_date,
        }
    }

    /// Current local time, coloured.
    pub fn now() -> Self {
        Self::new(None, true)
    }
}

/// Delivery marker for a sent message awaiting acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub id: String,
    pub received: bool,
}

impl Receipt {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            received: false,
        }
    }
}

/// One renderable line of conversation history.
///
/// The message text is fixed at construction. Rendering hints and the
/// optional sub-records are readable through accessors; only the receipt
/// can be modified afterwards, so that acknowledgments can be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    theme_item: ThemeItem,
    date: Option<BufferDate>,
    show_char: char,
    origin: Option<EntryFrom>,
    message: String,
    pad_indent: usize,
    newline: bool,
    receipt: Option<Receipt>,
}

impl Entry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        theme_item: ThemeItem,
        date: Option<BufferDate>,
        show_char: char,
        origin: Option<EntryFrom>,
        message: impl Into<String>,
        pad_indent: usize,
        newline: bool,
        receipt: Option<Receipt>,
    ) -> Self {
        Self {
            theme_item,
            date,
            show_char,
            origin,
            message: message.into(),
            pad_indent,
            newline,
            receipt,
        }
    }

    /// Plain line with no date, origin or receipt, ending in a newline.
    pub fn line(theme_item: ThemeItem, message: impl Into<String>) -> Self {
        Self::new(
            theme_item,
            None,
            DEFAULT_SHOW_CHAR,
            None,
            message,
            0,
            true,
            None,
        )
    }

    pub fn with_date(mut self, date: BufferDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_origin(mut self, origin: EntryFrom) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_receipt(mut self, receipt: Receipt) -> Self {
        self.receipt = Some(receipt);
        self
    }

    pub fn with_show_char(mut self, show_char: char) -> Self {
        self.show_char = show_char;
        self
    }

    pub fn with_pad_indent(mut self, pad_indent: usize) -> Self {
        self.pad_indent = pad_indent;
        self
    }

    pub fn with_newline(mut self, newline: bool) -> Self {
        self.newline = newline;
        self
    }

    pub fn theme_item(&self) -> ThemeItem {
        self.theme_item
    }

    pub fn date(&self) -> Option<&BufferDate> {
        self.date.as_ref()
    }

    pub fn show_char(&self) -> char {
        self.show_char
    }

    pub fn origin(&self) -> Option<&EntryFrom> {
        self.origin.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn pad_indent(&self) -> usize {
        self.pad_indent
    }

    pub fn newline(&self) -> bool {
        self.newline
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    pub fn receipt_mut(&mut self) -> Option<&mut Receipt> {
        self.receipt.as_mut()
    }

    /// Whether this entry carries a receipt with the given id.
    pub fn has_receipt_id(&self, id: &str) -> bool {
        self.receipt.as_ref().is_some_and(|receipt| receipt.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn date_defaults_to_now_when_missing() {
        let before = Local::now();
        let date = BufferDate::new(None, false);
        let after = Local::now();

        assert!(date.timestamp >= before && date.timestamp <= after);
        assert!(!date.colour_date);
    }

    #[test]
    fn date_keeps_supplied_timestamp() {
        let stamp = Local.with_ymd_and_hms(2016, 3, 1, 12, 30, 0).unwrap();
        let date = BufferDate::new(Some(stamp), true);
        assert_eq!(date.timestamp, stamp);
        assert!(date.colour_date);
    }

    #[test]
    fn date_now_is_coloured() {
        assert!(BufferDate::now().colour_date);
    }

    #[test]
    fn receipt_starts_unreceived() {
        let receipt = Receipt::new("msg-1");
        assert_eq!(receipt.id, "msg-1");
        assert!(!receipt.received);
    }

    #[test]
    fn empty_strings_are_accepted() {
        let entry = Entry::new(
            ThemeItem::Default,
            None,
            ' ',
            Some(EntryFrom::new(FromType::Contact, "")),
            "",
            0,
            false,
            Some(Receipt::new("")),
        );
        assert_eq!(entry.message(), "");
        assert_eq!(entry.origin().map(|f| f.from.as_str()), Some(""));
        assert!(entry.has_receipt_id(""));
    }

    #[test]
    fn line_has_no_optional_records() {
        let entry = Entry::line(ThemeItem::Info, "Connected");
        assert!(entry.date().is_none());
        assert!(entry.origin().is_none());
        assert!(entry.receipt().is_none());
        assert_eq!(entry.show_char(), DEFAULT_SHOW_CHAR);
        assert!(entry.newline());
        assert_eq!(entry.pad_indent(), 0);
    }

    #[test]
    fn builder_fills_optional_records() {
        let entry = Entry::line(ThemeItem::Me, "hello")
            .with_origin(EntryFrom::new(FromType::Me, "alice"))
            .with_receipt(Receipt::new("id-7"))
            .with_show_char('!')
            .with_pad_indent(4)
            .with_newline(false);

        assert!(entry.origin().is_some_and(|from| from.from_type.is_me()));
        assert!(entry.has_receipt_id("id-7"));
        assert!(!entry.has_receipt_id("id-8"));
        assert_eq!(entry.show_char(), '!');
        assert_eq!(entry.pad_indent(), 4);
        assert!(!entry.newline());
    }

    #[test]
    fn receipt_can_be_marked_through_entry() {
        let mut entry = Entry::line(ThemeItem::Me, "hi").with_receipt(Receipt::new("r"));
        if let Some(receipt) = entry.receipt_mut() {
            receipt.received = true;
        }
        assert!(entry.receipt().is_some_and(|r| r.received));
    }

    #[test]
    fn theme_item_round_trips_through_strings() {
        assert_eq!(ThemeItem::try_from("room/mention"), Ok(ThemeItem::RoomMention));
        assert_eq!(String::from(ThemeItem::Receipt), "receipt");
        assert!(ThemeItem::try_from("room/unknown").is_err());
    }
}
