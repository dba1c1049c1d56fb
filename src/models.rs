//! Profile and card types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::binding::Binding;
use crate::error::{Error, Result};
use crate::store::Record;

/// Shown on a card when the profile has no profession
pub const MISSING_PROFESSION: &str = "N/A";

/// Wire layout of a user document.
///
/// Absent values serialize as `null` so that an upsert clears the column.
#[derive(Debug, Serialize, Deserialize)]
struct UserRecord {
    uid: String,
    #[serde(rename = "fullName", default)]
    full_name: Option<String>,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    profession: Option<String>,
    #[serde(rename = "minSeekingAge", default)]
    min_seeking_age: Option<u32>,
    #[serde(rename = "maxSeekingAge", default)]
    max_seeking_age: Option<u32>,
    #[serde(rename = "imageUrl1", default)]
    image_url1: Option<String>,
    #[serde(rename = "imageUrl2", default)]
    image_url2: Option<String>,
    #[serde(rename = "imageUrl3", default)]
    image_url3: Option<String>,
}

/// A dating profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub profession: Option<String>,
    pub min_seeking_age: Option<u32>,
    pub max_seeking_age: Option<u32>,
    pub image_urls: Vec<String>,
}

impl User {
    /// Build a user from a raw document.
    ///
    /// Only `uid` is required. Fields that are present must have the right
    /// type, so a fractional or textual `age` is malformed.
    pub fn from_record(record: &Record) -> Result<Self> {
        let raw: UserRecord =
            serde_json::from_value(Value::Object(record.clone())).map_err(Error::malformed)?;

        let image_urls = [raw.image_url1, raw.image_url2, raw.image_url3]
            .into_iter()
            .flatten()
            .filter(|url| !url.is_empty())
            .collect();

        Ok(Self {
            uid: raw.uid,
            name: raw.full_name,
            age: raw.age,
            profession: raw.profession,
            min_seeking_age: raw.min_seeking_age,
            max_seeking_age: raw.max_seeking_age,
            image_urls,
        })
    }

    /// Serialize back to the document layout, with every key present
    pub fn to_record(&self) -> Result<Record> {
        let mut images = self.image_urls.iter().cloned();
        let raw = UserRecord {
            uid: self.uid.clone(),
            full_name: self.name.clone(),
            age: self.age,
            profession: self.profession.clone(),
            min_seeking_age: self.min_seeking_age,
            max_seeking_age: self.max_seeking_age,
            image_url1: images.next(),
            image_url2: images.next(),
            image_url3: images.next(),
        };

        match serde_json::to_value(raw)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::malformed(format!("expected an object, got {}", other))),
        }
    }

    /// Both seeking bounds are present
    pub fn has_preferences(&self) -> bool {
        self.min_seeking_age.is_some() && self.max_seeking_age.is_some()
    }

    /// Age and both seeking bounds are present; only such users become cards
    pub fn is_complete(&self) -> bool {
        self.age.is_some() && self.has_preferences()
    }

    /// Presentation projection for the deck
    pub fn to_card_view_model(&self) -> CardViewModel {
        CardViewModel::from(self)
    }
}

/// Typographic role of a span of card text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Headline,
    Body,
}

/// A run of card text with a single style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: TextStyle,
}

impl StyledSpan {
    fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// What a swipe card shows for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardViewModel {
    pub uid: String,
    pub headline: String,
    pub image_urls: Vec<String>,
    pub attributed_text: Vec<StyledSpan>,
}

impl CardViewModel {
    /// The attributed text with styles dropped
    pub fn plain_text(&self) -> String {
        self.attributed_text
            .iter()
            .map(|span| span.text.as_str())
            .collect()
    }
}

impl From<&User> for CardViewModel {
    fn from(user: &User) -> Self {
        let name = user.name.as_deref().unwrap_or_default();
        let age = user.age.map(|age| age.to_string()).unwrap_or_default();
        let profession = user.profession.as_deref().unwrap_or(MISSING_PROFESSION);

        let headline = match (name.is_empty(), age.is_empty()) {
            (true, _) => age.clone(),
            (false, true) => name.to_string(),
            (false, false) => format!("{} {}", name, age),
        };

        Self {
            uid: user.uid.clone(),
            headline,
            image_urls: user.image_urls.clone(),
            attributed_text: vec![
                StyledSpan::new(name, TextStyle::Headline),
                StyledSpan::new(format!("  {}", age), TextStyle::Body),
                StyledSpan::new(format!("\n{}", profession), TextStyle::Body),
            ],
        }
    }
}

/// Which photo of a card is on screen
#[derive(Debug)]
pub struct PhotoCursor {
    image_urls: Vec<String>,
    index: usize,
    /// Publishes `(index, url)` whenever the photo changes
    pub current: Binding<(usize, String)>,
}

impl PhotoCursor {
    /// Start on the first photo of `card`
    pub fn new(card: &CardViewModel) -> Self {
        let image_urls = card.image_urls.clone();
        let current = match image_urls.first() {
            Some(url) => Binding::with_value((0, url.clone())),
            None => Binding::new(),
        };

        Self {
            image_urls,
            index: 0,
            current,
        }
    }

    /// Position of the photo on screen
    pub fn index(&self) -> usize {
        self.index
    }

    /// URL of the photo on screen, `None` for a card without photos
    pub fn current_url(&self) -> Option<&str> {
        self.image_urls.get(self.index).map(String::as_str)
    }

    /// Move to the next photo, stopping at the last one
    pub fn advance(&mut self) {
        if self.image_urls.is_empty() {
            return;
        }
        self.index = (self.index + 1).min(self.image_urls.len() - 1);
        self.publish();
    }

    /// Move to the previous photo, stopping at the first one
    pub fn retreat(&mut self) {
        if self.image_urls.is_empty() {
            return;
        }
        self.index = self.index.saturating_sub(1);
        self.publish();
    }

    fn publish(&mut self) {
        if let Some(url) = self.image_urls.get(self.index) {
            self.current.set((self.index, url.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_from_record() {
        let user = User::from_record(&record(json!({
            "uid": "u1",
            "fullName": "Kelly",
            "age": 28,
            "profession": "Nurse",
            "minSeekingAge": 25,
            "maxSeekingAge": 35,
            "imageUrl1": "https://img/1.jpg",
            "imageUrl2": "",
            "imageUrl3": "https://img/3.jpg"
        })))
        .unwrap();

        assert_eq!(user.uid, "u1");
        assert_eq!(user.name.as_deref(), Some("Kelly"));
        assert_eq!(user.age, Some(28));
        assert_eq!(user.image_urls, vec!["https://img/1.jpg", "https://img/3.jpg"]);
        assert!(user.is_complete());
    }

    #[test]
    fn test_malformed_records() {
        let missing_age = record(json!({
            "uid": "u1",
            "fullName": "No Age",
            "minSeekingAge": 20,
            "maxSeekingAge": 30
        }));
        let user = User::from_record(&missing_age).unwrap();
        assert_eq!(user.age, None);
        assert!(user.has_preferences());
        assert!(!user.is_complete());

        let fractional_age = record(json!({ "uid": "u1", "age": 29.5 }));
        assert!(matches!(
            User::from_record(&fractional_age),
            Err(Error::MalformedRecord(_))
        ));

        let string_age = record(json!({ "uid": "u1", "age": "thirty" }));
        assert!(matches!(
            User::from_record(&string_age),
            Err(Error::MalformedRecord(_))
        ));

        let missing_uid = record(json!({ "age": 30 }));
        assert!(User::from_record(&missing_uid).is_err());
    }

    #[test]
    fn test_incomplete_without_preferences() {
        let user = User::from_record(&record(json!({
            "uid": "u2",
            "age": 40,
            "minSeekingAge": 30
        })))
        .unwrap();
        assert!(!user.has_preferences());
        assert!(!user.is_complete());
    }

    #[test]
    fn test_record_roundtrip_keeps_layout() {
        let user = User {
            uid: "u3".to_string(),
            name: Some("Sam".to_string()),
            age: Some(31),
            profession: None,
            min_seeking_age: Some(18),
            max_seeking_age: Some(50),
            image_urls: vec!["a".to_string(), "b".to_string()],
        };

        let rec = user.to_record().unwrap();
        assert_eq!(rec.get("fullName"), Some(&json!("Sam")));
        assert_eq!(rec.get("imageUrl2"), Some(&json!("b")));
        assert_eq!(rec.get("imageUrl3"), Some(&Value::Null));
        assert_eq!(rec.get("profession"), Some(&Value::Null));
        assert_eq!(User::from_record(&rec).unwrap(), user);
    }

    #[test]
    fn test_cleared_fields_are_written_as_null() {
        let user = User {
            uid: "u7".to_string(),
            name: None,
            age: None,
            profession: None,
            min_seeking_age: None,
            max_seeking_age: None,
            image_urls: Vec::new(),
        };

        let rec = user.to_record().unwrap();
        for key in [
            "fullName",
            "age",
            "profession",
            "minSeekingAge",
            "maxSeekingAge",
            "imageUrl1",
            "imageUrl2",
            "imageUrl3",
        ] {
            assert_eq!(rec.get(key), Some(&Value::Null), "{} not cleared", key);
        }
        assert_eq!(rec.get("uid"), Some(&json!("u7")));
    }

    #[test]
    fn test_card_view_model() {
        let user = User {
            uid: "u4".to_string(),
            name: Some("Jane".to_string()),
            age: Some(26),
            profession: None,
            min_seeking_age: None,
            max_seeking_age: None,
            image_urls: vec!["x".to_string()],
        };

        let card = user.to_card_view_model();
        assert_eq!(card.uid, "u4");
        assert_eq!(card.headline, "Jane 26");
        assert_eq!(card.image_urls, vec!["x"]);
        assert_eq!(card.plain_text(), "Jane  26\nN/A");
        assert_eq!(card.attributed_text[0].style, TextStyle::Headline);
        assert_eq!(card.attributed_text[2].style, TextStyle::Body);
    }

    #[test]
    fn test_photo_cursor_clamps() {
        let card = CardViewModel {
            uid: "u5".to_string(),
            headline: "x".to_string(),
            image_urls: vec!["a".to_string(), "b".to_string()],
            attributed_text: Vec::new(),
        };
        let mut cursor = PhotoCursor::new(&card);
        assert_eq!(cursor.current.value(), Some((0, "a".to_string())));

        cursor.retreat();
        assert_eq!(cursor.index(), 0);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.index(), 1);
        assert_eq!(cursor.current_url(), Some("b"));
        assert_eq!(cursor.current.value(), Some((1, "b".to_string())));
    }

    #[test]
    fn test_photo_cursor_without_images() {
        let card = CardViewModel {
            uid: "u6".to_string(),
            headline: "x".to_string(),
            image_urls: Vec::new(),
            attributed_text: Vec::new(),
        };
        let mut cursor = PhotoCursor::new(&card);
        cursor.advance();
        assert_eq!(cursor.current_url(), None);
        assert!(cursor.current.get().is_none());
    }
}
