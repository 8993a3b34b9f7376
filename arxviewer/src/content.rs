//! What a display shows for a given record

use arxcollection::ArtworkRecord;

/// Label text used when the record could not be displayed
pub const UNDEFINED_LABEL: &str = "undefined";

/// Label text used for an empty title or artist
pub const UNKNOWN_LABEL: &str = "unknown";

/// Where the surface bitmap comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Image URL of the artwork record
    Remote(String),
    /// Local error image
    Placeholder,
}

/// Image and label texts of one display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContent {
    pub image: ImageSource,
    pub title: String,
    pub artist: String,
}

impl DisplayContent {
    /// Resolves the image source and label texts of `record`
    ///
    /// The error sentinel and records without an image URL both show the
    /// placeholder with `"undefined"` labels. Otherwise empty title or
    /// artist fields read `"unknown"`.
    pub fn resolve(record: &ArtworkRecord) -> Self {
        match record.artwork() {
            Some(object) if object.has_image() => Self {
                image: ImageSource::Remote(object.primary_image.clone()),
                title: or_unknown(&object.title),
                artist: or_unknown(&object.artist_display_name),
            },
            _ => Self::placeholder(),
        }
    }

    pub fn placeholder() -> Self {
        Self {
            image: ImageSource::Placeholder,
            title: UNDEFINED_LABEL.to_string(),
            artist: UNDEFINED_LABEL.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.image == ImageSource::Placeholder
    }
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arxcollection::ArtObject;

    fn record(image: &str, title: &str, artist: &str) -> ArtworkRecord {
        ArtworkRecord::Artwork(ArtObject {
            object_id: 1,
            primary_image: image.to_string(),
            title: title.to_string(),
            artist_display_name: artist.to_string(),
            ..ArtObject::default()
        })
    }

    #[test]
    fn test_complete_record() {
        let content = DisplayContent::resolve(&record("https://img/1.jpg", "Study", "Anon"));
        assert_eq!(content.image, ImageSource::Remote("https://img/1.jpg".to_string()));
        assert_eq!(content.title, "Study");
        assert_eq!(content.artist, "Anon");
    }

    #[test]
    fn test_empty_title_and_artist_are_unknown() {
        let content = DisplayContent::resolve(&record("https://img/1.jpg", "", ""));
        assert!(!content.is_placeholder());
        assert_eq!(content.title, "unknown");
        assert_eq!(content.artist, "unknown");

        let content = DisplayContent::resolve(&record("https://img/1.jpg", "Study", ""));
        assert_eq!(content.title, "Study");
        assert_eq!(content.artist, "unknown");
    }

    #[test]
    fn test_sentinel_uses_placeholder() {
        let content = DisplayContent::resolve(&ArtworkRecord::Error);
        assert!(content.is_placeholder());
        assert_eq!(content.title, "undefined");
        assert_eq!(content.artist, "undefined");
    }

    #[test]
    fn test_empty_image_overrides_labels() {
        let content = DisplayContent::resolve(&record("", "Study", "Anon"));
        assert_eq!(content, DisplayContent::placeholder());
    }
}
