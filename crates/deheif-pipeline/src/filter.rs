//! Eligibility filter.

use deheif_core::constants::SOURCE_MIME;
use deheif_core::{InboundMessage, MessageKind, RoomAllowList};

/// Decide whether a message is a conversion candidate.
///
/// Pure and total: malformed or missing fields make a message ineligible,
/// never an error. Rules short-circuit in order: room allow-list, message
/// kind, then an exact case-sensitive match on the declared MIME type.
pub fn is_eligible(message: &InboundMessage, allow_list: &RoomAllowList) -> bool {
    if !allow_list.permits(&message.room_id) {
        return false;
    }
    if !matches!(message.kind, MessageKind::Image | MessageKind::File) {
        return false;
    }
    message.mime_type.as_deref() == Some(SOURCE_MIME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deheif_core::MediaReference;

    fn message(room: &str, kind: MessageKind, mime: Option<&str>) -> InboundMessage {
        InboundMessage {
            room_id: room.to_string(),
            kind,
            mime_type: mime.map(str::to_string),
            media: MediaReference::Plain {
                locator: "mxc://host/abc".to_string(),
            },
            declared_width: None,
            declared_height: None,
        }
    }

    #[test]
    fn test_eligible_image_message() {
        let msg = message("!r:x.org", MessageKind::Image, Some("image/heic"));
        assert!(is_eligible(&msg, &RoomAllowList::default()));
    }

    #[test]
    fn test_eligible_file_message() {
        let msg = message("!r:x.org", MessageKind::File, Some("image/heic"));
        assert!(is_eligible(&msg, &RoomAllowList::default()));
    }

    #[test]
    fn test_other_kinds_ineligible() {
        for kind in [
            MessageKind::Text,
            MessageKind::Audio,
            MessageKind::Video,
            MessageKind::Other,
        ] {
            let msg = message("!r:x.org", kind, Some("image/heic"));
            assert!(!is_eligible(&msg, &RoomAllowList::default()));
        }
    }

    #[test]
    fn test_mime_must_match_exactly() {
        // One character off, wrong case, or stray whitespace all fail.
        for mime in [
            "image/heif",
            "image/HEIC",
            "Image/heic",
            " image/heic",
            "image/heic ",
            "image/jpeg",
        ] {
            let msg = message("!r:x.org", MessageKind::Image, Some(mime));
            assert!(!is_eligible(&msg, &RoomAllowList::default()), "{}", mime);
        }
    }

    #[test]
    fn test_missing_mime_ineligible_not_an_error() {
        let msg = message("!r:x.org", MessageKind::Image, None);
        assert!(!is_eligible(&msg, &RoomAllowList::default()));
    }

    #[test]
    fn test_allow_list_gates_rooms() {
        let list = RoomAllowList::new(vec!["!abc:example.org".to_string()]);

        let allowed = message("!abc:example.org", MessageKind::Image, Some("image/heic"));
        assert!(is_eligible(&allowed, &list));

        // Kind and MIME are fine; the room alone disqualifies it.
        let denied = message("!xyz:example.org", MessageKind::Image, Some("image/heic"));
        assert!(!is_eligible(&denied, &list));
    }
}
