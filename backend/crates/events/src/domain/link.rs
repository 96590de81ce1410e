//! Booking link helpers

use crate::error::{EventsError, EventsResult};

/// Separator between usernames in a group label
const GROUP_LABEL_SEPARATOR: &str = ",";

/// Separator between usernames in a multi-host booking path
const PATH_USER_SEPARATOR: &str = "+";

/// Comma-joined usernames, input order kept. Empty input gives `""`.
pub fn format_group_label<S: AsRef<str>>(usernames: &[S]) -> String {
    join(usernames, GROUP_LABEL_SEPARATOR)
}

/// Booking path for one or more hosts: `/<alice>/<slug>` or
/// `/<alice+bob>/<slug>`.
///
/// ## Errors
/// `EventsError::InvalidArgument` when `usernames` is empty.
pub fn format_booking_path<S: AsRef<str>>(usernames: &[S], slug: &str) -> EventsResult<String> {
    if usernames.is_empty() {
        return Err(EventsError::InvalidArgument(
            "at least one username is required to build a booking path".to_string(),
        ));
    }

    Ok(format!("/{}/{}", join(usernames, PATH_USER_SEPARATOR), slug))
}

fn join<S: AsRef<str>>(parts: &[S], separator: &str) -> String {
    parts
        .iter()
        .map(|part| part.as_ref())
        .collect::<Vec<&str>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_label() {
        assert_eq!(format_group_label(&["a", "b", "c"]), "a,b,c");
        assert_eq!(format_group_label(&["solo"]), "solo");
        assert_eq!(format_group_label::<&str>(&[]), "");
    }

    #[test]
    fn test_group_label_keeps_order() {
        let users = vec!["zed".to_string(), "amy".to_string()];
        assert_eq!(format_group_label(&users), "zed,amy");
    }

    #[test]
    fn test_single_user_path() {
        assert_eq!(
            format_booking_path(&["alice"], "intro").unwrap(),
            "/alice/intro"
        );
    }

    #[test]
    fn test_multi_user_path_keeps_every_user_in_order() {
        assert_eq!(
            format_booking_path(&["alice", "bob"], "intro").unwrap(),
            "/alice+bob/intro"
        );
        assert_eq!(
            format_booking_path(&["carol", "alice", "bob"], "30min").unwrap(),
            "/carol+alice+bob/30min"
        );
    }

    #[test]
    fn test_empty_users_is_invalid_argument() {
        let result = format_booking_path::<&str>(&[], "intro");
        assert!(matches!(result, Err(EventsError::InvalidArgument(_))));
    }
}
