use rand::distributions::Alphanumeric;
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// `<10 alphanumerics>_<epoch millis>`, the shape the watch API expects.
pub fn action_track_id() -> String {
    let prefix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect();
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();

    format!("{}_{}", prefix, millis)
}

/// Parses `[[h:]m:]s` into seconds.
pub fn parse_duration(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    parts.iter().try_fold(0u64, |total, part| {
        let value: u64 = part.parse().ok()?;
        total.checked_mul(60)?.checked_add(value)
    })
}

pub fn format_duration(seconds: u64) -> String {
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_track_id_shape() {
        let id = action_track_id();
        let (prefix, millis) = id.split_once('_').unwrap();
        assert_eq!(prefix.len(), 10);
        assert!(prefix.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(millis.parse::<u128>().is_ok());
    }

    #[test]
    fn test_action_track_ids_differ() {
        assert_ne!(action_track_id(), action_track_id());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("4:13"), Some(253));
        assert_eq!(parse_duration("1:04:13"), Some(3853));
        assert_eq!(parse_duration("59"), Some(59));
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("1:x"), None);
        assert_eq!(parse_duration("1:2:3:4"), None);
        assert_eq!(parse_duration("18446744073709551615:00"), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(253), "4:13");
        assert_eq!(format_duration(3853), "1:04:13");
    }
}
