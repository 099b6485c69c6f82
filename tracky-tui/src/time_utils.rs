use std::sync::OnceLock;

use time::{OffsetDateTime, UtcOffset};

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Captures the local UTC offset. `UtcOffset::current_local_offset` refuses to
/// run once the process is multi-threaded, so this must be called before the
/// tokio runtime is built. Falls back to UTC when the offset cannot be
/// determined.
pub fn init_local_offset() {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let _ = LOCAL_OFFSET.set(offset);
}

fn local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get().unwrap_or(&UtcOffset::UTC)
}

pub fn to_local_time(dt: OffsetDateTime) -> OffsetDateTime {
    dt.to_offset(local_offset())
}

pub fn local_now() -> OffsetDateTime {
    to_local_time(OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn converts_with_the_captured_offset() {
        let _ = LOCAL_OFFSET.set(UtcOffset::from_hms(2, 0, 0).unwrap());

        let utc = datetime!(2024-03-10 12:00 UTC);
        let local = to_local_time(utc);

        assert_eq!(local.offset(), local_offset());
        assert_eq!(local, utc);
    }
}
