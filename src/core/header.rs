//! Flag-driven line headers
//!
//! A [`HeaderComposer`] is built once from a [`Flags`] set. Per call it
//! renders `time=...` and `loc=...`; the `level=...` tag is rendered once at
//! construction and kept by the logger as a persistent prefix.

use super::flags::Flags;
use super::location::Location;
use super::log_level::LogLevel;
use super::style::Stylize;
use super::timestamp::TimestampLayout;
use chrono::{DateTime, Utc};

/// Which form of the caller location goes into `loc=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerForm {
    Long,
    Short,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderComposer {
    flags: Flags,
    layout: Option<TimestampLayout>,
    caller: Option<CallerForm>,
    level: LogLevel,
}

impl HeaderComposer {
    pub fn new(flags: Flags) -> Self {
        let caller = if flags.contains(Flags::LONG_CALLER) {
            Some(CallerForm::Long)
        } else if flags.contains(Flags::SHORT_CALLER) {
            Some(CallerForm::Short)
        } else {
            None
        };
        Self {
            flags,
            layout: TimestampLayout::from_flags(flags),
            caller,
            level: LogLevel::from_flags(flags),
        }
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn layout(&self) -> Option<TimestampLayout> {
        self.layout
    }

    pub fn caller_form(&self) -> Option<CallerForm> {
        self.caller
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Headers for the current instant, with the call site `skip` frames
    /// above the caller of `compose`.
    #[inline(never)]
    pub fn compose(&self, skip: usize) -> String {
        let location = match self.caller {
            Some(_) => Some(Location::resolve(skip + 1)),
            None => None,
        };
        self.compose_at(&Utc::now(), location.as_ref())
    }

    /// Headers for a given instant and an already resolved location.
    ///
    /// `location` is ignored unless a caller flag is set.
    pub fn compose_at(&self, now: &DateTime<Utc>, location: Option<&Location>) -> String {
        let mut parts = Vec::with_capacity(2);

        if let Some(layout) = self.layout {
            parts.push(format!(
                "time={}",
                layout.format(now, self.flags.contains(Flags::UTC))
            ));
        }

        if let (Some(form), Some(location)) = (self.caller, location) {
            let rendered = match form {
                CallerForm::Long => location.long(),
                CallerForm::Short => location.short(),
            };
            parts.push(format!("loc={}", rendered));
        }

        parts.join(" ")
    }

    /// The `level=<name>` tag, styled with the level's color
    pub fn level_tag(&self, style: &dyn Stylize) -> String {
        style.stylize(
            &format!("level={}", self.level.to_str()),
            self.level.color_code(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::Frame;
    use crate::core::style::PlainStyle;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .expect("valid datetime")
    }

    fn location() -> Location {
        Location::from_frame(Frame {
            function: "pkg::file::Func".to_string(),
            file: "/src/pkg/file.rs".to_string(),
            line: 42,
        })
    }

    #[test]
    fn test_date_time_short_caller() {
        let composer =
            HeaderComposer::new(Flags::DATE | Flags::TIME | Flags::SHORT_CALLER | Flags::UTC);
        assert_eq!(
            composer.compose_at(&instant(), Some(&location())),
            "time=2024-01-02T03:04:05 loc=pkg/file.rs@42:Func()"
        );
    }

    #[test]
    fn test_long_caller_wins() {
        let composer = HeaderComposer::new(Flags::LONG_CALLER | Flags::SHORT_CALLER);
        assert_eq!(composer.caller_form(), Some(CallerForm::Long));
        assert_eq!(
            composer.compose_at(&instant(), Some(&location())),
            "loc=pkg/file.rs@42:pkg::file::Func()"
        );
    }

    #[test]
    fn test_no_flags_no_headers() {
        let composer = HeaderComposer::new(Flags::empty());
        assert_eq!(composer.compose_at(&instant(), Some(&location())), "");
        assert_eq!(composer.compose(0), "");
    }

    #[test]
    fn test_time_only_with_micros() {
        let composer = HeaderComposer::new(Flags::MICROSECONDS | Flags::UTC);
        let t = instant() + chrono::Duration::microseconds(42);
        assert_eq!(composer.compose_at(&t, None), "time=03:04:05.000042");
    }

    #[test]
    fn test_utc_only_falls_back_to_standard() {
        let composer = HeaderComposer::new(Flags::UTC);
        assert_eq!(
            composer.compose_at(&instant(), None),
            "time=2024-01-02T03:04:05+00:00"
        );
    }

    #[test]
    fn test_not_available_location() {
        let composer = HeaderComposer::new(Flags::SHORT_CALLER);
        assert_eq!(
            composer.compose_at(&instant(), Some(&Location::not_available())),
            "loc=N/A"
        );
    }

    #[inline(never)]
    fn compose_here(composer: &HeaderComposer) -> (String, u32) {
        (composer.compose(0), line!())
    }

    #[test]
    fn test_compose_resolves_caller() {
        let composer = HeaderComposer::new(Flags::SHORT_CALLER);
        let (header, line) = compose_here(&composer);
        assert_eq!(
            header,
            format!("loc=core/header.rs@{}:compose_here()", line)
        );
    }

    #[test]
    fn test_level_tag() {
        let composer = HeaderComposer::new(Flags::STD | Flags::WARN | Flags::DEBUG);
        assert_eq!(composer.level(), LogLevel::Warn);
        assert_eq!(composer.level_tag(&PlainStyle), "level=warn");
        assert_eq!(
            HeaderComposer::new(Flags::STD).level_tag(&PlainStyle),
            "level=info"
        );
    }
}
