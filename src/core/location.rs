//! Call-site resolution
//!
//! [`Location::resolve`] walks the current thread's stack and describes the
//! frame `skip` levels above its caller as `dir/file.rs@line:function()`.
//!
//! Skip counts are relative to the caller of the function that receives them,
//! and every layer that forwards a skip adds exactly one for its own frame:
//!
//! | layer                              | forwards                                 |
//! |------------------------------------|------------------------------------------|
//! | `StackWalker::frame_at(skip)`      | the frame `skip + 1` above itself        |
//! | `Location::resolve_with(w, skip)`  | `w.frame_at(skip + 1)`                   |
//! | `Location::resolve(skip)`          | `resolve_with(.., skip + 1)`             |
//! | `HeaderComposer::compose(skip)`    | `resolve(skip + 1)`                      |
//! | `LineFormatter::render_marker(skip)` | `resolve(skip + 1)`                    |
//! | `LineFormatter::format_line(skip)` | `compose(skip + 1)` or `render_marker(skip + 1)` |
//! | `LineFormatter::format(args)`      | `format_line(args, 1)`                   |
//! | `LineFormatter::format_with_skip(args, skip)` | `format_line(args, skip + 1)` |
//! | `Logger::render(args, skip)`       | `format_line(args, skip + 1)`            |
//! | `Logger::printw(args)`, `Logger::format(args)` | `render(args, 1)`            |
//!
//! All of them are `#[inline(never)]`, and none of them ends in a tail call to
//! the next layer: a layer whose last act is the forwarded call routes the
//! result through `keep_frame`. A tail call reuses the caller's frame and
//! would shift every count by one in optimized builds.
//!
//! The same holds for application code: a function whose last act is
//! `Location::resolve(0)` or `logger.format(..)` may be compiled as a tail
//! call, and the reported site is then its own caller.

use std::fmt;
use std::path::Path;

/// Placeholder used when the stack cannot be inspected
pub const NOT_AVAILABLE: &str = "N/A";

/// Hand `value` back after an opaque use of it.
///
/// Forwarding layers return through this so the call producing `value` is
/// never compiled as a tail call, which would drop the forwarding frame.
#[inline(always)]
pub(crate) fn keep_frame<T>(value: T) -> T {
    std::hint::black_box(&value);
    value
}

/// A single resolved stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub function: String,
    pub file: String,
    pub line: u32,
}

/// Access to the active call stack.
///
/// `frame_at(0)` describes the function that called `frame_at`.
pub trait StackWalker {
    fn frame_at(&self, skip: usize) -> Option<Frame>;
}

/// [`StackWalker`] backed by the `backtrace` crate and the binary's debug info
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceWalker;

impl StackWalker for BacktraceWalker {
    #[inline(never)]
    fn frame_at(&self, skip: usize) -> Option<Frame> {
        let mut anchor: Option<usize> = None;
        let mut index = 0usize;
        let mut found = None;

        // Frames below our own (the unwinder and this closure) vary by
        // platform, so count from the first frame that names `frame_at`.
        backtrace::trace(|frame| {
            match anchor {
                None => {
                    if symbol_of(frame).is_some_and(|s| is_walker_frame(&s.function)) {
                        anchor = Some(index);
                    }
                }
                Some(at) if index == at + 1 + skip => {
                    found = symbol_of(frame).and_then(Symbol::into_frame);
                    return false;
                }
                Some(_) => {}
            }
            index += 1;
            true
        });

        found
    }
}

struct Symbol {
    function: String,
    file: Option<String>,
    line: Option<u32>,
}

impl Symbol {
    fn into_frame(self) -> Option<Frame> {
        Some(Frame {
            function: self.function,
            file: self.file?,
            line: self.line?,
        })
    }
}

fn symbol_of(frame: &backtrace::Frame) -> Option<Symbol> {
    let mut symbol = None;
    backtrace::resolve_frame(frame, |s| {
        if symbol.is_some() {
            return;
        }
        if let Some(name) = s.name() {
            symbol = Some(Symbol {
                function: strip_hash(&format!("{:#}", name)).to_string(),
                file: s.filename().map(|p| p.to_string_lossy().into_owned()),
                line: s.lineno(),
            });
        }
    });
    symbol
}

fn is_walker_frame(function: &str) -> bool {
    function.contains("BacktraceWalker") && function.ends_with("frame_at")
}

/// Drop a legacy `::h0123456789abcdef` symbol hash if the demangler left one
fn strip_hash(name: &str) -> &str {
    match name.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()) => {
            head
        }
        _ => name,
    }
}

/// `<parent dir>/<file>`, or just `<file>` when there is no parent
fn short_path(file: &str) -> String {
    let path = Path::new(file);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());
    match path.parent().and_then(Path::file_name) {
        Some(dir) => format!("{}/{}", dir.to_string_lossy(), name),
        None => name,
    }
}

/// Last path segment of a qualified function name
fn bare_function(qualified: &str) -> &str {
    match qualified.rsplit_once("::") {
        Some((_, last)) if !last.is_empty() => last,
        _ => qualified,
    }
}

/// A resolved call site.
///
/// Both display forms are computed at resolution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    function_name: String,
    file_name: String,
    file_line: u32,
    long: String,
    short: String,
}

impl Location {
    /// Resolve the call site `skip` frames above the caller of `resolve`.
    ///
    /// `resolve(0)` describes the function that called it. Never fails:
    /// when the stack has no such frame, or the frame has no debug info,
    /// the result is [`Location::not_available`].
    #[inline(never)]
    pub fn resolve(skip: usize) -> Self {
        keep_frame(Self::resolve_with(&BacktraceWalker, skip + 1))
    }

    /// Like [`Location::resolve`] with an explicit stack walker
    #[inline(never)]
    pub fn resolve_with(walker: &dyn StackWalker, skip: usize) -> Self {
        match keep_frame(walker.frame_at(skip + 1)) {
            Some(frame) => Self::from_frame(frame),
            None => Self::not_available(),
        }
    }

    pub fn from_frame(frame: Frame) -> Self {
        let path = short_path(&frame.file);
        let long = format!("{}@{}:{}()", path, frame.line, frame.function);
        let short = format!(
            "{}@{}:{}()",
            path,
            frame.line,
            bare_function(&frame.function)
        );
        Self {
            function_name: frame.function,
            file_name: frame.file,
            file_line: frame.line,
            long,
            short,
        }
    }

    pub fn not_available() -> Self {
        Self {
            function_name: NOT_AVAILABLE.to_string(),
            file_name: String::new(),
            file_line: 0,
            long: NOT_AVAILABLE.to_string(),
            short: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.file_line != 0 || self.function_name != NOT_AVAILABLE
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_line(&self) -> u32 {
        self.file_line
    }

    /// `dir/file.rs@42:crate::module::function()`
    pub fn long(&self) -> &str {
        &self.long
    }

    /// `dir/file.rs@42:function()`
    pub fn short(&self) -> &str {
        &self.short
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.long)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedWalker(Vec<Frame>);

    impl StackWalker for FixedWalker {
        fn frame_at(&self, skip: usize) -> Option<Frame> {
            self.0.get(skip).cloned()
        }
    }

    #[inline(never)]
    fn sample_location() -> (Location, u32) {
        (Location::resolve(0), line!())
    }

    #[inline(never)]
    fn nested_caller() -> (Location, u32) {
        (nested_callee(), line!())
    }

    #[inline(never)]
    fn nested_callee() -> Location {
        keep_frame(Location::resolve(1))
    }

    #[test]
    fn test_resolve_reports_caller() {
        let (loc, line) = sample_location();

        assert!(loc.is_available());
        assert_eq!(loc.file_line(), line);
        assert!(loc.file_name().ends_with("location.rs"));
        assert!(loc.function_name().ends_with("location::tests::sample_location"));
        assert_eq!(
            loc.long(),
            format!("core/location.rs@{}:{}()", line, loc.function_name())
        );
        assert_eq!(
            loc.short(),
            format!("core/location.rs@{}:sample_location()", line)
        );
    }

    #[test]
    fn test_resolve_skips_frames() {
        let (loc, line) = nested_caller();

        assert_eq!(loc.file_line(), line);
        assert!(loc.short().ends_with(":nested_caller()"));
    }

    #[test]
    fn test_resolve_beyond_stack_is_not_available() {
        let loc = Location::resolve(100_000);

        assert!(!loc.is_available());
        assert_eq!(loc.function_name(), NOT_AVAILABLE);
        assert_eq!(loc.long(), NOT_AVAILABLE);
        assert_eq!(loc.short(), NOT_AVAILABLE);
        assert_eq!(loc.file_line(), 0);
        assert_eq!(loc.file_name(), "");
    }

    #[test]
    fn test_forms_from_walker() {
        let walker = FixedWalker(vec![
            Frame {
                function: "ignored".to_string(),
                file: "ignored.rs".to_string(),
                line: 1,
            },
            Frame {
                function: "billing::invoice::Invoice::settle".to_string(),
                file: "/srv/app/src/invoice/mod.rs".to_string(),
                line: 42,
            },
        ]);

        // skip 0 asks the walker for frame 1: the caller of resolve_with
        let loc = Location::resolve_with(&walker, 0);
        assert_eq!(loc.function_name(), "billing::invoice::Invoice::settle");
        assert_eq!(loc.file_name(), "/srv/app/src/invoice/mod.rs");
        assert_eq!(loc.long(), "invoice/mod.rs@42:billing::invoice::Invoice::settle()");
        assert_eq!(loc.short(), "invoice/mod.rs@42:settle()");
        assert_eq!(loc.to_string(), loc.long());

        assert!(!Location::resolve_with(&walker, 5).is_available());
    }

    #[test]
    fn test_trait_method_short_name() {
        let loc = Location::from_frame(Frame {
            function: "<app::Db as app::Store>::get".to_string(),
            file: "lib.rs".to_string(),
            line: 7,
        });
        assert_eq!(loc.short(), "lib.rs@7:get()");
    }

    #[test]
    fn test_strip_hash() {
        assert_eq!(strip_hash("app::main::h0123456789abcdef"), "app::main");
        assert_eq!(strip_hash("app::handler"), "app::handler");
        assert_eq!(strip_hash("app::hello"), "app::hello");
    }
}
