//! crates/logging-sink/src/caller.rs
//! Call-site attribution.
//!
//! Facade entry points are `#[track_caller]`, so the [`Location`] they capture
//! already points at application code no matter how many facade layers sit in
//! between. A [`CallSite`] pairs that location with two frame counts:
//!
//! - `skip`: frames between the sink call and the application call site, as
//!   accumulated by the facade's depth arithmetic.
//! - `folded`: how many of those frames were `#[track_caller]` layers and are
//!   therefore already folded into the captured location.
//!
//! The difference, [`CallSite::extra`], is the number of untracked frames above
//! the captured location that the record should be attributed to. Resolving
//! those is the job of a [`CallerResolver`].

use std::fmt;
use std::panic::Location;
use std::path::Path;

use backtrace::{Backtrace, BacktraceFrame, BacktraceSymbol};

/// Captured location plus the frame arithmetic needed to resolve the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CallSite {
    location: &'static Location<'static>,
    skip: i32,
    folded: i32,
}

impl CallSite {
    /// Creates a call site from an explicit location.
    #[must_use]
    pub const fn new(location: &'static Location<'static>, skip: i32, folded: i32) -> Self {
        Self {
            location,
            skip,
            folded,
        }
    }

    /// Captures the location of the caller of the enclosing `#[track_caller]` chain.
    #[must_use]
    #[track_caller]
    pub fn here(skip: i32, folded: i32) -> Self {
        Self::new(Location::caller(), skip, folded)
    }

    /// The captured location.
    #[must_use]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Frames between the sink call and the application call site.
    #[must_use]
    pub const fn skip(&self) -> i32 {
        self.skip
    }

    /// Frames already folded into [`location`](Self::location).
    #[must_use]
    pub const fn folded(&self) -> i32 {
        self.folded
    }

    /// Untracked frames to walk above the captured location.
    ///
    /// Zero for every logger the facade builds itself. Negative values mean
    /// the depth was rewound below the captured location.
    #[must_use]
    pub const fn extra(&self) -> i32 {
        self.skip - self.folded
    }
}

/// Resolved source location of a record.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Caller {
    file: String,
    line: u32,
    function: Option<String>,
}

impl Caller {
    /// Creates a caller from its parts.
    pub fn new(file: impl Into<String>, line: u32, function: Option<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function,
        }
    }

    /// Creates a caller from a captured location; the function is unknown.
    #[must_use]
    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line(), None)
    }

    /// Full source path as recorded by the compiler or debug info.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The last two components of [`file`](Self::file).
    #[must_use]
    pub fn short_file(&self) -> &str {
        short_path(&self.file)
    }

    /// Line number, `0` when unknown.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Demangled function path, when stack walking resolved one.
    #[must_use]
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.short_file(), self.line)?;
        if let Some(function) = &self.function {
            write!(f, "${function}")?;
        }
        Ok(())
    }
}

fn short_path(path: &str) -> &str {
    let mut separators = 0;
    for (index, byte) in path.bytes().enumerate().rev() {
        if byte == b'/' || byte == b'\\' {
            separators += 1;
            if separators == 2 {
                return &path[index + 1..];
            }
        }
    }
    path
}

/// Turns a [`CallSite`] into the [`Caller`] written on a record.
pub trait CallerResolver: Send + Sync {
    /// Resolves the caller for `site`.
    fn resolve(&self, site: &CallSite) -> Caller;
}

/// Resolver that always reports the captured location.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrackedResolver;

impl CallerResolver for TrackedResolver {
    fn resolve(&self, site: &CallSite) -> Caller {
        Caller::from_location(site.location())
    }
}

/// Resolver that walks the stack when a record asks for untracked frames.
///
/// With no extra frames the captured location is used directly, which needs
/// no debug info and costs nothing. Positive extra frames are resolved by
/// locating the captured call site in a backtrace and stepping outwards one
/// logical frame (inlined frames included) at a time. Negative extra frames
/// resolve to the captured location.
///
/// The captured location is also used when the walk cannot be trusted:
///
/// - the site is not in the backtrace, for example in a stripped binary;
/// - the stack ends before enough frames were stepped;
/// - the frame landed on has no file or line, or belongs to the standard
///   library.
///
/// Counting is exact only while every untracked wrapper still has a frame of
/// its own. Optimized builds may turn a wrapper's final call into a tail call
/// and drop its frame, so the walk lands further out than intended. Wrappers
/// marked `#[track_caller]` are folded into the captured location instead
/// and are attributed correctly at any optimization level.
#[derive(Clone, Copy, Debug, Default)]
pub struct BacktraceResolver;

impl CallerResolver for BacktraceResolver {
    fn resolve(&self, site: &CallSite) -> Caller {
        let extra = site.extra();
        if extra <= 0 {
            return Caller::from_location(site.location());
        }
        walk_from(site.location(), extra.unsigned_abs() as usize)
            .unwrap_or_else(|| Caller::from_location(site.location()))
    }
}

fn walk_from(location: &Location<'_>, extra: usize) -> Option<Caller> {
    let mut trace = Backtrace::new_unresolved();
    trace.resolve();

    let target = Path::new(location.file());
    let mut remaining = None;
    for symbol in trace.frames().iter().flat_map(BacktraceFrame::symbols) {
        match remaining {
            None if is_site(symbol, target, location.line()) => remaining = Some(extra),
            None => {}
            Some(1) => return caller_from_symbol(symbol),
            Some(left) => remaining = Some(left - 1),
        }
    }
    None
}

fn is_site(symbol: &BacktraceSymbol, target: &Path, line: u32) -> bool {
    symbol.lineno() == Some(line)
        && symbol
            .filename()
            .is_some_and(|file| file.ends_with(target))
}

fn caller_from_symbol(symbol: &BacktraceSymbol) -> Option<Caller> {
    let file = symbol.filename()?;
    let line = symbol.lineno()?;
    if is_runtime_file(file) {
        return None;
    }
    let function = symbol.name().map(|name| format!("{name:#}"));
    Some(Caller::new(file.display().to_string(), line, function))
}

/// Sources of the standard library as recorded in debug info, either under
/// the remapped `/rustc/<hash>/` prefix or inside a toolchain's `rust-src`.
fn is_runtime_file(file: &Path) -> bool {
    let file = file.to_string_lossy();
    file.starts_with("/rustc/")
        || file.contains("/rustlib/src/rust/library/")
        || file.contains(r"\rustlib\src\rust\library\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_is_skip_minus_folded() {
        let site = CallSite::here(4, 1);
        assert_eq!(site.extra(), 3);
        assert_eq!(CallSite::here(1, 2).extra(), -1);
    }

    #[test]
    fn call_site_captures_this_line() {
        let expected_line = line!() + 1;
        let site = CallSite::here(1, 1);
        assert_eq!(site.location().line(), expected_line);
        assert!(site.location().file().ends_with("caller.rs"));
    }

    #[test]
    fn short_file_keeps_two_components() {
        let caller = Caller::new("/root/crate/crates/logging/src/logger.rs", 12, None);
        assert_eq!(caller.short_file(), "src/logger.rs");
        assert_eq!(caller.to_string(), "src/logger.rs:12");

        let bare = Caller::new("main.rs", 3, None);
        assert_eq!(bare.short_file(), "main.rs");

        let windows = Caller::new(r"C:\work\src\main.rs", 3, None);
        assert_eq!(windows.short_file(), r"src\main.rs");
    }

    #[test]
    fn display_appends_function_when_known() {
        let caller = Caller::new("a/b/c.rs", 7, Some("app::run".to_owned()));
        assert_eq!(caller.to_string(), "b/c.rs:7$app::run");
    }

    #[test]
    fn tracked_resolver_ignores_extra_frames() {
        let site = CallSite::here(5, 1);
        let caller = TrackedResolver.resolve(&site);
        assert_eq!(caller.line(), site.location().line());
        assert_eq!(caller.function(), None);
    }

    #[test]
    fn backtrace_resolver_uses_location_without_extra_frames() {
        let site = CallSite::here(2, 2);
        let caller = BacktraceResolver.resolve(&site);
        assert_eq!(caller, Caller::from_location(site.location()));
    }

    #[test]
    fn backtrace_resolver_falls_back_when_the_stack_runs_out() {
        let site = CallSite::here(10_000, 1);
        let caller = BacktraceResolver.resolve(&site);
        assert_eq!(caller, Caller::from_location(site.location()));
    }

    #[test]
    fn standard_library_frames_are_runtime_frames() {
        assert!(is_runtime_file(Path::new(
            "/rustc/90b35a6239c3d8bdabc530a6a0816f7ff89a0aaf/library/core/src/ops/function.rs"
        )));
        assert!(is_runtime_file(Path::new(
            "/home/dev/.rustup/toolchains/stable-x86_64-unknown-linux-gnu/lib/rustlib/src/rust/library/std/src/rt.rs"
        )));
        assert!(is_runtime_file(Path::new(
            r"C:\Users\dev\.rustup\toolchains\stable\lib\rustlib\src\rust\library\std\src\rt.rs"
        )));
        assert!(!is_runtime_file(Path::new("/srv/app/src/main.rs")));
        assert!(!is_runtime_file(Path::new("crates/logging/src/logger/tests.rs")));
    }

    #[test]
    fn backtrace_resolver_clamps_negative_extra() {
        let site = CallSite::here(0, 1);
        let caller = BacktraceResolver.resolve(&site);
        assert_eq!(caller, Caller::from_location(site.location()));
    }
}
