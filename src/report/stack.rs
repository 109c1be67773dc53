//! Stack capture.
//!
//! # Responsibilities
//! - Describe one call-stack entry as a [`Frame`]
//! - Capture the current call stack, innermost frame first
//!
//! Frames belonging to the capturing machinery (this crate, `backtrace`
//! and the standard library) are collapsed at the top of the stack into a
//! single capture-site frame. Payload formatting drops it, so reported
//! stacks start at the caller.

/// One stack-trace entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Function name, demangled.
    pub method: String,
    /// Source file path, empty when debug info is missing.
    pub file: String,
    pub line: u32,
}

impl Frame {
    pub fn new(method: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            method: method.into(),
            file: file.into(),
            line,
        }
    }
}

/// Produces the call stack at the point it is invoked.
pub trait StackCapture: Send + Sync {
    fn capture(&self) -> Vec<Frame>;
}

/// Crates whose frames are skipped at the top of a captured stack.
pub const DEFAULT_SKIPPED_CRATES: &[&str] = &["backtrace", "bugsnack", "core", "std", "alloc"];

/// [`StackCapture`] backed by the `backtrace` crate.
#[derive(Debug, Clone, Copy)]
pub struct BacktraceCapture {
    /// Maximum number of frames kept per capture.
    pub max_frames: usize,
    /// Leading frames from these crates are collapsed into the capture site.
    pub skipped_initial_crates: &'static [&'static str],
}

impl Default for BacktraceCapture {
    fn default() -> Self {
        Self {
            max_frames: 64,
            skipped_initial_crates: DEFAULT_SKIPPED_CRATES,
        }
    }
}

const UNKNOWN_METHOD: &str = "unknown";

impl StackCapture for BacktraceCapture {
    fn capture(&self) -> Vec<Frame> {
        let backtrace = backtrace::Backtrace::new();

        let frames: Vec<Frame> = backtrace
            .frames()
            .iter()
            .flat_map(|frame| {
                let symbols = frame.symbols();
                if symbols.is_empty() {
                    return vec![Frame::new(UNKNOWN_METHOD, "", 0)];
                }
                // Inlined calls resolve to several symbols for one frame.
                symbols
                    .iter()
                    .map(|symbol| {
                        let method = symbol
                            .name()
                            .map(|name| format!("{:#}", name))
                            .unwrap_or_else(|| UNKNOWN_METHOD.to_string());
                        let file = symbol
                            .filename()
                            .map(|path| path.display().to_string())
                            .unwrap_or_default();
                        Frame::new(method, file, symbol.lineno().unwrap_or(0))
                    })
                    .collect()
            })
            .collect();

        let mut frames = trim_initial_frames(frames, self.skipped_initial_crates);
        frames.truncate(self.max_frames);
        frames
    }
}

/// Crate a demangled symbol belongs to, e.g. `std` for
/// `<std::io::Stdout as std::io::Write>::flush`.
fn crate_name(method: &str) -> Option<&str> {
    let path = method.trim_start_matches(|c: char| c == '<' || c == '&');
    let path = path.strip_prefix("mut ").unwrap_or(path);
    path.split_once("::").map(|(krate, _)| krate)
}

/// Collapse the leading frames from `skipped` crates into one capture-site
/// frame: the outermost of them.
fn trim_initial_frames(mut frames: Vec<Frame>, skipped: &[&str]) -> Vec<Frame> {
    let is_skipped = |frame: &Frame| {
        frame.method == UNKNOWN_METHOD
            || crate_name(&frame.method).is_some_and(|krate| skipped.contains(&krate))
    };

    match frames.iter().position(|frame| !is_skipped(frame)) {
        Some(0) => frames,
        Some(first_caller) => frames.split_off(first_caller - 1),
        // Nothing outside the skipped crates; only drop the unwinder.
        None => frames
            .into_iter()
            .skip_while(|frame| crate_name(&frame.method) == Some("backtrace"))
            .collect(),
    }
}
