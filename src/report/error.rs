//! Stack-carrying error wrapper.

use std::any::type_name;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::report::stack::{Frame, StackCapture};
use crate::report::SharedError;

/// An error annotated with a classification label and a captured call stack.
///
/// Display and `source` are transparent: the wrapper renders exactly like
/// the error it holds.
#[derive(Clone)]
pub struct TracedError {
    inner: SharedError,
    class: Option<Cow<'static, str>>,
    frames: Option<Arc<[Frame]>>,
}

impl TracedError {
    /// Wrap `err`, labelling it with its static type name.
    pub fn new<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(err),
            class: Some(Cow::Borrowed(type_name::<E>())),
            frames: None,
        }
    }

    /// Wrap an already shared error. No class label is known.
    pub fn from_shared(err: SharedError) -> Self {
        Self {
            inner: err,
            class: None,
            frames: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_frames(mut self, frames: Vec<Frame>) -> Self {
        self.frames = Some(frames.into());
        self
    }

    /// Guarantee a captured stack.
    ///
    /// An error that already carries frames is returned as is; anything else
    /// is wrapped and `capture` runs exactly once.
    pub fn ensure(err: &SharedError, capture: &dyn StackCapture) -> Self {
        match err.downcast_ref::<TracedError>() {
            Some(traced) if traced.is_captured() => traced.clone(),
            Some(traced) => traced.clone().with_frames(capture.capture()),
            None => Self::from_shared(Arc::clone(err)).with_frames(capture.capture()),
        }
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Captured frames, innermost first. Empty until captured.
    pub fn frames(&self) -> &[Frame] {
        self.frames.as_deref().unwrap_or(&[])
    }

    pub fn is_captured(&self) -> bool {
        self.frames.is_some()
    }

    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    pub fn into_shared(self) -> SharedError {
        Arc::new(self)
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedError")
            .field("error", &self.inner)
            .field("class", &self.class)
            .field("frames", &self.frames().len())
            .finish()
    }
}

impl Error for TracedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}
