//! Conditional tracing macros (zero-cost when feature disabled).
//!
//! With the `tracing` feature enabled, the pipeline opens info-level spans
//! named after its stages (`transfer_style`, `extract_patches`,
//! `correlation_scan`, `reconstruct`, `postprocess`, `color_match`) and
//! reports sizes as events (`patches_extracted`, `correlation_done`,
//! `reconstructed`, `inputs_bounded`). Without it both macros expand to
//! nothing observable.

/// Opens an info-level span for one stage, e.g.
/// `trace_span!("reconstruct", channels = c).entered()`.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Emits an info-level event carrying stage sizes such as placement or
/// patch counts.
///
/// Without the `tracing` feature the values are still evaluated, then
/// discarded.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Stand-in span guard so `trace_span!(..).entered()` compiles without tracing.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns self, mimicking `Span::entered()`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
