#![allow(unused_macros)]

macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::debug!(target: $target, $($arg)+);
    );
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::debug!(target: "dynamic_array", $($arg)+);
    )
}

macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::trace!(target: $target, $($arg)+);
    );
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::trace!(target: "dynamic_array", $($arg)+);
    )
}
