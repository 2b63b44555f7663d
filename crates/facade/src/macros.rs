//! Level macros.
//!
//! Every macro takes a logger (anything that derefs to
//! [`Logger`](crate::Logger)), an optional `marker = …` and/or `cause = …`
//! prefix, a pattern literal, and positional arguments:
//!
//! ```ignore
//! warn!(logger, "retry #{}", attempt)?;
//! error!(logger, marker = audit, cause = io_error, "write to {} failed", path)?;
//! ```
//!
//! Arguments are evaluated only when the level is enabled. Each argument is
//! serialized with `serde`; the expansion returns `Result<(), ErrorEnvelope>`.

/// Log at a runtime level.
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, marker = $marker:expr, cause = $cause:expr, $pattern:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_impl!(
            $logger,
            $level,
            ::std::option::Option::Some($crate::__private::marker_arg(&$marker)),
            ::std::option::Option::Some($crate::__private::cause_arg($cause)),
            $pattern
            $(, $arg)*
        )
    };
    ($logger:expr, $level:expr, marker = $marker:expr, $pattern:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_impl!(
            $logger,
            $level,
            ::std::option::Option::Some($crate::__private::marker_arg(&$marker)),
            ::std::option::Option::None,
            $pattern
            $(, $arg)*
        )
    };
    ($logger:expr, $level:expr, cause = $cause:expr, $pattern:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_impl!(
            $logger,
            $level,
            ::std::option::Option::None,
            ::std::option::Option::Some($crate::__private::cause_arg($cause)),
            $pattern
            $(, $arg)*
        )
    };
    ($logger:expr, $level:expr, $pattern:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_impl!(
            $logger,
            $level,
            ::std::option::Option::None,
            ::std::option::Option::None,
            $pattern
            $(, $arg)*
        )
    };
}

/// Expansion shared by every level macro. Not public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_impl {
    ($logger:expr, $level:expr, $marker:expr, $cause:expr, $pattern:literal $(, $arg:expr)*) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::Level = $level;
        if logger.is_level_enabled(level) {
            logger.log_normalized_call(
                level,
                $marker,
                ::std::option::Option::Some($pattern),
                ::std::vec![$($crate::__private::to_log_arg(&$arg)),*],
                $cause,
            )
        } else {
            ::std::result::Result::<(), $crate::ErrorEnvelope>::Ok(())
        }
    }};
}

macro_rules! with_dollar_sign {
    ($($body:tt)*) => {
        macro_rules! __with_dollar_sign { $($body)* }
        __with_dollar_sign!($);
    }
}

macro_rules! define_level_macro {
    ($name:ident, $level:ident) => {
        with_dollar_sign! {
            ($d:tt) => {
                #[doc = concat!("Log at the ", stringify!($level), " level.")]
                #[macro_export]
                macro_rules! $name {
                    ($d logger:expr, $d ($d rest:tt)+) => {
                        $crate::log_at!($d logger, $crate::Level::$level, $d ($d rest)+)
                    };
                }
            }
        }
    };
}

define_level_macro!(trace, Trace);
define_level_macro!(debug, Debug);
define_level_macro!(info, Info);
define_level_macro!(warn, Warn);
define_level_macro!(error, Error);
