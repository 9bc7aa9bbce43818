//! Formatting shorthands for the [`Reporter`](crate::Reporter) methods.
//!
//! Each macro takes the reporter first, then an optional `tag = <expr>`, then
//! a format string and its arguments:
//!
//! ```text
//! warn!(rep, "skipping {:?}: {}", path, err);
//! warn!(rep, tag = "summary", "{} files skipped", n);
//! die_if!(rep, result.as_ref().err());            // message is the error itself
//! die!(rep, "").exit();                           // exit without a message
//! ```

/// Writes an informational message.
#[macro_export]
macro_rules! info {
    ($reporter:expr, tag = $tag:expr, $($arg:tt)+) => {
        $reporter.info($tag, ::std::format_args!($($arg)+))
    };
    ($reporter:expr, $($arg:tt)+) => {
        $reporter.info("", ::std::format_args!($($arg)+))
    };
}

/// Writes and counts a warning.
#[macro_export]
macro_rules! warn {
    ($reporter:expr, tag = $tag:expr, $($arg:tt)+) => {
        $reporter.warn($tag, ::std::format_args!($($arg)+))
    };
    ($reporter:expr, $($arg:tt)+) => {
        $reporter.warn("", ::std::format_args!($($arg)+))
    };
}

/// Warns if the condition (an `Option<&E>`) is `Some`.
///
/// Without a format string, or with a literal `""`, the condition itself is
/// the message.
#[macro_export]
macro_rules! warn_if {
    ($reporter:expr, $cond:expr $(,)?) => {
        $reporter.warn_if($cond, "", ::std::option::Option::None)
    };
    ($reporter:expr, $cond:expr, tag = $tag:expr $(,)?) => {
        $reporter.warn_if($cond, $tag, ::std::option::Option::None)
    };
    ($reporter:expr, $cond:expr, tag = $tag:expr, "" $(,)?) => {
        $reporter.warn_if($cond, $tag, ::std::option::Option::None)
    };
    ($reporter:expr, $cond:expr, tag = $tag:expr, $($arg:tt)+) => {
        $reporter.warn_if(
            $cond,
            $tag,
            ::std::option::Option::Some(::std::format_args!($($arg)+)),
        )
    };
    ($reporter:expr, $cond:expr, "" $(,)?) => {
        $reporter.warn_if($cond, "", ::std::option::Option::None)
    };
    ($reporter:expr, $cond:expr, $($arg:tt)+) => {
        $reporter.warn_if(
            $cond,
            "",
            ::std::option::Option::Some(::std::format_args!($($arg)+)),
        )
    };
}

/// Writes a fatal error and evaluates to the [`Exit`](crate::Exit) to perform.
///
/// A literal `""` format writes nothing.
#[macro_export]
macro_rules! die {
    ($reporter:expr, tag = $tag:expr, "" $(,)?) => {{
        let _: &str = $tag;
        $reporter.die_silently()
    }};
    ($reporter:expr, tag = $tag:expr, $($arg:tt)+) => {
        $reporter.die($tag, ::std::format_args!($($arg)+))
    };
    ($reporter:expr, "" $(,)?) => {
        $reporter.die_silently()
    };
    ($reporter:expr, $($arg:tt)+) => {
        $reporter.die("", ::std::format_args!($($arg)+))
    };
}

/// Like [`die!`] if the condition is `Some`; evaluates to `Option<Exit>`.
#[macro_export]
macro_rules! die_if {
    ($reporter:expr, $cond:expr $(,)?) => {
        $reporter.die_if($cond, "", ::std::option::Option::None)
    };
    ($reporter:expr, $cond:expr, tag = $tag:expr $(,)?) => {
        $reporter.die_if($cond, $tag, ::std::option::Option::None)
    };
    ($reporter:expr, $cond:expr, tag = $tag:expr, "" $(,)?) => {
        $reporter.die_if($cond, $tag, ::std::option::Option::None)
    };
    ($reporter:expr, $cond:expr, tag = $tag:expr, $($arg:tt)+) => {
        $reporter.die_if(
            $cond,
            $tag,
            ::std::option::Option::Some(::std::format_args!($($arg)+)),
        )
    };
    ($reporter:expr, $cond:expr, "" $(,)?) => {
        $reporter.die_if($cond, "", ::std::option::Option::None)
    };
    ($reporter:expr, $cond:expr, $($arg:tt)+) => {
        $reporter.die_if(
            $cond,
            "",
            ::std::option::Option::Some(::std::format_args!($($arg)+)),
        )
    };
}

/// Panics through [`Reporter::panic`](crate::Reporter::panic).
#[macro_export]
macro_rules! bug {
    ($reporter:expr, tag = $tag:expr, $($arg:tt)+) => {
        $reporter.panic($tag, ::std::format_args!($($arg)+))
    };
    ($reporter:expr, $($arg:tt)+) => {
        $reporter.panic("", ::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use crate::destination::memory::MemoryDestinations;
    use crate::prelude::*;
    use crate::ReporterConfig;
    use pretty_assertions::assert_eq;
    use std::io;

    fn reporter(destinations: MemoryDestinations) -> Reporter<MemoryDestinations> {
        Reporter::with_config(ReporterConfig::default().with_prefix("tool"), destinations)
            .unwrap()
    }

    #[test]
    fn plain_and_tagged_forms() {
        let destinations = MemoryDestinations::new();
        let stderr = destinations.stderr();
        let mut rep = reporter(destinations);

        info!(rep, "{} of {}", 1, 2);
        warn!(rep, "odd value {:?}", "x");
        warn!(rep, tag = "summary", "{} warning(s)", 1);

        assert_eq!(
            stderr.text(),
            "tool: 1 of 2\ntool: odd value \"x\"\ntool summary: 1 warning(s)\n"
        );
        assert_eq!(rep.warning_count(), 2);
    }

    #[test]
    fn conditional_forms() {
        let destinations = MemoryDestinations::new();
        let stderr = destinations.stderr();
        let mut rep = reporter(destinations);
        let err = io::Error::new(io::ErrorKind::Other, "quota exceeded");
        let none: Option<&io::Error> = None;

        warn_if!(rep, none);
        warn_if!(rep, Some(&err));
        warn_if!(rep, Some(&err), tag = "cache");
        warn_if!(rep, Some(&err), "saving: {}", err);
        warn_if!(rep, Some(&err), tag = "cache", "saving failed");

        assert_eq!(
            stderr.text(),
            "tool: quota exceeded\n\
             tool cache: quota exceeded\n\
             tool: saving: quota exceeded\n\
             tool cache: saving failed\n"
        );
        assert_eq!(rep.warning_count(), 4);
    }

    #[test]
    fn fatal_forms() {
        let destinations = MemoryDestinations::new();
        let stderr = destinations.stderr();
        let mut rep = reporter(destinations);
        let none: Option<&str> = None;

        assert_eq!(die_if!(rep, none, "never"), None);
        let exit = die_if!(rep, Some("bad input"), tag = "BUG").unwrap();
        assert_eq!(exit.status(), 2);
        let exit = die!(rep, tag = "summary", "{} errors", 3);
        assert_eq!(exit.status(), 2);
        let exit = die!(rep, "");
        assert_eq!(exit.status(), 2);

        assert_eq!(stderr.text(), "tool BUG: bad input\ntool summary: 3 errors\n");
    }

    #[test]
    fn only_a_literal_empty_format_is_silent() {
        let destinations = MemoryDestinations::new();
        let stderr = destinations.stderr();
        let mut rep = reporter(destinations);

        let exit = die!(rep, "{}", "");
        assert_eq!(exit.status(), 2);
        warn_if!(rep, Some("COND"), "{}", "");
        warn_if!(rep, Some("COND"), "");
        let _ = die!(rep, tag = "summary", "");

        assert_eq!(stderr.text(), "tool: \ntool: \ntool: COND\n");
    }

    #[test]
    #[should_panic(expected = "tool BUG: unreachable state 4")]
    fn bug_panics() {
        let rep = reporter(MemoryDestinations::new());
        bug!(rep, tag = "BUG", "unreachable state {}", 4);
    }
}
