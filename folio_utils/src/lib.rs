mod macros;

/// Returns the version of the portfolio backend.
///
/// Prefers the `FOLIO_VERSION` variable set at build time (e.g. a git
/// describe from CI) and falls back to the crate version.
pub fn folio_version() -> &'static str {
    option_env!("FOLIO_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}
