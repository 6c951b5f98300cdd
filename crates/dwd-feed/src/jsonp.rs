//! Stripping the callback wrapper around the feed body.

use crate::error::FetchError;

/// Strip one outer `name(...)` wrapper and return the text between the first
/// `(` and the last `)`.
///
/// Nothing else about the wrapper is checked: the callback name, trailing
/// semicolons and whitespace outside the parentheses are ignored.
///
/// ```
/// use dwd_feed::unwrap_callback;
///
/// assert_eq!(unwrap_callback("cb({\"a\":1})").unwrap(), "{\"a\":1}");
/// assert!(unwrap_callback("{\"a\":1}").is_err());
/// ```
pub fn unwrap_callback(body: &str) -> Result<&str, FetchError> {
    let open = body
        .find('(')
        .ok_or(FetchError::Unwrap("missing '('"))?;
    let close = body
        .rfind(')')
        .ok_or(FetchError::Unwrap("missing ')'"))?;

    if close < open {
        return Err(FetchError::Unwrap("')' appears before '('"));
    }

    Ok(&body[open + 1..close])
}
