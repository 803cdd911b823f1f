use std::env;

/// Looks up `name` in the process environment.
///
/// Returns `None` when the variable is not set. Values that are not valid
/// Unicode are converted lossily.
pub fn resolve(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    env::var_os(name).map(|value| value.to_string_lossy().into_owned())
}

/// Splits a `$NAME` word into its variable name.
///
/// No nested or adjacent references: everything after the leading `$` is the
/// name, so `$A$B` names the variable `A$B`.
pub fn variable_name(word: &str) -> Option<&str> {
    if word.starts_with('$') {
        Some(&word[1..])
    } else {
        None
    }
}
