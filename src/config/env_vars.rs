use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref WINDOWS_VAR: Regex = Regex::new(r"%([A-Za-z_][A-Za-z0-9_()]*)%").unwrap();
    static ref BRACED_VAR: Regex = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// Expand `%VAR%` and `${VAR}` references from the process environment.
///
/// References to unset variables are left untouched so the missing source is
/// reported with the path the catalog author wrote.
pub fn expand_env_vars(path: &str) -> String {
    if !path.contains('%') && !path.contains("${") {
        return path.to_string();
    }

    let lookup = |caps: &Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    };

    let expanded = WINDOWS_VAR.replace_all(path, lookup);
    BRACED_VAR.replace_all(&expanded, lookup).into_owned()
}
