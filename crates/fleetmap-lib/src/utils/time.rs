// Time helpers

use chrono::{Datelike, Utc};

/// Current calendar year (UTC), used for deployment form defaults and the
/// model-year range.
pub fn current_year() -> i32 {
    Utc::now().year()
}
