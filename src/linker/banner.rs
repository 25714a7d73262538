//! ASCII banners embedded at compile time.

use include_dir::{include_dir, Dir};

static ASSETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

const SUCCESS_FILE: &str = "ascii-success.txt";
const FAILURE_FILE: &str = "ascii-failure.txt";

/// Closing banner for a run; `complete` when every candidate was linked.
pub fn banner(complete: bool) -> &'static str {
    let (file, fallback) = if complete {
        (SUCCESS_FILE, "Linked")
    } else {
        (FAILURE_FILE, "Not linked")
    };

    ASSETS_DIR
        .get_file(file)
        .and_then(|f| f.contents_utf8())
        .map(str::trim_end)
        .unwrap_or(fallback)
}
