//! scripts-run: discover and run package.json scripts across workspace folders.

use anyhow::Result;

fn main() -> Result<()> {
    scripts_run::cli::run()
}
