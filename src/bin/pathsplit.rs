use pathsplit::Result;

use pathsplit::cli::{get_config, run};

fn main() -> Result<()> {
    run(get_config()?)?;

    Ok(())
}
