//! `autogen headers` command

use anyhow::Result;

use super::Session;
use crate::cli::GlobalArgs;

pub fn execute(args: &GlobalArgs) -> Result<()> {
    let session = Session::load(args)?;
    let options = session.options.clone().headers_only();
    session.generate(args, options)
}
