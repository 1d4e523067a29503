//! Prints the names of the tests this image can run
use std::io::Write;
use std::rc::Rc;

use anyhow::Result;

use crate::capability::get_capability_tests;
use crate::sdk::OperatorSdk;

pub fn exec<W: Write>(sdk: Rc<dyn OperatorSdk>, out: &mut W) -> Result<()> {
    let tm = get_capability_tests(sdk);
    for name in tm.test_names() {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}
