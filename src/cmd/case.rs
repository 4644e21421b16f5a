use shapecast::cast::{Result, snake_case};

/// Print each identifier in snake_case, one per line.
pub fn run(idents: &[String]) -> Result<()> {
	for ident in idents {
		println!("{}", snake_case(ident));
	}
	Ok(())
}
