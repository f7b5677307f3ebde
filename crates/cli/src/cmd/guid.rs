use anyhow::Result;

use ttpgpack_lib::guid::generate_many;

/// Print `count` fresh GUIDs, one per line. Needs no project.
pub fn cmd_guid(count: usize) -> Result<()> {
  for id in generate_many(count) {
    println!("{}", id);
  }
  Ok(())
}
